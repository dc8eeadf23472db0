use crate::error::{EngineError, Result};
use crate::notifier::Notifier;
use crate::options::ErrorPolicy;
use crate::path_security::validate_suffix;
use crate::ports::EncodingConverter;
use crate::record::{RecordState, WorkingSet};
use crate::report::{Outcomes, Stage};
use std::path::Path;

pub const NO_ENCODING_DATA: &str = "unconverted: no encoding data";

/// Name with `from` swapped for `to`, if `name` ends with `from` and has a
/// non-empty stem before it.
#[must_use]
pub fn retagged_name(name: &str, from: &str, to: &str) -> Option<String> {
    name.strip_suffix(from)
        .filter(|stem| !stem.is_empty())
        .map(|stem| format!("{stem}{to}"))
}

/// Extension retagging and encoding conversion over a working set.
pub struct FormatNormalizer<'a> {
    converter: &'a dyn EncodingConverter,
    notifier: &'a dyn Notifier,
    policy: ErrorPolicy,
}

impl<'a> FormatNormalizer<'a> {
    pub fn new(
        converter: &'a dyn EncodingConverter,
        notifier: &'a dyn Notifier,
        policy: ErrorPolicy,
    ) -> Self {
        Self {
            converter,
            notifier,
            policy,
        }
    }

    /// Rename every `*<from>` file in `dir` to `*<to>`.
    ///
    /// Existing files are never overwritten: a taken target name yields
    /// [`EngineError::RenameCollision`] for that file.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidConfig`] for unusable suffixes. Under
    /// [`ErrorPolicy::FailFast`], also returns the first collision or rename
    /// failure.
    pub fn retag_extension(
        &self,
        dir: &Path,
        set: &mut WorkingSet,
        from: &str,
        to: &str,
    ) -> Result<Outcomes> {
        validate_suffix(from)?;
        validate_suffix(to)?;
        if from == to {
            return Err(EngineError::InvalidConfig(format!(
                "source and target suffix are both '{from}'"
            )));
        }

        let mut outcomes = Outcomes::default();
        // Only then can an already retagged name match `from` again.
        let target_extends_source = to.ends_with(from);

        for record in set.iter_mut() {
            if target_extends_source && record.name.ends_with(to) {
                self.notifier.debug(&format!(
                    "{}: skipped, reason: already ends with {to}",
                    record.name
                ));
                continue;
            }
            let Some(new_name) = retagged_name(&record.name, from, to) else {
                self.notifier.debug(&format!(
                    "{}: skipped, reason: does not match *{from}",
                    record.name
                ));
                continue;
            };

            let source = dir.join(&record.name);
            let target = dir.join(&new_name);

            // symlink_metadata so a dangling link at the target also counts.
            let result = if target.symlink_metadata().is_ok() {
                Err(EngineError::RenameCollision {
                    from: record.name.clone(),
                    to: new_name.clone(),
                })
            } else {
                std::fs::rename(&source, &target).map_err(|source| EngineError::Rename {
                    from: record.name.clone(),
                    to: new_name.clone(),
                    source,
                })
            };

            match result {
                Ok(()) => {
                    self.notifier
                        .info(&format!("renamed {} -> {new_name}", record.name));
                    record.rename(new_name);
                }
                Err(err) => {
                    self.notifier.error(&err.to_string());
                    if self.policy.is_fail_fast() {
                        return Err(err);
                    }
                    outcomes.fail(Stage::Retag, &err);
                }
            }
        }

        Ok(outcomes)
    }

    /// Convert every inspected file whose reported encoding differs from
    /// `target_encoding`. Labels are compared exactly, case included.
    ///
    /// Files without a reported encoding are skipped and reported with
    /// [`NO_ENCODING_DATA`].
    ///
    /// # Errors
    /// Under [`ErrorPolicy::FailFast`], returns the first
    /// [`EngineError::Conversion`].
    pub fn convert_non_conforming(
        &self,
        dir: &Path,
        set: &mut WorkingSet,
        target_encoding: &str,
    ) -> Result<Outcomes> {
        let mut outcomes = Outcomes::default();

        for record in set.iter_mut() {
            let Some(encoding) = record.reported_encoding.clone() else {
                self.notifier
                    .warn(&format!("{}: {NO_ENCODING_DATA}", record.name));
                outcomes.skip(Stage::Convert, &record.name, NO_ENCODING_DATA);
                continue;
            };

            if encoding == target_encoding {
                self.notifier.info(&format!(
                    "{}: skipped, reason: already {target_encoding}",
                    record.name
                ));
                record.state = RecordState::ConversionNotNeeded;
                continue;
            }

            self.notifier.debug(&format!(
                "{}: converting {encoding} -> {target_encoding}",
                record.name
            ));
            match self.converter.convert(&dir.join(&record.name)) {
                Ok(()) => {
                    record.converted = true;
                    record.state = RecordState::Converted;
                    self.notifier.info(&format!(
                        "{}: converted {encoding} -> {target_encoding}",
                        record.name
                    ));
                }
                Err(cause) => {
                    record.state = RecordState::ConversionFailed;
                    let err = EngineError::Conversion {
                        file: record.name.clone(),
                        cause,
                    };
                    self.notifier.error(&err.to_string());
                    if self.policy.is_fail_fast() {
                        return Err(err);
                    }
                    outcomes.fail(Stage::Convert, &err);
                }
            }
        }

        Ok(outcomes)
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Retagging a retagged name never changes it again.
        #[test]
        fn test_retag_name_is_stable(
            stem in "[a-zA-Z0-9_]{1,12}",
            from in "\\.[a-z]{1,4}",
            to in "\\.[a-z]{1,4}",
        ) {
            prop_assume!(from != to);
            let name = format!("{stem}{from}");
            let once = retagged_name(&name, &from, &to).unwrap();
            prop_assert!(once.ends_with(&to));
            prop_assert_eq!(&once[..stem.len()], stem.as_str());
            if !once.ends_with(&from) {
                prop_assert_eq!(retagged_name(&once, &from, &to), None);
            }
        }

        /// Names without the source suffix are left alone.
        #[test]
        fn test_non_matching_names_are_untouched(stem in "[a-z]{1,12}") {
            prop_assert_eq!(retagged_name(&format!("{stem}.png"), ".txt", ".csv"), None);
        }
    }
}
