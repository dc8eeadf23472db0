// crates/engine/src/lib.rs
pub mod config;
pub mod error;
pub mod filesystem;
pub mod inspector;
pub mod nkf;
pub mod normalizer;
pub mod notifier;
pub mod options;
pub mod path_security;
pub mod ports;
pub mod record;
pub mod report;
pub mod tool;

#[cfg(test)]
mod testing;

use crate::config::Config;
use crate::error::Result;
use crate::inspector::EncodingInspector;
use crate::nkf::{NkfConverter, NkfDetector};
use crate::normalizer::FormatNormalizer;
use crate::notifier::Notifier;
use crate::ports::{EncodingConverter, EncodingDetector};
use crate::report::RunReport;

/// Run the whole pipeline: enumerate, retag, inspect, convert.
///
/// Each pass finishes before the next one starts, so conversion always sees
/// the names produced by retagging.
///
/// # Errors
///
/// Returns an error for invalid configuration or an unreadable directory.
/// Under [`options::ErrorPolicy::FailFast`] the first per-file failure is
/// returned as well; otherwise per-file failures are collected in
/// [`RunReport::failures`].
pub fn run(
    config: &Config,
    detector: &dyn EncodingDetector,
    converter: &dyn EncodingConverter,
    notifier: &dyn Notifier,
) -> Result<RunReport> {
    config.validate()?;
    let started_at = chrono::Local::now();
    let dir = config.directory.as_path();

    let (mut set, mut outcomes) = filesystem::enumerate_files(dir, notifier)?;

    let normalizer = FormatNormalizer::new(converter, notifier, config.policy);
    match &config.retag {
        Some(rule) => {
            outcomes.merge(normalizer.retag_extension(dir, &mut set, &rule.from, &rule.to)?);
        }
        None => notifier.debug("extension pass skipped, reason: disabled"),
    }

    let inspector = EncodingInspector::new(detector, notifier, config.policy);
    outcomes.merge(inspector.inspect(dir, &mut set)?);

    outcomes.merge(normalizer.convert_non_conforming(dir, &mut set, &config.target_encoding)?);

    let report = RunReport {
        directory: config.directory.clone(),
        target_encoding: config.target_encoding.clone(),
        started_at,
        finished_at: chrono::Local::now(),
        files: set.into_records(),
        failures: outcomes.failures,
        skipped: outcomes.skipped,
    };

    notifier.info(&format!(
        "completed: {} file(s), {} renamed, {} converted, {} failed",
        report.files.len(),
        report.renamed(),
        report.converted(),
        report.failed()
    ));

    Ok(report)
}

/// [`run`] with the `nkf` detector and converter from `config.tool`.
///
/// # Errors
///
/// Same as [`run`].
pub fn run_with_nkf(config: &Config, notifier: &dyn Notifier) -> Result<RunReport> {
    let detector = NkfDetector::new(&config.tool);
    let converter = NkfConverter::new(&config.tool);
    run(config, &detector, &converter, notifier)
}
