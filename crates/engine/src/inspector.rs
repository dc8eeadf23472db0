use crate::error::{EngineError, Result};
use crate::notifier::Notifier;
use crate::options::ErrorPolicy;
use crate::ports::EncodingDetector;
use crate::record::{RecordState, WorkingSet};
use crate::report::{Outcomes, Stage};
use std::path::Path;

/// Asks the detector for the encoding of every file in the working set.
pub struct EncodingInspector<'a> {
    detector: &'a dyn EncodingDetector,
    notifier: &'a dyn Notifier,
    policy: ErrorPolicy,
}

impl<'a> EncodingInspector<'a> {
    pub fn new(
        detector: &'a dyn EncodingDetector,
        notifier: &'a dyn Notifier,
        policy: ErrorPolicy,
    ) -> Self {
        Self {
            detector,
            notifier,
            policy,
        }
    }

    /// Fill `reported_encoding` for each record, in working-set order.
    ///
    /// Failed files keep `reported_encoding = None` and end up in
    /// [`Outcomes::failures`].
    ///
    /// # Errors
    /// Under [`ErrorPolicy::FailFast`], returns the first
    /// [`EngineError::Detection`].
    pub fn inspect(&self, dir: &Path, set: &mut WorkingSet) -> Result<Outcomes> {
        let mut outcomes = Outcomes::default();

        for record in set.iter_mut() {
            self.notifier
                .debug(&format!("{}: detecting encoding", record.name));

            match self.detector.detect(&dir.join(&record.name)) {
                Ok(label) => {
                    self.notifier
                        .info(&format!("{}: reported encoding {label}", record.name));
                    record.reported_encoding = Some(label);
                    record.state = RecordState::Inspected;
                }
                Err(cause) => {
                    let err = EngineError::Detection {
                        file: record.name.clone(),
                        cause,
                    };
                    record.reported_encoding = None;
                    record.state = RecordState::DetectionFailed;
                    self.notifier.error(&err.to_string());
                    if self.policy.is_fail_fast() {
                        return Err(err);
                    }
                    outcomes.fail(Stage::Inspect, &err);
                }
            }
        }

        Ok(outcomes)
    }
}
