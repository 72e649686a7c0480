use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::{BatchConfig, FailurePolicy};
use crate::error::{LimitDatesError, Result};
use crate::io::{read_dmrs, write_limit_dates};
use crate::jurisdiction::Jurisdiction;
use crate::transform::limit_dates_frame;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JurisdictionReport {
    pub jurisdiction: Jurisdiction,
    pub input_rows: usize,
    pub output_rows: usize,
    pub duplicates_removed: usize,
    pub unparseable_dates: usize,
    pub output_path: PathBuf,
}

#[derive(Debug)]
pub struct JurisdictionFailure {
    pub jurisdiction: Jurisdiction,
    pub error: LimitDatesError,
}

/// Outcome of a batch run, in processing order.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub completed: Vec<JurisdictionReport>,
    pub failed: Vec<JurisdictionFailure>,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total_output_rows(&self) -> usize {
        self.completed.iter().map(|report| report.output_rows).sum()
    }
}

/// Reads one jurisdiction's DMR file, reduces it to deduplicated limit dates and
/// writes the result to `output`.
pub fn process_jurisdiction(
    jurisdiction: &Jurisdiction,
    input: &Path,
    output: &Path,
) -> Result<JurisdictionReport> {
    let dmrs = read_dmrs(input)?;
    let mut limit_dates = limit_dates_frame(dmrs)?;
    write_limit_dates(&mut limit_dates.frame, output)?;

    if limit_dates.unparseable_dates > 0 {
        warn!(
            jurisdiction = %jurisdiction,
            unparseable_dates = limit_dates.unparseable_dates,
            "Unparseable limit begin dates written as missing"
        );
    }

    Ok(JurisdictionReport {
        jurisdiction: jurisdiction.clone(),
        input_rows: limit_dates.input_rows,
        output_rows: limit_dates.output_rows(),
        duplicates_removed: limit_dates.duplicates_removed(),
        unparseable_dates: limit_dates.unparseable_dates,
        output_path: output.to_path_buf(),
    })
}

/// Processes every jurisdiction in order, writing `"<jurisdiction> Done"` to
/// `notices` after each one completes.
///
/// With [`FailurePolicy::Abort`] the first failure ends the run and is returned
/// as the error. With [`FailurePolicy::Continue`] failures are collected in the
/// summary instead. A failure to write a notice always ends the run.
pub fn process_all<I, O, W>(
    jurisdictions: &[Jurisdiction],
    input_location: I,
    output_location: O,
    policy: FailurePolicy,
    notices: &mut W,
) -> Result<BatchSummary>
where
    I: Fn(&Jurisdiction) -> PathBuf,
    O: Fn(&Jurisdiction) -> PathBuf,
    W: Write + ?Sized,
{
    let mut summary = BatchSummary::default();

    for jurisdiction in jurisdictions {
        let input = input_location(jurisdiction);
        let output = output_location(jurisdiction);

        match process_jurisdiction(jurisdiction, &input, &output) {
            Ok(report) => {
                info!(
                    jurisdiction = %jurisdiction,
                    input_rows = report.input_rows,
                    output_rows = report.output_rows,
                    duplicates_removed = report.duplicates_removed,
                    output = %report.output_path.display(),
                    "Wrote limit dates"
                );
                writeln!(notices, "{jurisdiction} Done").map_err(LimitDatesError::Notice)?;
                summary.completed.push(report);
            }
            Err(error) => match policy {
                FailurePolicy::Abort => return Err(error.for_jurisdiction(jurisdiction)),
                FailurePolicy::Continue => {
                    warn!(jurisdiction = %jurisdiction, error = %error, "Skipping jurisdiction");
                    summary.failed.push(JurisdictionFailure {
                        jurisdiction: jurisdiction.clone(),
                        error,
                    });
                }
            },
        }
    }

    Ok(summary)
}

pub fn run<W: Write + ?Sized>(config: &BatchConfig, notices: &mut W) -> Result<BatchSummary> {
    process_all(
        &config.jurisdictions,
        |jurisdiction| config.input_path(jurisdiction),
        |jurisdiction| config.output_path(jurisdiction),
        config.on_error,
        notices,
    )
}
