// crates/cli/src/presentation.rs
use crate::error::Result;
use crate::options::SummaryFormat;
use check_format_engine::record::{FileRecord, RecordState};
use check_format_engine::report::RunReport;
use std::io::Write;

pub fn print_report(report: &RunReport, format: SummaryFormat) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, report, format)?;
    out.flush()?;
    Ok(())
}

pub fn write_report<W: Write>(out: &mut W, report: &RunReport, format: SummaryFormat) -> Result<()> {
    match format {
        SummaryFormat::Json => write_json(out, report),
        SummaryFormat::Text => write_text(out, report),
    }
}

fn write_json<W: Write>(out: &mut W, report: &RunReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

fn state_label(record: &FileRecord) -> &'static str {
    match record.state {
        RecordState::Enumerated => "not inspected",
        RecordState::Inspected => "inspected",
        RecordState::DetectionFailed => "detection failed",
        RecordState::ConversionNotNeeded => "ok",
        RecordState::Converted => "converted",
        RecordState::ConversionFailed => "conversion failed",
    }
}

fn write_text<W: Write>(out: &mut W, report: &RunReport) -> Result<()> {
    writeln!(
        out,
        "check_format v{} · target={}",
        crate::VERSION,
        report.target_encoding
    )?;
    writeln!(out)?;

    writeln!(out, "{:<14}{:<20}FILE", "ENCODING", "STATUS")?;
    writeln!(out, "----------------------------------------------")?;
    for record in &report.files {
        let encoding = record.reported_encoding.as_deref().unwrap_or("-");
        match &record.renamed_from {
            Some(old) => writeln!(
                out,
                "{encoding:<14}{:<20}{} (from {old})",
                state_label(record),
                record.name
            )?,
            None => writeln!(out, "{encoding:<14}{:<20}{}", state_label(record), record.name)?,
        }
    }

    writeln!(out, "---")?;
    writeln!(
        out,
        "renamed: {}  converted: {}  already {}: {}  failed: {}  skipped: {}",
        report.renamed(),
        report.converted(),
        report.target_encoding,
        report.already_conforming(),
        report.failed(),
        report.skipped.len()
    )?;

    if !report.failures.is_empty() {
        writeln!(out)?;
        writeln!(out, "FAILURES:")?;
        for failure in &report.failures {
            writeln!(out, "  [{}] {}", failure.stage, failure.message)?;
        }
    }

    if !report.skipped.is_empty() {
        writeln!(out)?;
        writeln!(out, "SKIPPED:")?;
        for skip in &report.skipped {
            writeln!(out, "  [{}] {}: {}", skip.stage, skip.file, skip.reason)?;
        }
    }

    writeln!(out)?;
    writeln!(
        out,
        "[check_format] Completed: {} files processed.",
        report.files.len()
    )?;
    Ok(())
}
