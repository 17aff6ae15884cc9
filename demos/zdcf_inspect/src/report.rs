//! Rendering of resolved applications for the inspector.

use std::io::{self, Write};

use serde::Serialize;
use zdcf::{AppConfig, DeviceConfig, ResolvedApp};

use crate::error::Result;

/// Portion of the application being reported.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ReportBody<'a> {
    /// The whole application.
    App(&'a AppConfig),
    /// A single device.
    Device(&'a DeviceConfig),
}

/// JSON document printed by the inspector.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    /// Application name.
    pub app: &'a str,
    /// Version of the merged document.
    pub version: f64,
    /// Device the report is narrowed to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<&'a str>,
    /// Reported configuration.
    pub config: ReportBody<'a>,
}

/// Build a report for `app`, narrowed to `device` when given.
///
/// # Errors
///
/// Returns [`crate::error::InspectError::Resolve`] when `device` is absent.
pub fn build_report<'a>(app: &'a ResolvedApp, device: Option<&'a str>) -> Result<Report<'a>> {
    let config = match device {
        Some(name) => ReportBody::Device(app.require_device(name)?),
        None => ReportBody::App(app.config()),
    };
    Ok(Report {
        app: app.name(),
        version: app.version(),
        device,
        config,
    })
}

/// Write `report` as JSON followed by a newline.
///
/// # Errors
///
/// Returns an error when encoding or writing fails.
pub fn write_report_to<W: Write>(mut out: W, report: &Report<'_>, compact: bool) -> Result<()> {
    if compact {
        serde_json::to_writer(&mut out, report)?;
    } else {
        serde_json::to_writer_pretty(&mut out, report)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Print `report` to standard output.
///
/// # Errors
///
/// Returns an error when encoding or writing fails.
pub fn print_report(report: &Report<'_>, compact: bool) -> Result<()> {
    let stdout = io::stdout().lock();
    write_report_to(stdout, report, compact)
}
