//! Reporting collaborator.
//!
//! Bundles an estimate with everything a presenter needs to show it, and
//! exports decay curves as plain CSV for external plotting tools.

use crate::curve::{decay_curve, CurveSettings};
use crate::engine::{estimate, hours_until_safe, safe_at};
use crate::form::FormState;
use crate::{BacResult, Catalog, DecayCurve, Error, Intake, Result, Subject, WidmarkModel};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// A complete answer to one submission
#[derive(Clone, Debug, Serialize)]
pub struct EstimateReport {
    pub input: FormState,
    pub result: BacResult,
    pub hours_until_safe: f64,
    /// None when the wait runs past any representable date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safe_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve: Option<DecayCurve>,
}

impl EstimateReport {
    /// Run the estimator and collect the presentation data around it
    pub fn build(
        catalog: &Catalog,
        model: &WidmarkModel,
        subject: &Subject,
        intake: &Intake,
        now: DateTime<Utc>,
        curve_settings: Option<&CurveSettings>,
    ) -> Result<Self> {
        let result = estimate(catalog, model, subject, intake)?;
        let remaining = hours_until_safe(&result, subject, model);
        let curve = curve_settings.map(|s| decay_curve(result.initial_bac_percent, model, s));

        Ok(Self {
            input: FormState::from_submission(catalog, subject, intake),
            hours_until_safe: remaining,
            safe_at: safe_at(now, remaining),
            result,
            curve,
        })
    }
}

/// Write curve points as `hours,bac_percent` CSV to any writer
pub fn write_curve<W: Write>(writer: W, curve: &DecayCurve) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for point in &curve.points {
        writer.serialize(point)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write curve points to a CSV file, replacing it atomically
///
/// Points are written to a temp file in the same directory, synced, then
/// renamed over `path`.
pub fn write_curve_csv(path: &Path, curve: &DecayCurve) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    write_curve(std::io::BufWriter::new(temp.as_file()), curve)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::info!("Wrote {} curve points to {:?}", curve.points.len(), path);
    Ok(())
}
