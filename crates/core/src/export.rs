//! Tabular export assembly for incidents and work-plan activities.
//!
//! Flattens record lists into display-ready rows with a fixed column order.
//! Every null or absent field renders as the `---` placeholder; no record is
//! ever dropped. Zero input records is signalled as an error so callers can
//! report "nothing to export" instead of producing an empty document.

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::observations;
use crate::types::PLACEHOLDER;

/// Column headers for the incident export, in output order.
pub const INCIDENT_HEADERS: [&str; 6] = [
    "Lugar",
    "Descripcion",
    "Fecha",
    "Estado",
    "Responsable",
    "Fecha limite",
];

/// Column headers for the work-plan export, in output order.
pub const WORK_PLAN_HEADERS: [&str; 9] = [
    "Actividad",
    "Objetivo",
    "Meta",
    "Alcance",
    "Responsable",
    "Recursos",
    "Fecha",
    "Hora",
    "Estado",
];

/// A flattened incident record ready for export assembly.
#[derive(Debug, Clone, Default)]
pub struct IncidentExportRecord {
    pub location: Option<String>,
    pub description: Option<String>,
    pub occurred_on: Option<NaiveDate>,
    pub status: Option<String>,
    /// Raw observations log; the latest assignment is scraped per row.
    pub observations: Option<String>,
}

/// A flattened work-plan activity ready for export assembly.
#[derive(Debug, Clone, Default)]
pub struct WorkPlanExportRecord {
    pub title: Option<String>,
    pub objective: Option<String>,
    pub target: Option<String>,
    pub scope: Option<String>,
    pub responsible: Option<String>,
    pub resources: Option<String>,
    pub scheduled_on: Option<NaiveDate>,
    pub scheduled_time: Option<String>,
    pub status: Option<String>,
}

/// Coerce an optional text field to display form.
fn text(value: &Option<String>) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Coerce an optional date to `YYYY-MM-DD` display form.
fn date(value: &Option<NaiveDate>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Assemble incident rows matching [`INCIDENT_HEADERS`].
///
/// The location column is uppercased for display; everything else passes
/// through as-is. Responsible and due-date come from the last assignment
/// entry in the observations log.
pub fn incident_rows(records: &[IncidentExportRecord]) -> Result<Vec<Vec<String>>, CoreError> {
    if records.is_empty() {
        return Err(CoreError::Validation("No records to export".into()));
    }

    Ok(records
        .iter()
        .map(|r| {
            let assignment =
                observations::latest_assignment(r.observations.as_deref().unwrap_or(""));
            vec![
                text(&r.location).to_uppercase(),
                text(&r.description),
                date(&r.occurred_on),
                text(&r.status),
                assignment.responsible,
                assignment.due_date,
            ]
        })
        .collect())
}

/// Assemble work-plan rows matching [`WORK_PLAN_HEADERS`].
pub fn work_plan_rows(records: &[WorkPlanExportRecord]) -> Result<Vec<Vec<String>>, CoreError> {
    if records.is_empty() {
        return Err(CoreError::Validation("No records to export".into()));
    }

    Ok(records
        .iter()
        .map(|r| {
            vec![
                text(&r.title),
                text(&r.objective),
                text(&r.target),
                text(&r.scope),
                text(&r.responsible),
                text(&r.resources),
                date(&r.scheduled_on),
                text(&r.scheduled_time),
                text(&r.status),
            ]
        })
        .collect())
}
