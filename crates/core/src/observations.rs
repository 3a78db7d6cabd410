//! Best-effort scrape of the incident observations log.
//!
//! Observations are an append-only free-text log of newline-separated
//! entries. When an incident is moved to In-Progress the UI appends an
//! entry carrying `Responsable: <name>` and `Fecha limite: <yyyy-mm-dd>`
//! markers. This module extracts the responsible party and due date from
//! the LAST matching entry, tolerating missing markers, empty strings, and
//! unrelated entries. It never errors on malformed input; absent fields
//! come back as the `---` placeholder.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::types::{PLACEHOLDER, Timestamp};

/// Marker for the responsible party. Name runs until the next ` - ` or EOL.
const RESPONSIBLE_PATTERN: &str = r"Responsable:\s*([^-\n]+)";

/// Marker for the due date. Accepts `limite` with or without the accent.
const DUE_DATE_PATTERN: &str = r"Fecha l[ií]mite:\s*(\d{4}-\d{2}-\d{2})";

fn responsible_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(RESPONSIBLE_PATTERN).expect("static pattern"))
}

fn due_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DUE_DATE_PATTERN).expect("static pattern"))
}

/// The latest assignment scraped from an observations log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    /// Responsible party from the last assignment marker, or `---`.
    pub responsible: String,
    /// Due date (`YYYY-MM-DD`) from the last due-date marker, or `---`.
    pub due_date: String,
}

impl Assignment {
    /// Both fields as placeholders.
    pub fn placeholder() -> Self {
        Self {
            responsible: PLACEHOLDER.to_string(),
            due_date: PLACEHOLDER.to_string(),
        }
    }
}

/// Extract the most recent assignment from an observations log.
///
/// Each marker is scanned independently: an entry may update the
/// responsible party without restating the due date. The last match wins.
pub fn latest_assignment(observations: &str) -> Assignment {
    let responsible = responsible_re()
        .captures_iter(observations)
        .last()
        .map(|c| c[1].trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    let due_date = due_date_re()
        .captures_iter(observations)
        .last()
        .map(|c| c[1].to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    Assignment {
        responsible,
        due_date,
    }
}

/// Append an entry to an observations log, returning the new log.
///
/// Entries are prefixed with a `[YYYY-MM-DD HH:MM]` timestamp. Assignment
/// markers are only emitted for the fields actually provided, in the format
/// [`latest_assignment`] scrapes.
pub fn append_entry(
    log: &str,
    at: Timestamp,
    note: &str,
    responsible: Option<&str>,
    due_date: Option<&str>,
) -> String {
    let mut entry = format!("[{}] {}", at.format("%Y-%m-%d %H:%M"), note.trim());
    if let Some(name) = responsible {
        entry.push_str(" - Responsable: ");
        entry.push_str(name.trim());
    }
    if let Some(date) = due_date {
        entry.push_str(" - Fecha limite: ");
        entry.push_str(date.trim());
    }

    if log.trim().is_empty() {
        entry
    } else {
        format!("{log}\n{entry}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn empty_log_returns_placeholders() {
        assert_eq!(latest_assignment(""), Assignment::placeholder());
    }

    #[test]
    fn log_without_markers_returns_placeholders() {
        let log = "Se reporta derrame en bodega\nSe limpia la zona";
        assert_eq!(latest_assignment(log), Assignment::placeholder());
    }

    #[test]
    fn single_entry_is_extracted() {
        let log = "[2024-05-10 08:30] En proceso - Responsable: Maria Lopez - Fecha limite: 2024-06-01";
        let a = latest_assignment(log);
        assert_eq!(a.responsible, "Maria Lopez");
        assert_eq!(a.due_date, "2024-06-01");
    }

    #[test]
    fn last_entry_wins_over_earlier_ones() {
        let log = "\
[2024-05-10 08:30] En proceso - Responsable: Maria Lopez - Fecha limite: 2024-06-01
[2024-05-12 10:00] Avance parcial
[2024-05-15 16:45] Reasignado - Responsable: Carlos Ruiz - Fecha limite: 2024-07-15";
        let a = latest_assignment(log);
        assert_eq!(a.responsible, "Carlos Ruiz");
        assert_eq!(a.due_date, "2024-07-15");
    }

    #[test]
    fn markers_are_scanned_independently() {
        // The later entry restates only the responsible; the due date keeps
        // coming from the earlier entry.
        let log = "\
[2024-05-10 08:30] Responsable: Maria Lopez - Fecha limite: 2024-06-01
[2024-05-20 09:00] Cambio de encargado - Responsable: Ana Diaz";
        let a = latest_assignment(log);
        assert_eq!(a.responsible, "Ana Diaz");
        assert_eq!(a.due_date, "2024-06-01");
    }

    #[test]
    fn accented_due_date_marker_is_accepted() {
        let log = "Responsable: Pedro - Fecha límite: 2025-01-20";
        assert_eq!(latest_assignment(log).due_date, "2025-01-20");
    }

    #[test]
    fn malformed_due_date_is_ignored() {
        let log = "Responsable: Pedro - Fecha limite: pronto";
        let a = latest_assignment(log);
        assert_eq!(a.responsible, "Pedro");
        assert_eq!(a.due_date, PLACEHOLDER);
    }

    #[test]
    fn append_then_scrape_round_trips() {
        let at = chrono::Utc.with_ymd_and_hms(2024, 5, 10, 8, 30, 0).unwrap();
        let log = append_entry("", at, "En proceso", Some("Maria Lopez"), Some("2024-06-01"));
        assert_eq!(
            log,
            "[2024-05-10 08:30] En proceso - Responsable: Maria Lopez - Fecha limite: 2024-06-01"
        );

        let log = append_entry(&log, at, "Cierre pendiente", None, None);
        assert_eq!(log.lines().count(), 2);

        let a = latest_assignment(&log);
        assert_eq!(a.responsible, "Maria Lopez");
        assert_eq!(a.due_date, "2024-06-01");
    }
}
