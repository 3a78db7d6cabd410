//! Colombian public-holiday calendar.
//!
//! Computes the holiday set for any Gregorian year, feeding the calendar UI
//! that flags holidays. Three holiday classes exist:
//!
//! - Fixed dates, observed as-is (Jan 1, May 1, Jul 20, Aug 7, Dec 8, Dec 25).
//! - Emiliani dates, moved to the following Monday unless already a Monday
//!   (Ley 51 de 1983). A Sunday moves one day forward, not back.
//! - Easter-relative dates: Holy Thursday and Good Friday are observed on
//!   their true dates; Ascension, Corpus Christi and Sacred Heart take their
//!   canonical offset from Easter Sunday and then shift to Monday.
//!
//! Easter Sunday uses the Meeus/Jones/Butcher algorithm for the Gregorian
//! calendar, valid for any year in the proleptic range this service cares
//! about (1900-2100 and well beyond).

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Fixed holidays as (month, day), never shifted.
const FIXED: &[(u32, u32)] = &[
    (1, 1),   // Año Nuevo
    (5, 1),   // Día del Trabajo
    (7, 20),  // Independencia
    (8, 7),   // Batalla de Boyacá
    (12, 8),  // Inmaculada Concepción
    (12, 25), // Navidad
];

/// Emiliani holidays as (month, day), shifted to the following Monday.
const EMILIANI: &[(u32, u32)] = &[
    (1, 6),   // Reyes Magos
    (3, 19),  // San José
    (6, 29),  // San Pedro y San Pablo
    (8, 15),  // Asunción de la Virgen
    (10, 12), // Día de la Raza
    (11, 1),  // Todos los Santos
    (11, 11), // Independencia de Cartagena
];

/// Easter-relative holidays that shift to Monday, as day offsets from
/// Easter Sunday.
const EASTER_MONDAYS: &[i64] = &[
    39, // Ascensión del Señor
    60, // Corpus Christi
    68, // Sagrado Corazón de Jesús
];

/// Easter Sunday for a Gregorian year (Meeus/Jones/Butcher).
pub fn easter_sunday(year: i32) -> NaiveDate {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
        .expect("Butcher's algorithm yields a valid March/April date")
}

/// Move a date to the following Monday unless it already is one.
///
/// A Sunday shifts forward a single day; every other weekday shifts
/// forward to the next Monday.
fn next_monday(date: NaiveDate) -> NaiveDate {
    let days_ahead = match date.weekday() {
        Weekday::Mon => 0,
        other => 7 - other.num_days_from_monday() as i64,
    };
    date + Duration::days(days_ahead)
}

/// All observed holidays for a year, sorted ascending.
pub fn holidays_in_year(year: i32) -> Vec<NaiveDate> {
    let mut days = Vec::with_capacity(18);

    for &(month, day) in FIXED {
        days.push(NaiveDate::from_ymd_opt(year, month, day).expect("fixed holiday date"));
    }

    for &(month, day) in EMILIANI {
        let date = NaiveDate::from_ymd_opt(year, month, day).expect("emiliani holiday date");
        days.push(next_monday(date));
    }

    let easter = easter_sunday(year);
    days.push(easter - Duration::days(3)); // Jueves Santo
    days.push(easter - Duration::days(2)); // Viernes Santo
    for &offset in EASTER_MONDAYS {
        days.push(next_monday(easter + Duration::days(offset)));
    }

    days.sort_unstable();
    days
}

/// Day-of-month numbers that are holidays in `(year, month0)`.
///
/// `month0` is zero-based (0 = January) to match the calendar widget's
/// month index. Out-of-range month indexes yield an empty set.
pub fn holidays_in_month(year: i32, month0: u32) -> Vec<u32> {
    if month0 > 11 {
        return Vec::new();
    }
    let month = month0 + 1;
    holidays_in_year(year)
        .into_iter()
        .filter(|d| d.month() == month)
        .map(|d| d.day())
        .collect()
}
