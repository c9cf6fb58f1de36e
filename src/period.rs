//! Period Key Module
//!
//! Derives the cache key for a calendar month. Keys are rendered as
//! `<month>/<year>` with lowercase Brazilian Portuguese month names, the same
//! shape the FIPE API uses for its `Mes` labels once normalized.

use chrono::{Datelike, Local, NaiveDate};

/// Month names in pt-BR, indexed by `month0`.
const MONTHS_PT_BR: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Returns the period key for the month containing `date`.
pub fn period_key<D: Datelike>(date: &D) -> String {
    format!("{}/{}", MONTHS_PT_BR[date.month0() as usize], date.year())
}

/// Returns the period key for the current local month.
pub fn current_period_key() -> String {
    period_key(&Local::now().date_naive())
}

/// Normalizes an upstream month label into a period key.
pub fn normalize_period(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Source of "today" used to derive the period key.
pub type Clock = std::sync::Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// Clock backed by the local wall clock.
pub fn system_clock() -> Clock {
    std::sync::Arc::new(|| Local::now().date_naive())
}

/// Clock that always reports the same day.
pub fn fixed_clock(date: NaiveDate) -> Clock {
    std::sync::Arc::new(move || date)
}
