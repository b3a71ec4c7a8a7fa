//! Demo gallery helpers: client-side filtering and card formatting.

use chrono::{Local, TimeZone};

use crate::api::Demo;

/// Demos whose filename, style, or effect id contains `term`, ignoring case.
///
/// The term is matched as typed, spaces included. An empty term keeps every
/// demo. Order is preserved.
pub fn filter_demos<'a>(demos: &'a [Demo], term: &str) -> Vec<&'a Demo> {
    let term = term.to_lowercase();
    if term.is_empty() {
        return demos.iter().collect();
    }

    demos
        .iter()
        .filter(|demo| {
            demo.filename.to_lowercase().contains(&term)
                || demo.style.to_lowercase().contains(&term)
                || demo.effect_id.to_lowercase().contains(&term)
        })
        .collect()
}

/// Size in binary megabytes with two decimals, e.g. `"2.00 MB"`
pub fn format_demo_size(bytes: u64) -> String {
    const MIB: f64 = 1024.0 * 1024.0;
    format!("{:.2} MB", bytes as f64 / MIB)
}

/// Local date and time for a unix timestamp in seconds
pub fn format_created(created: f64) -> String {
    if !created.is_finite() || created < 0.0 {
        return "Unknown".to_string();
    }

    let secs = created.trunc() as i64;
    let nanos = ((created.fract() * 1e9) as u32).min(999_999_999);
    match Local.timestamp_opt(secs, nanos).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "Unknown".to_string(),
    }
}
