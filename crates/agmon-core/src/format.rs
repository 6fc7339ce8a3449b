//! Display formatting helpers.
//!
//! Pure string formatting shared by the renderer: reset countdowns,
//! thousands-separated counts, and table label truncation. Everything
//! here takes its clock as an argument so callers stay reproducible.

use chrono::{DateTime, Utc};

/// Formats a quota reset instant as a countdown relative to `now`.
///
/// Rules:
/// - absent → `"N/A"`
/// - unparseable → the raw string, verbatim
/// - already past → `"Resetting..."`
/// - more than 24 hours out → `"{d}d {h}h"` (minutes dropped)
/// - otherwise → `"{h}h {m}m"`
///
/// Instants parse as RFC 3339 / ISO-8601 (accepts `Z`, numeric
/// offsets, and fractional seconds).
pub fn format_reset_time(reset_time: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(raw) = reset_time else {
        return "N/A".to_string();
    };

    let Ok(reset) = DateTime::parse_from_rfc3339(raw) else {
        return raw.to_string();
    };

    let delta = reset.with_timezone(&Utc).signed_duration_since(now);
    let total_seconds = delta.num_seconds();
    if total_seconds < 0 {
        return "Resetting...".to_string();
    }

    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;

    if hours > 24 {
        format!("{}d {}h", hours / 24, hours % 24)
    } else {
        format!("{hours}h {minutes}m")
    }
}

/// Formats a count with thousands separators (`1234567` → `"1,234,567"`).
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Truncates a model label to at most `max` characters.
///
/// Shorter labels pass through unchanged; padding to the table column
/// width is the renderer's job.
pub fn truncate_label(label: &str, max: usize) -> String {
    label.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        // Fixed instant so deltas are exact
        DateTime::parse_from_rfc3339("2025-06-01T12:00:00Z")
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now())
    }

    #[test]
    fn test_reset_time_ninety_minutes_out() {
        let reset = (now() + Duration::minutes(90)).to_rfc3339();
        assert_eq!(format_reset_time(Some(&reset), now()), "1h 30m");
    }

    #[test]
    fn test_reset_time_fifty_hours_out() {
        let reset = (now() + Duration::hours(50)).to_rfc3339();
        assert_eq!(format_reset_time(Some(&reset), now()), "2d 2h");
    }

    #[test]
    fn test_reset_time_exactly_one_day_uses_hours() {
        // 24h is not "> 24", so it stays in the hours form
        let reset = (now() + Duration::hours(24)).to_rfc3339();
        assert_eq!(format_reset_time(Some(&reset), now()), "24h 0m");
    }

    #[test]
    fn test_reset_time_past_instant() {
        let reset = (now() - Duration::minutes(5)).to_rfc3339();
        assert_eq!(format_reset_time(Some(&reset), now()), "Resetting...");
    }

    #[test]
    fn test_reset_time_absent() {
        assert_eq!(format_reset_time(None, now()), "N/A");
    }

    #[test]
    fn test_reset_time_unparseable_passes_through() {
        assert_eq!(format_reset_time(Some("garbage"), now()), "garbage");
    }

    #[test]
    fn test_reset_time_accepts_offset_form() {
        let reset = "2025-06-01T15:30:00+02:00"; // 13:30 UTC, 90 minutes out
        assert_eq!(format_reset_time(Some(reset), now()), "1h 30m");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn test_truncate_label_long() {
        let long = "A".repeat(40);
        assert_eq!(truncate_label(&long, 34).chars().count(), 34);
    }

    #[test]
    fn test_truncate_label_short_unchanged() {
        assert_eq!(truncate_label("Gemini 3 Pro", 34), "Gemini 3 Pro");
    }
}
