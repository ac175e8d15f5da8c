//! Small text helpers shared by views and the login flow.

use chrono::{DateTime, NaiveDateTime};

/// Collapse internal whitespace runs (including newlines) to single
/// spaces and trim the ends.
///
/// Records authored by hand carry accidental double spaces and line
/// breaks; comparisons and display text go through here so those never
/// matter. Idempotent.
pub fn clean(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_gap = false;
    for ch in text.trim().chars() {
        if ch.is_whitespace() {
            in_gap = true;
        } else {
            if in_gap && !out.is_empty() {
                out.push(' ');
            }
            in_gap = false;
            out.push(ch);
        }
    }
    out
}

/// Truncate to at most `max` characters, appending an ellipsis when
/// anything was cut. Counts characters, not bytes, so multi-byte text
/// never splits mid-glyph.
pub fn truncate(text: &str, max: usize) -> String {
    let mut chars = text.char_indices();
    match chars.nth(max) {
        None => text.to_string(),
        Some((idx, _)) => {
            let mut out = text[..idx].to_string();
            out.push('\u{2026}');
            out
        },
    }
}

/// Render an ISO-8601 timestamp as `YYYY-MM-DD HH:MM`, falling back to
/// the raw string when it does not parse.
pub fn format_date(iso: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S") {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    iso.to_string()
}

/// Parse an ISO-8601 timestamp to epoch seconds, for ordering records
/// by recency. `None` when it does not parse.
pub fn parse_timestamp(iso: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        return Some(dt.timestamp());
    }
    NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|dt| dt.and_utc().timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_collapses_inner_whitespace() {
        assert_eq!(clean("Ali  Rezaei"), "Ali Rezaei");
        assert_eq!(clean("Ali\nRezaei"), "Ali Rezaei");
        assert_eq!(clean("  Ali \n\n Rezaei  "), "Ali Rezaei");
    }

    #[test]
    fn clean_of_empty_is_empty() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("   \n "), "");
    }

    #[test]
    fn truncate_short_text_unchanged() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 5), "hello");
    }

    #[test]
    fn truncate_appends_ellipsis() {
        assert_eq!(truncate("hello world", 5), "hello\u{2026}");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        // Persian text: 4 chars, each multi-byte.
        let t = truncate("سلام دنیا", 4);
        assert_eq!(t, "سلام\u{2026}");
    }

    #[test]
    fn format_date_rfc3339() {
        assert_eq!(format_date("2025-09-01T08:30:00Z"), "2025-09-01 08:30");
    }

    #[test]
    fn format_date_naive() {
        assert_eq!(format_date("2025-09-01T08:30:00"), "2025-09-01 08:30");
    }

    #[test]
    fn format_date_falls_back_to_raw() {
        assert_eq!(format_date("last Tuesday"), "last Tuesday");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn parse_timestamp_orders_by_recency() {
        let older = parse_timestamp("2025-01-01T00:00:00Z").unwrap();
        let newer = parse_timestamp("2025-06-01T00:00:00Z").unwrap();
        assert!(newer > older);
        assert_eq!(parse_timestamp("not a date"), None);
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn clean_is_idempotent(s in ".{0,64}") {
                let once = clean(&s);
                prop_assert_eq!(clean(&once), once);
            }

            #[test]
            fn truncate_never_exceeds_max_plus_ellipsis(s in ".{0,64}", max in 0usize..32) {
                let out = truncate(&s, max);
                prop_assert!(out.chars().count() <= max + 1);
            }
        }
    }
}
