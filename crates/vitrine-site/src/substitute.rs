//! Placeholder substitution for embedded HTML assets.
//!
//! Assets exported from the upstream mail tooling carry two textual
//! placeholders that must be rewritten before display. This is a literal
//! substring rewrite, all occurrences, with no escaping or templating.

use chrono::NaiveDate;

/// Replaced with the entry's publish date as a long en-US date.
pub const TODAY_PLACEHOLDER: &str = "%TODAY%";

/// Deleted from the displayed asset.
pub const SENDER_PLACEHOLDER: &str = "%SENDER-INFO-SINGLELINE%";

/// Format a date the way the viewer displays it, e.g. `Friday, July 11, 2025`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Apply the two placeholder substitutions to raw asset text.
///
/// `%TODAY%` becomes the formatted publish date; without a publish date the
/// marker is left in place. `%SENDER-INFO-SINGLELINE%` is always removed.
pub fn substitute_placeholders(raw: &str, publish_date: Option<NaiveDate>) -> String {
    let mut text = match publish_date {
        Some(date) => raw.replace(TODAY_PLACEHOLDER, &format_long_date(date)),
        None => raw.to_string(),
    };

    text = text.replace(SENDER_PLACEHOLDER, "");

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn july_11() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 11).unwrap()
    }

    #[test]
    fn formats_long_date() {
        assert_eq!(format_long_date(july_11()), "Friday, July 11, 2025");
        assert_eq!(
            format_long_date(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()),
            "Monday, March 2, 2026"
        );
    }

    #[test]
    fn replaces_all_occurrences_and_strips_sender_marker() {
        let raw = "<p>Sent %TODAY%</p>%SENDER-INFO-SINGLELINE%<p>Again: %TODAY%</p>";

        let out = substitute_placeholders(raw, Some(july_11()));

        assert_eq!(
            out,
            "<p>Sent Friday, July 11, 2025</p><p>Again: Friday, July 11, 2025</p>"
        );
        assert!(!out.contains(TODAY_PLACEHOLDER));
        assert!(!out.contains(SENDER_PLACEHOLDER));

        let expected_len = raw.len() - 2 * TODAY_PLACEHOLDER.len()
            + 2 * "Friday, July 11, 2025".len()
            - SENDER_PLACEHOLDER.len();
        assert_eq!(out.len(), expected_len);
    }

    #[test]
    fn leaves_today_marker_without_a_date() {
        let raw = "Date: %TODAY% %SENDER-INFO-SINGLELINE%";

        let out = substitute_placeholders(raw, None);

        assert_eq!(out, "Date: %TODAY% ");
    }

    #[test]
    fn passes_through_text_without_placeholders() {
        let raw = "<html><body>plain</body></html>";

        assert_eq!(substitute_placeholders(raw, Some(july_11())), raw);
    }
}
