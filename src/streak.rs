// Streak end date display
//
// The date is never computed here, only shown. Year-first dates are
// normalised to ISO; anything else (including day/month orderings,
// which are ambiguous) is shown as typed.

use chrono::NaiveDate;

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a streak date in one of the accepted formats
pub fn parse_streak_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Label shown under "Date of last 5+ win streak"
pub fn streak_label(raw: &str) -> String {
    let s = raw.trim();
    if s.is_empty() {
        return "(none found)".to_string();
    }
    match parse_streak_date(s) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 4, 20).unwrap();
        assert_eq!(parse_streak_date("2024-04-20"), Some(expected));
        assert_eq!(parse_streak_date("2024-4-20"), Some(expected));
        assert_eq!(parse_streak_date("2024/04/20"), Some(expected));
        assert_eq!(parse_streak_date("20/04/2024"), None);
        assert_eq!(parse_streak_date("last spring"), None);
    }

    #[test]
    fn test_streak_label() {
        assert_eq!(streak_label(""), "(none found)");
        assert_eq!(streak_label("   "), "(none found)");
        assert_eq!(streak_label("2024/04/20"), "2024-04-20");
        assert_eq!(streak_label(" 20/04/2024 "), "20/04/2024");
        assert_eq!(streak_label("05/04/2024"), "05/04/2024");
        assert_eq!(streak_label("20240420"), "20240420");
        assert_eq!(streak_label("before the war"), "before the war");
    }
}
