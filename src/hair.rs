// ✂️ Hair length normalizer
//
// 1 unit of hair length = 1 pixel of drawn hair (rounded).
// Every input has a defined fallback; there is no error path.

use crate::record::HairLength;

/// Pixel height used when the value is absent or unrecognised
pub const DEFAULT_HAIR_PX: i32 = 12;

const DEFAULT_LABEL: &str = "(default)";

/// Keyword lengths, checked in this order against the lowercased text
const KEYWORDS: [(&str, i32); 3] = [("short", 10), ("medium", 25), ("long", 40)];

/// Convert a free-form hair length into a pixel height
///
/// - absent → 12
/// - number → rounded to nearest integer
/// - numeric string → rounded
/// - string containing "short" / "medium" / "long" → 10 / 25 / 40
/// - anything else → 12
pub fn hair_length_to_px(value: &HairLength) -> i32 {
    match value {
        HairLength::Missing => DEFAULT_HAIR_PX,
        HairLength::Number(n) => round_px(*n),
        HairLength::Text(raw) => text_to_px(raw),
    }
}

fn text_to_px(raw: &str) -> i32 {
    let s = raw.trim().to_lowercase();

    if let Some(n) = parse_number(&s) {
        return round_px(n);
    }

    KEYWORDS
        .iter()
        .find(|(word, _)| s.contains(word))
        .map(|(_, px)| *px)
        .unwrap_or(DEFAULT_HAIR_PX)
}

/// Parse a trimmed, lowercased string as a number
///
/// An empty string counts as zero, the same way a browser coerces "" to 0.
fn parse_number(s: &str) -> Option<f64> {
    if s.is_empty() {
        return Some(0.0);
    }
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Half-up rounding (2.5 → 3, -2.5 → -2)
fn round_px(n: f64) -> i32 {
    if !n.is_finite() {
        return DEFAULT_HAIR_PX;
    }
    (n + 0.5).floor() as i32
}

/// Human label for the hair length shown next to the doodle
///
/// Numeric values get one decimal and a "cm" suffix, keywords are shown
/// as typed. An absent, empty or zero value reads "(default)".
pub fn hair_label(value: &HairLength) -> String {
    let number = match value {
        HairLength::Missing => None,
        HairLength::Number(n) => Some(*n),
        HairLength::Text(raw) => {
            let s = raw.trim();
            if s.is_empty() {
                return DEFAULT_LABEL.to_string();
            }
            match s.parse::<f64>() {
                Ok(n) => Some(n),
                Err(_) => return s.to_string(),
            }
        }
    };

    match number {
        Some(n) if n.is_finite() && n != 0.0 => format!("{:.1}cm", n),
        _ => DEFAULT_LABEL.to_string(),
    }
}
