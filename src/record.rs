// 🏟️ Team record - one row of the streak table
//
// Records are immutable values loaded once from a static table.
// Field names on the wire match the table headers (Team, ColorHex, ...).

use crate::hair;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ============================================================================
// SHIRT TYPE
// ============================================================================

/// Fill pattern of the doodle's shirt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShirtType {
    #[default]
    Plain,
    /// 5 vertical stripes
    Striped,
    /// 4 horizontal hoops
    Hooped,
    /// Left/right halves
    Half,
    /// 2x2 alternating blocks
    Quarters,
}

impl ShirtType {
    /// Lenient parse: case-insensitive, unknown values are plain
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "striped" | "stripes" => ShirtType::Striped,
            "hooped" | "hoops" => ShirtType::Hooped,
            "half" | "halves" => ShirtType::Half,
            "quarters" | "quartered" => ShirtType::Quarters,
            _ => ShirtType::Plain,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShirtType::Plain => "plain",
            ShirtType::Striped => "striped",
            ShirtType::Hooped => "hooped",
            ShirtType::Half => "half",
            ShirtType::Quarters => "quarters",
        }
    }
}

impl fmt::Display for ShirtType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ShirtType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ShirtType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = scalar_as_string(deserializer)?;
        Ok(ShirtType::parse(&raw))
    }
}

// ============================================================================
// HAIR LENGTH
// ============================================================================

/// Free-form hair length as it appears in the table
///
/// JSON tables carry numbers or strings (or nothing); CSV cells are always
/// text. Interpretation is left to [`hair::hair_length_to_px`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HairLength {
    #[default]
    Missing,
    Number(f64),
    Text(String),
}

impl HairLength {
    /// Build from a CSV cell (empty cell = missing)
    pub fn from_cell(cell: &str) -> Self {
        if cell.trim().is_empty() {
            HairLength::Missing
        } else {
            HairLength::Text(cell.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, HairLength::Missing)
    }
}

impl Serialize for HairLength {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            HairLength::Missing => serializer.serialize_none(),
            HairLength::Number(n) => serializer.serialize_f64(*n),
            HairLength::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for HairLength {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
            Other(serde_json::Value),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            None => HairLength::Missing,
            Some(Raw::Number(n)) => HairLength::Number(n),
            Some(Raw::Text(s)) => HairLength::Text(s),
            Some(Raw::Other(v)) => HairLength::Text(v.to_string()),
        })
    }
}

// ============================================================================
// TEAM RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    #[serde(rename = "Team", default, deserialize_with = "scalar_as_string")]
    pub team: String,

    #[serde(rename = "ColorHex", default, deserialize_with = "scalar_as_string")]
    pub color_hex: String,

    #[serde(rename = "AltColorHex", default, deserialize_with = "scalar_as_string")]
    pub alt_color_hex: String,

    #[serde(rename = "ShirtType", default)]
    pub shirt_type: ShirtType,

    #[serde(rename = "HairLength", default)]
    pub hair_length: HairLength,

    #[serde(rename = "StreakEndDate", default, deserialize_with = "scalar_as_string")]
    pub streak_end_date: String,
}

/// Any JSON value as display text: null is empty, strings are kept,
/// numbers and bools are printed
fn scalar_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

impl TeamRecord {
    /// Create a record with only a team name; everything else defaults
    pub fn new(team: impl Into<String>) -> Self {
        TeamRecord {
            team: team.into(),
            color_hex: String::new(),
            alt_color_hex: String::new(),
            shirt_type: ShirtType::Plain,
            hair_length: HairLength::Missing,
            streak_end_date: String::new(),
        }
    }

    pub fn with_colors(mut self, color: impl Into<String>, alt: impl Into<String>) -> Self {
        self.color_hex = color.into();
        self.alt_color_hex = alt.into();
        self
    }

    pub fn with_shirt(mut self, shirt_type: ShirtType) -> Self {
        self.shirt_type = shirt_type;
        self
    }

    pub fn with_hair(mut self, hair_length: HairLength) -> Self {
        self.hair_length = hair_length;
        self
    }

    pub fn with_streak(mut self, date: impl Into<String>) -> Self {
        self.streak_end_date = date.into();
        self
    }

    /// Hair height in pixels
    pub fn hair_px(&self) -> i32 {
        hair::hair_length_to_px(&self.hair_length)
    }

    /// Lookup key: trimmed and lowercased team name
    pub fn key(&self) -> String {
        normalize_team(&self.team)
    }
}

/// Normalize a team name or query for comparison
pub fn normalize_team(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shirt_type_parse() {
        assert_eq!(ShirtType::parse("Striped"), ShirtType::Striped);
        assert_eq!(ShirtType::parse(" HOOPED "), ShirtType::Hooped);
        assert_eq!(ShirtType::parse("half"), ShirtType::Half);
        assert_eq!(ShirtType::parse("quarters"), ShirtType::Quarters);
        assert_eq!(ShirtType::parse("sash"), ShirtType::Plain);
        assert_eq!(ShirtType::parse(""), ShirtType::Plain);
    }

    #[test]
    fn test_record_from_json_mixed_hair() {
        let json = r##"[
            {"Team": "Arsenal", "ColorHex": "#EF0107", "HairLength": "15"},
            {"Team": "Aston Villa", "HairLength": 21.4, "ShirtType": "Striped"},
            {"Team": "West Ham", "HairLength": null, "StreakEndDate": null},
            {"Team": "Odd", "HairLength": true}
        ]"##;
        let records: Vec<TeamRecord> = serde_json::from_str(json).unwrap();

        assert_eq!(records[0].hair_length, HairLength::Text("15".to_string()));
        assert_eq!(records[0].hair_px(), 15);
        assert_eq!(records[0].shirt_type, ShirtType::Plain);

        assert_eq!(records[1].hair_length, HairLength::Number(21.4));
        assert_eq!(records[1].shirt_type, ShirtType::Striped);
        assert_eq!(records[1].color_hex, "");

        assert!(records[2].hair_length.is_missing());
        assert_eq!(records[2].streak_end_date, "");
        assert_eq!(records[2].hair_px(), 12);

        assert_eq!(records[3].hair_length, HairLength::Text("true".to_string()));
        assert_eq!(records[3].hair_px(), 12);
    }

    #[test]
    fn test_record_with_non_string_scalars() {
        let json = r#"[
            {"Team": "Arsenal"},
            {"Team": "Celtic", "StreakEndDate": 20240420, "ShirtType": 1},
            {"Team": 1878, "ColorHex": false, "ShirtType": null}
        ]"#;
        let records: Vec<TeamRecord> = serde_json::from_str(json).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[1].team, "Celtic");
        assert_eq!(records[1].streak_end_date, "20240420");
        assert_eq!(records[1].shirt_type, ShirtType::Plain);
        assert_eq!(records[2].team, "1878");
        assert_eq!(records[2].color_hex, "false");
        assert_eq!(records[2].shirt_type, ShirtType::Plain);
    }

    #[test]
    fn test_record_serializes_table_names() {
        let record = TeamRecord::new("Chelsea")
            .with_colors("#034694", "#FFFFFF")
            .with_hair(HairLength::Text("long".to_string()));
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["Team"], "Chelsea");
        assert_eq!(value["ColorHex"], "#034694");
        assert_eq!(value["ShirtType"], "plain");
        assert_eq!(value["HairLength"], "long");
        assert_eq!(record.hair_px(), 40);
    }

    #[test]
    fn test_hair_from_cell() {
        assert!(HairLength::from_cell("  ").is_missing());
        assert_eq!(HairLength::from_cell("12.5"), HairLength::Text("12.5".to_string()));
    }

    #[test]
    fn test_key_normalization() {
        assert_eq!(TeamRecord::new("  Arsenal ").key(), "arsenal");
        assert_eq!(normalize_team(" ARSENAL"), "arsenal");
    }
}
