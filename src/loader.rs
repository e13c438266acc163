// 📂 Table loaders - bundled JSON or user-supplied CSV
//
// Both produce plain Vec<TeamRecord>. Deduplication and lookup live in
// the directory; loaders only read rows.

use crate::error::TableError;
use crate::record::{HairLength, ShirtType, TeamRecord};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::path::Path;

/// Table bundled into the binary
pub const BUNDLED_TABLE: &str = include_str!("../data/teams.json");

// ============================================================================
// FORMAT DETECTION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Json,
    Csv,
}

impl TableFormat {
    pub fn name(&self) -> &'static str {
        match self {
            TableFormat::Json => "JSON",
            TableFormat::Csv => "CSV",
        }
    }
}

/// Pick a format from the file extension
pub fn detect_format(path: &Path) -> Result<TableFormat, TableError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "json" => Ok(TableFormat::Json),
        "csv" => Ok(TableFormat::Csv),
        _ => Err(TableError::UnknownFormat(path.display().to_string())),
    }
}

/// Parser for a format
pub fn get_parser(format: TableFormat) -> Box<dyn TableParser> {
    match format {
        TableFormat::Json => Box::new(JsonTableParser),
        TableFormat::Csv => Box::new(CsvTableParser),
    }
}

/// Load any supported table file
pub fn load_table(path: &Path) -> Result<Vec<TeamRecord>, TableError> {
    let format = detect_format(path)?;
    let records = get_parser(format).parse_file(path)?;
    tracing::info!(
        path = %path.display(),
        format = format.name(),
        rows = records.len(),
        "loaded team table"
    );
    Ok(records)
}

/// Rows of the bundled table
pub fn bundled_records() -> Result<Vec<TeamRecord>, TableError> {
    JsonTableParser.parse_str(BUNDLED_TABLE)
}

// ============================================================================
// PARSER TRAIT
// ============================================================================

pub trait TableParser: Send + Sync {
    /// Parse table text (file contents or pasted text)
    fn parse_str(&self, text: &str) -> Result<Vec<TeamRecord>, TableError>;

    fn format(&self) -> TableFormat;

    fn parse_file(&self, path: &Path) -> Result<Vec<TeamRecord>, TableError> {
        let text = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_str(&text)
    }
}

// ============================================================================
// JSON
// ============================================================================

/// Array of objects keyed by the record field names
pub struct JsonTableParser;

impl TableParser for JsonTableParser {
    fn parse_str(&self, text: &str) -> Result<Vec<TeamRecord>, TableError> {
        Ok(serde_json::from_str(text)?)
    }

    fn format(&self) -> TableFormat {
        TableFormat::Json
    }
}

// ============================================================================
// CSV
// ============================================================================

// Header synonyms, compared case-insensitively
const TEAM_HEADERS: &[&str] = &["Team", "Club"];
const COLOR_HEADERS: &[&str] = &["ColorHex", "Color", "Colour"];
const ALT_COLOR_HEADERS: &[&str] = &["AltColorHex", "AltColor", "AltColour"];
const SHIRT_HEADERS: &[&str] = &["ShirtType", "Shirt"];
const HAIR_HEADERS: &[&str] = &["Hair Length", "HairLength", "hair_length", "Hair"];
const STREAK_HEADERS: &[&str] = &["StreakEndDate", "LastWinDate", "Last5WinDate"];

/// Header row with user-defined names and order
pub struct CsvTableParser;

/// Column index for each known field
#[derive(Debug, Default)]
struct ColumnMap {
    team: usize,
    color: Option<usize>,
    alt_color: Option<usize>,
    shirt: Option<usize>,
    hair: Option<usize>,
    streak: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self, TableError> {
        Ok(ColumnMap {
            team: pick(headers, TEAM_HEADERS).ok_or(TableError::MissingColumn("Team"))?,
            color: pick(headers, COLOR_HEADERS),
            alt_color: pick(headers, ALT_COLOR_HEADERS),
            shirt: pick(headers, SHIRT_HEADERS),
            hair: pick(headers, HAIR_HEADERS),
            streak: pick(headers, STREAK_HEADERS),
        })
    }

    fn record(&self, row: &StringRecord) -> Option<TeamRecord> {
        let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).unwrap_or("");

        let team = cell(Some(self.team));
        if team.is_empty() {
            return None;
        }

        Some(
            TeamRecord::new(team)
                .with_colors(cell(self.color), cell(self.alt_color))
                .with_shirt(ShirtType::parse(cell(self.shirt)))
                .with_hair(HairLength::from_cell(cell(self.hair)))
                .with_streak(cell(self.streak)),
        )
    }
}

/// Index of the first header matching any of the names
fn pick(headers: &StringRecord, names: &[&str]) -> Option<usize> {
    headers.iter().position(|h| {
        let h = h.trim();
        names.iter().any(|name| name.eq_ignore_ascii_case(h))
    })
}

impl TableParser for CsvTableParser {
    fn parse_str(&self, text: &str) -> Result<Vec<TeamRecord>, TableError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let columns = ColumnMap::from_headers(reader.headers()?)?;

        let mut records = Vec::new();
        for (line_num, result) in reader.records().enumerate() {
            match result {
                Ok(row) => match columns.record(&row) {
                    Some(record) => records.push(record),
                    None => tracing::debug!(line = line_num + 2, "skipping CSV row without team"),
                },
                Err(e) => tracing::debug!(line = line_num + 2, error = %e, "skipping malformed CSV row"),
            }
        }

        Ok(records)
    }

    fn format(&self) -> TableFormat {
        TableFormat::Csv
    }
}
