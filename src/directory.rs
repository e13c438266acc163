// 📇 Team directory - case-insensitive lookup + autocomplete
//
// Holds the loaded table in memory. Team names are unique under
// trim+lowercase comparison; the first row for a name wins.

use crate::error::TableError;
use crate::loader;
use crate::record::{normalize_team, TeamRecord};
use std::collections::HashSet;
use std::path::Path;

/// Suggestions returned per query unless the caller asks otherwise
pub const DEFAULT_SUGGESTION_LIMIT: usize = 20;

/// Names offered in the page's autocomplete list
pub const DATALIST_LIMIT: usize = 1000;

/// Shirt color when the record has none and the club is not known
pub const FALLBACK_SHIRT_COLOR: &str = "#888";

/// Shorts/pattern color when the record has none
pub const FALLBACK_ALT_COLOR: &str = "#fff";

/// Built-in shirt colors, used when a table row has no ColorHex
const KNOWN_COLORS: [(&str, &str); 20] = [
    ("Arsenal", "#EF0107"),
    ("Aston Villa", "#670E36"),
    ("Bournemouth", "#DA291C"),
    ("Brentford", "#D50000"),
    ("Brighton and Hove Albion", "#0057B8"),
    ("Burnley", "#6C1D45"),
    ("Chelsea", "#034694"),
    ("Crystal Palace", "#1B458F"),
    ("Everton", "#003399"),
    ("Fulham", "#000000"),
    ("Leeds United", "#FFCD00"),
    ("Liverpool", "#C8102E"),
    ("Manchester City", "#6CABDD"),
    ("Manchester United", "#DA291C"),
    ("Newcastle United", "#000000"),
    ("Nottingham Forest", "#DD0000"),
    ("Sunderland", "#EE2737"),
    ("Tottenham Hotspur", "#132257"),
    ("West Ham United", "#7A263A"),
    ("Wolverhampton Wanderers", "#FDB913"),
];

/// Built-in color for a club name (case-insensitive)
pub fn known_color(team: &str) -> Option<&'static str> {
    let key = normalize_team(team);
    KNOWN_COLORS
        .iter()
        .find(|(name, _)| name.to_lowercase() == key)
        .map(|(_, color)| *color)
}

#[derive(Debug, Clone, Default)]
pub struct TeamDirectory {
    records: Vec<TeamRecord>,
    /// Distinct names, sorted
    teams: Vec<String>,
}

impl TeamDirectory {
    /// Build from loaded rows, dropping nameless and duplicate teams
    pub fn new(rows: Vec<TeamRecord>) -> Self {
        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(rows.len());

        for row in rows {
            let key = row.key();
            if key.is_empty() {
                tracing::debug!("dropping table row without team name");
                continue;
            }
            if !seen.insert(key) {
                tracing::warn!(team = %row.team, "duplicate team in table, keeping first row");
                continue;
            }
            records.push(row);
        }

        let mut teams: Vec<String> = records.iter().map(|r| r.team.clone()).collect();
        teams.sort();

        TeamDirectory { records, teams }
    }

    /// Directory over the table compiled into the binary
    pub fn bundled() -> Result<Self, TableError> {
        Ok(Self::new(loader::bundled_records()?))
    }

    /// Directory over a JSON or CSV file
    pub fn from_path(path: &Path) -> Result<Self, TableError> {
        Ok(Self::new(loader::load_table(path)?))
    }

    /// Find the record for a free-text query
    ///
    /// Trims and lowercases the query; an empty query selects nothing.
    pub fn lookup(&self, query: &str) -> Option<&TeamRecord> {
        let q = normalize_team(query);
        if q.is_empty() {
            return None;
        }
        self.records.iter().find(|r| r.key() == q)
    }

    /// All distinct team names, sorted
    pub fn teams(&self) -> &[String] {
        &self.teams
    }

    /// Names containing the query (case-insensitive), at most `limit`
    ///
    /// An empty query returns the first `limit` names.
    pub fn suggestions(&self, query: &str, limit: usize) -> Vec<&str> {
        let q = query.to_lowercase();
        self.teams
            .iter()
            .filter(|t| q.is_empty() || t.to_lowercase().contains(&q))
            .take(limit)
            .map(|t| t.as_str())
            .collect()
    }

    /// Shirt color for a record, with built-in and grey fallbacks
    pub fn shirt_color(&self, record: &TeamRecord) -> String {
        let color = record.color_hex.trim();
        if !color.is_empty() {
            return color.to_string();
        }
        known_color(&record.team)
            .unwrap_or(FALLBACK_SHIRT_COLOR)
            .to_string()
    }

    pub fn records(&self) -> &[TeamRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
