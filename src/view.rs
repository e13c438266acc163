// View model - everything a surface shows for the current query

use crate::directory::{TeamDirectory, DEFAULT_SUGGESTION_LIMIT};
use crate::doodle::DoodleSpec;
use crate::hair;
use crate::streak;
use serde::Serialize;

/// Shown when nothing is selected
pub const PROMPT: &str = "Start typing a team to see how long your hair would be.";

/// State for a selected team
#[derive(Debug, Clone, Serialize)]
pub struct Selection {
    pub team: String,
    pub shirt_color: String,
    pub alt_color: String,
    pub shirt_type: String,
    pub hair_px: i32,
    pub hair_label: String,
    pub streak_label: String,
    #[serde(skip)]
    pub doodle: DoodleSpec,
}

impl Selection {
    pub fn blurb(&self) -> String {
        format!(
            "If you only cut your hair when {} had a 5 league match winning streak...",
            self.team
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DoodleView {
    pub query: String,
    pub selection: Option<Selection>,
    pub suggestions: Vec<String>,
}

impl DoodleView {
    /// Derive the view for a query against a directory
    pub fn build(directory: &TeamDirectory, query: &str) -> Self {
        let selection = directory.lookup(query).map(|record| {
            let shirt_color = directory.shirt_color(record);
            let doodle = DoodleSpec::from_record(record, &shirt_color);
            Selection {
                team: record.team.clone(),
                alt_color: record.alt_color_hex.clone(),
                shirt_type: record.shirt_type.to_string(),
                hair_px: record.hair_px(),
                hair_label: hair::hair_label(&record.hair_length),
                streak_label: streak::streak_label(&record.streak_end_date),
                shirt_color,
                doodle,
            }
        });

        let suggestions = directory
            .suggestions(query, DEFAULT_SUGGESTION_LIMIT)
            .into_iter()
            .map(String::from)
            .collect();

        DoodleView {
            query: query.to_string(),
            selection,
            suggestions,
        }
    }

    pub fn is_selected(&self) -> bool {
        self.selection.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{HairLength, TeamRecord};

    fn directory() -> TeamDirectory {
        TeamDirectory::new(vec![
            TeamRecord::new("Arsenal")
                .with_colors("#EF0107", "#FFFFFF")
                .with_hair(HairLength::Text("15".to_string()))
                .with_streak("2025-05-10"),
            TeamRecord::new("Chelsea").with_hair(HairLength::Text("long".to_string())),
        ])
    }

    #[test]
    fn test_arsenal_view() {
        let view = DoodleView::build(&directory(), " arsenal ");
        let sel = view.selection.unwrap();
        assert_eq!(sel.team, "Arsenal");
        assert_eq!(sel.hair_px, 15);
        assert_eq!(sel.doodle.hair_px, 15);
        assert_eq!(sel.shirt_color, "#EF0107");
        assert_eq!(sel.doodle.color, "#EF0107");
        assert_eq!(sel.hair_label, "15.0cm");
        assert_eq!(sel.streak_label, "2025-05-10");
        assert!(sel.blurb().contains("when Arsenal had"));
    }

    #[test]
    fn test_chelsea_long_hair() {
        let view = DoodleView::build(&directory(), "Chelsea");
        let sel = view.selection.unwrap();
        assert_eq!(sel.hair_px, 40);
        assert_eq!(sel.hair_label, "long");
        assert_eq!(sel.streak_label, "(none found)");
        // built-in club color
        assert_eq!(sel.shirt_color, "#034694");
    }

    #[test]
    fn test_empty_query_selects_nothing() {
        let view = DoodleView::build(&directory(), "");
        assert!(!view.is_selected());
        assert_eq!(view.suggestions, vec!["Arsenal", "Chelsea"]);
    }

    #[test]
    fn test_partial_query_suggests_only() {
        let view = DoodleView::build(&directory(), "che");
        assert!(!view.is_selected());
        assert_eq!(view.suggestions, vec!["Chelsea"]);
    }
}
