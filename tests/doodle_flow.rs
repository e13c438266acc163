use rand::rngs::StdRng;
use rand::SeedableRng;
use team_doodle::{
    hair_length_to_px, render_svg, share_url, team_from_query, CsvTableParser, DoodleView, HairLength,
    TableParser, TeamDirectory, SKIN_TONES,
};

#[test]
fn arsenal_from_bundled_table() {
    let directory = TeamDirectory::bundled().unwrap();
    let view = DoodleView::build(&directory, " arsenal ");
    let selection = view.selection.expect("Arsenal is bundled");

    assert_eq!(selection.team, "Arsenal");
    assert_eq!(selection.hair_px, 15);

    let svg = render_svg(&selection.doodle, &mut StdRng::seed_from_u64(11));
    assert!(svg.contains(r##"fill="#EF0107""##));
    assert!(SKIN_TONES.iter().any(|tone| svg.contains(tone)));
}

#[test]
fn chelsea_has_long_hair() {
    let directory = TeamDirectory::bundled().unwrap();
    assert_eq!(directory.lookup("CHELSEA").unwrap().hair_px(), 40);
}

#[test]
fn empty_query_shows_prompt() {
    let directory = TeamDirectory::bundled().unwrap();
    let view = DoodleView::build(&directory, "");
    assert!(view.selection.is_none());
    assert_eq!(view.suggestions.len(), 20);
}

#[test]
fn unknown_team_is_not_found() {
    let directory = TeamDirectory::bundled().unwrap();
    assert!(directory.lookup("Real Madrid").is_none());
}

#[test]
fn normalizer_properties() {
    for junk in ["", "bald", "n/a", "unknown", "??"] {
        let px = hair_length_to_px(&HairLength::Text(junk.to_string()));
        // "" coerces to zero, everything else falls back
        if junk.is_empty() {
            assert_eq!(px, 0);
        } else {
            assert_eq!(px, 12, "{junk}");
        }
    }
    for n in [0.0, 1.2, 7.5, 19.49, 99.9] {
        let expected = (n + 0.5_f64).floor() as i32;
        assert_eq!(hair_length_to_px(&HairLength::Number(n)), expected);
        assert_eq!(hair_length_to_px(&HairLength::Text(n.to_string())), expected);
    }
    assert_eq!(hair_length_to_px(&HairLength::Missing), 12);
}

#[test]
fn csv_upload_then_share() {
    let csv = "Club,ColorHex,Hair Length,LastWinDate\nBrighton & Hove Albion,#0057B8,short,2024-09-28\n";
    let directory = TeamDirectory::new(CsvTableParser.parse_str(csv).unwrap());

    let record = directory.lookup("brighton & hove albion").unwrap();
    assert_eq!(record.hair_px(), 10);

    let url = share_url("http://localhost:3000/", &record.team);
    let query = url.split_once('?').unwrap().1;
    assert_eq!(team_from_query(query).as_deref(), Some("Brighton & Hove Albion"));
}
