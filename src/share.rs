// 🔗 Shareable links - the `team` query parameter

/// Query parameter carrying the team name
pub const TEAM_PARAM: &str = "team";

/// Read `team` from a raw query string (without the leading `?`)
///
/// `+` counts as a space. A missing or empty value yields `None`.
pub fn team_from_query(query: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);

    query
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(key, _)| *key == TEAM_PARAM)
        .map(|(_, value)| decode_component(value))
        .filter(|team| !team.is_empty())
}

fn decode_component(value: &str) -> String {
    let spaced = value.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}

/// Link to the page with the team pre-filled
///
/// An empty team gives the bare base URL. Any existing query string on
/// `base` is dropped.
pub fn share_url(base: &str, team: &str) -> String {
    let base = base.split(['?', '#']).next().unwrap_or(base);
    let team = team.trim();
    if team.is_empty() {
        return base.to_string();
    }
    format!("{}?{}={}", base, TEAM_PARAM, urlencoding::encode(team))
}
