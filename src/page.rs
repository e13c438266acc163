// 🖥️ Single-page HTML rendering
//
// The server renders the whole page for the first load and only the
// result panel afterwards; a few lines of inline script keep the URL and
// the panel in sync with the input, and post uploaded CSV tables.

use crate::directory::{TeamDirectory, DATALIST_LIMIT};
use crate::doodle;
use crate::view::{DoodleView, PROMPT};
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use rand::Rng;

const STYLE: &str = r#"
body { margin: 0; min-height: 100vh; display: grid; place-items: center;
       font-family: Inter, system-ui, sans-serif; background: #1f3b2c; color: #fff; }
main { display: grid; justify-items: center; gap: 16px; max-width: 600px; padding: 24px; text-align: center; }
label { display: block; font-size: 28px; }
input { width: 100%; max-width: 400px; padding: 10px; border: 1px solid #ddd; border-radius: 6px; text-align: center; }
#result { display: flex; flex-direction: column; align-items: center; gap: 12px; margin-top: 24px; }
.team { font-size: 36px; font-weight: 600; }
.blurb { font-size: 12px; }
.hair { font-size: 22px; }
.streak, .prompt { font-size: 14px; }
#upload { display: grid; gap: 8px; width: 100%; max-width: 400px; margin-top: 24px; font-size: 13px; }
#upload input[type=file] { border: none; padding: 0; }
#upload textarea { width: 100%; min-height: 80px; padding: 8px; border-radius: 6px; font-family: monospace; }
#upload-status { min-height: 1em; color: #F5C518; }
footer { margin-top: 40px; font-size: 14px; color: #eee; text-align: center; }
footer a { color: #F5C518; font-weight: 600; cursor: pointer; }
"#;

const SCRIPT: &str = r#"
const input = document.getElementById('team');
const result = document.getElementById('result');
const share = document.getElementById('share');
const datalist = document.getElementById('team-suggestions');
const csvFile = document.getElementById('csv-file');
const csvText = document.getElementById('csv-text');
const csvLoad = document.getElementById('csv-load');
const uploadStatus = document.getElementById('upload-status');

async function refreshResult() {
  const value = input.value;
  const res = await fetch('/fragment?team=' + encodeURIComponent(value));
  if (res.ok && input.value === value) { result.innerHTML = await res.text(); }
}

async function refreshTeams() {
  const res = await fetch('/api/teams?limit=1000');
  const json = await res.json();
  if (!json.success) { return; }
  datalist.replaceChildren(...json.data.map((team) => {
    const option = document.createElement('option');
    option.value = team;
    return option;
  }));
}

async function uploadTable(body) {
  if (!body.trim()) { return; }
  uploadStatus.textContent = 'Loading...';
  const res = await fetch('/api/table', { method: 'POST', headers: { 'Content-Type': 'text/csv' }, body });
  const json = await res.json().catch(() => ({}));
  if (!res.ok || !json.success) {
    uploadStatus.textContent = json.error || 'Could not read that CSV.';
    return;
  }
  uploadStatus.textContent = 'Loaded ' + json.data.rows + ' teams.';
  await refreshTeams();
  await refreshResult();
}

input.addEventListener('input', () => {
  const url = new URL(window.location);
  if (input.value) { url.searchParams.set('team', input.value); } else { url.searchParams.delete('team'); }
  window.history.replaceState({}, '', url);
  share.href = url.href;
  refreshResult();
});
share.addEventListener('click', (e) => {
  e.preventDefault();
  navigator.clipboard.writeText(window.location.href);
  alert('Link copied! Share it with your friends.');
});
csvFile.addEventListener('change', async () => {
  const file = csvFile.files[0];
  if (file) { await uploadTable(await file.text()); }
});
csvLoad.addEventListener('click', () => uploadTable(csvText.value));
"#;

/// Result panel: the doodle and its captions, or the prompt
pub fn render_fragment<R: Rng + ?Sized>(view: &DoodleView, rng: &mut R) -> String {
    match &view.selection {
        Some(sel) => format!(
            r#"{svg}
<div class="team">{team}</div>
<div class="blurb">{blurb}</div>
<div class="hair">Hair length: <code>{hair}</code></div>
<div class="streak">Date of last 5+ win streak: <strong>{streak}</strong></div>
"#,
            svg = doodle::render_svg(&sel.doodle, rng),
            team = text(&sel.team),
            blurb = text(&sel.blurb()),
            hair = text(&sel.hair_label),
            streak = text(&sel.streak_label),
        ),
        None => format!("<div class=\"prompt\">{}</div>\n", PROMPT),
    }
}

/// Full HTML document for a query
pub fn render_page<R: Rng + ?Sized>(
    directory: &TeamDirectory,
    view: &DoodleView,
    share_url: &str,
    rng: &mut R,
) -> String {
    let options: String = directory
        .teams()
        .iter()
        .take(DATALIST_LIMIT)
        .map(|team| format!("  <option value=\"{}\">\n", attr(team)))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Team Doodle</title>
<style>{style}</style>
</head>
<body>
<main>
<label for="team">Team</label>
<input id="team" placeholder="Start typing a team..." value="{query}" list="team-suggestions" autocomplete="off">
<datalist id="team-suggestions">
{options}</datalist>
<div id="result">
{fragment}</div>
<section id="upload">
<label for="csv-file">Use your own table</label>
<input id="csv-file" type="file" accept=".csv,text/csv">
<textarea id="csv-text" placeholder="...or paste CSV here (Team, ColorHex, Hair Length, StreakEndDate)"></textarea>
<button id="csv-load" type="button">Load pasted CSV</button>
<div id="upload-status"></div>
</section>
</main>
<footer>
<p>Think your club can outdo the challenge? ⚽<br>Share this and show your colours.</p>
<a id="share" href="{share}">Copy and share your hairy link</a>
</footer>
<script>{script}</script>
</body>
</html>
"#,
        style = STYLE,
        query = attr(&view.query),
        options = options,
        fragment = render_fragment(view, rng),
        share = attr(share_url),
        script = SCRIPT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{HairLength, TeamRecord};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn directory() -> TeamDirectory {
        TeamDirectory::new(vec![
            TeamRecord::new("Arsenal")
                .with_colors("#EF0107", "#FFFFFF")
                .with_hair(HairLength::Text("15".to_string())),
            TeamRecord::new("Brighton & Hove Albion"),
        ])
    }

    #[test]
    fn test_fragment_prompt_when_empty() {
        let view = DoodleView::build(&directory(), "");
        let html = render_fragment(&view, &mut StdRng::seed_from_u64(1));
        assert!(html.contains(PROMPT));
        assert!(!html.contains("<svg"));
    }

    #[test]
    fn test_fragment_with_selection() {
        let view = DoodleView::build(&directory(), "arsenal");
        let html = render_fragment(&view, &mut StdRng::seed_from_u64(1));
        assert!(html.contains("<svg"));
        assert!(html.contains(r##"fill="#EF0107""##));
        assert!(html.contains(r#"<div class="team">Arsenal</div>"#));
        assert!(html.contains("<code>15.0cm</code>"));
        assert!(html.contains("(none found)"));
    }

    #[test]
    fn test_page_escapes_query() {
        let dir = directory();
        let view = DoodleView::build(&dir, r#""><script>alert(1)</script>"#);
        let html = render_page(&dir, &view, "http://x/", &mut StdRng::seed_from_u64(1));
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains(PROMPT));
    }

    #[test]
    fn test_page_lists_teams_and_share_link() {
        let dir = directory();
        let view = DoodleView::build(&dir, "Arsenal");
        let html = render_page(&dir, &view, "http://x/?team=Arsenal", &mut StdRng::seed_from_u64(1));
        assert!(html.contains(r#"<option value="Arsenal">"#));
        assert!(html.contains(r#"<option value="Brighton &amp; Hove Albion">"#));
        assert!(html.contains(r#"href="http://x/?team=Arsenal""#));
        assert!(html.contains(r#"value="Arsenal""#));
    }

    #[test]
    fn test_page_has_csv_upload_controls() {
        let dir = directory();
        let view = DoodleView::build(&dir, "");
        let html = render_page(&dir, &view, "http://x/", &mut StdRng::seed_from_u64(1));
        assert!(html.contains(r#"<input id="csv-file" type="file" accept=".csv,text/csv">"#));
        assert!(html.contains(r#"<textarea id="csv-text""#));
        assert!(html.contains("fetch('/api/table'"));
        assert!(html.contains("/api/teams?limit="));
    }
}
