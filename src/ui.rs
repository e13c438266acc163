use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::path::PathBuf;
use team_doodle::directory::DEFAULT_SUGGESTION_LIMIT;
use team_doodle::view::PROMPT;
use team_doodle::{render_svg, share_url, DoodleView, TeamDirectory};

pub struct App {
    pub directory: TeamDirectory,
    pub public_url: String,
    pub input: String,
    pub view: DoodleView,
    pub suggestion_state: ListState,
    pub status: Option<String>,
}

impl App {
    pub fn new(directory: TeamDirectory, public_url: String, initial: String) -> Self {
        let view = DoodleView::build(&directory, &initial);
        let mut app = Self {
            directory,
            public_url,
            input: initial,
            view,
            suggestion_state: ListState::default(),
            status: None,
        };
        app.reset_selection();
        app
    }

    fn refresh(&mut self) {
        self.view = DoodleView::build(&self.directory, &self.input);
        self.reset_selection();
    }

    fn reset_selection(&mut self) {
        if self.view.suggestions.is_empty() {
            self.suggestion_state.select(None);
        } else {
            self.suggestion_state.select(Some(0));
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
        self.status = None;
        self.refresh();
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
        self.status = None;
        self.refresh();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.status = None;
        self.refresh();
    }

    pub fn next(&mut self) {
        let len = self.view.suggestions.len();
        if len == 0 {
            return;
        }
        let i = match self.suggestion_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.suggestion_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.view.suggestions.len();
        if len == 0 {
            return;
        }
        let i = match self.suggestion_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.suggestion_state.select(Some(i));
    }

    /// Replace the input with the highlighted suggestion
    pub fn accept_suggestion(&mut self) {
        let picked = self
            .suggestion_state
            .selected()
            .and_then(|i| self.view.suggestions.get(i))
            .cloned();
        if let Some(team) = picked {
            self.input = team;
            self.status = None;
            self.refresh();
        }
    }

    pub fn share_link(&self) -> String {
        share_url(&self.public_url, &self.input)
    }

    /// Write the current doodle to `<team>.svg` in the working directory
    pub fn save_svg(&mut self) {
        let Some(selection) = &self.view.selection else {
            self.status = Some("Nothing to save - pick a team first".to_string());
            return;
        };

        let filename: String = selection
            .team
            .chars()
            .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .collect();
        let path = PathBuf::from(format!("{}.svg", filename));
        let svg = render_svg(&selection.doodle, &mut rand::thread_rng());

        self.status = Some(match std::fs::write(&path, svg) {
            Ok(()) => format!("Saved {}", path.display()),
            Err(e) => format!("Could not save {}: {}", path.display(), e),
        });
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
            match key.code {
                KeyCode::Esc => return Ok(()),
                KeyCode::Char('c') if ctrl => return Ok(()),
                KeyCode::Char('s') if ctrl => app.save_svg(),
                KeyCode::Char('u') if ctrl => app.clear_input(),
                KeyCode::Char(c) => app.push_char(c),
                KeyCode::Backspace => app.pop_char(),
                KeyCode::Down => app.next(),
                KeyCode::Up => app.previous(),
                KeyCode::Tab | KeyCode::Enter => app.accept_suggestion(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Input
            Constraint::Min(0),    // Suggestions + result
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_input(f, chunks[0], app);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[1]);

    render_suggestions(f, content[0], app);
    render_result(f, content[1], app);
    render_status_bar(f, chunks[2], app);
}

fn render_input(f: &mut Frame, area: Rect, app: &App) {
    let input = Paragraph::new(Line::from(vec![
        Span::raw(app.input.as_str()),
        Span::styled("▏", Style::default().fg(Color::Yellow)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Team "),
    );
    f.render_widget(input, area);
}

fn render_suggestions(f: &mut Frame, area: Rect, app: &mut App) {
    let items: Vec<ListItem> = app
        .view
        .suggestions
        .iter()
        .map(|t| ListItem::new(t.as_str()))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" Suggestions (max {}) ", DEFAULT_SUGGESTION_LIMIT)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("→ ");

    f.render_stateful_widget(list, area, &mut app.suggestion_state);
}

fn render_result(f: &mut Frame, area: Rect, app: &App) {
    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

    let content = match &app.view.selection {
        Some(sel) => {
            let mut lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("  {}", sel.team),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("  {}", sel.blurb()),
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
                )),
                Line::from(""),
            ];
            lines.extend(mini_doodle(&sel.shirt_color, &sel.alt_color, sel.hair_px));
            lines.extend([
                Line::from(""),
                Line::from(vec![Span::styled("  Hair length: ", label), Span::raw(sel.hair_label.clone())]),
                Line::from(vec![
                    Span::styled("  Drawn hair: ", label),
                    Span::raw(format!("{}px", sel.hair_px)),
                ]),
                Line::from(vec![
                    Span::styled("  Shirt: ", label),
                    Span::raw(format!("{} {}", sel.shirt_type, sel.shirt_color)),
                ]),
                Line::from(vec![
                    Span::styled("  Date of last 5+ win streak: ", label),
                    Span::raw(sel.streak_label.clone()),
                ]),
                Line::from(""),
                Line::from(vec![
                    Span::styled("  Share: ", label),
                    Span::styled(app.share_link(), Style::default().fg(Color::Green)),
                ]),
            ]);
            lines
        }
        None => vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  {}", PROMPT),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )),
        ],
    };

    let panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Doodle "),
    );
    f.render_widget(panel, area);
}

/// Rough terminal preview: one hair row per 5px, capped at 8 rows
fn mini_doodle(shirt: &str, alt: &str, hair_px: i32) -> Vec<Line<'static>> {
    let shirt = Style::default().fg(hex_color(shirt).unwrap_or(Color::Gray));
    let shorts = Style::default().fg(hex_color(alt).unwrap_or(Color::White));
    let hair = Style::default().fg(Color::Rgb(0x2F, 0x1B, 0x0C));
    let skin = Style::default().fg(Color::Rgb(0xE0, 0xAC, 0x69));

    let hair_rows = (hair_px.max(2) / 5).clamp(1, 8);
    let mut lines: Vec<Line<'static>> = (0..hair_rows)
        .map(|_| Line::from(Span::styled("      ||||||||", hair)))
        .collect();

    lines.extend([
        Line::from(Span::styled("     (  o  o  )", skin)),
        Line::from(Span::styled("      \\  __  /", skin)),
        Line::from(Span::styled("    ▐██████████▌", shirt)),
        Line::from(Span::styled("    ▐██████████▌", shirt)),
        Line::from(Span::styled("      ████████", shorts)),
        Line::from(Span::styled("       ██  ██", skin)),
    ]);
    lines
}

/// Parse `#RGB` / `#RRGGBB`
fn hex_color(hex: &str) -> Option<Color> {
    let digits = hex.trim().strip_prefix('#')?;
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return None,
    };
    let value = u32::from_str_radix(&expanded, 16).ok()?;
    Some(Color::Rgb((value >> 16) as u8, (value >> 8) as u8, value as u8))
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        format!(" Teams: {} ", app.directory.len()),
        Style::default().fg(Color::Cyan),
    )];

    if let Some(status) = &app.status {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(status.clone(), Style::default().fg(Color::Green)));
    }

    spans.push(Span::raw(" | "));
    spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
    spans.push(Span::raw(" Pick | "));
    spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
    spans.push(Span::raw(" Accept | "));
    spans.push(Span::styled("Ctrl+S", Style::default().fg(Color::Yellow)));
    spans.push(Span::raw(" Save SVG | "));
    spans.push(Span::styled("Ctrl+U", Style::default().fg(Color::Yellow)));
    spans.push(Span::raw(" Clear | "));
    spans.push(Span::styled("Esc", Style::default().fg(Color::Red)));
    spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );
    f.render_widget(status_bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use team_doodle::{HairLength, TeamRecord};

    fn app(initial: &str) -> App {
        let directory = TeamDirectory::new(vec![
            TeamRecord::new("Arsenal").with_hair(HairLength::Text("15".to_string())),
            TeamRecord::new("Aston Villa"),
            TeamRecord::new("Chelsea"),
        ]);
        App::new(directory, "http://x/".to_string(), initial.to_string())
    }

    #[test]
    fn test_typing_selects_team() {
        let mut app = app("");
        assert!(app.view.selection.is_none());
        for c in "arsenal".chars() {
            app.push_char(c);
        }
        assert_eq!(app.view.selection.as_ref().unwrap().hair_px, 15);
        assert_eq!(app.share_link(), "http://x/?team=arsenal");
    }

    #[test]
    fn test_accept_suggestion() {
        let mut app = app("a");
        assert_eq!(app.view.suggestions, vec!["Arsenal", "Aston Villa", "Chelsea"]);
        app.next();
        app.accept_suggestion();
        assert_eq!(app.input, "Aston Villa");
        assert!(app.view.selection.is_some());
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = app("");
        app.previous();
        assert_eq!(app.suggestion_state.selected(), Some(2));
        app.next();
        assert_eq!(app.suggestion_state.selected(), Some(0));
    }

    #[test]
    fn test_backspace_and_clear() {
        let mut app = app("Chelsea");
        assert!(app.view.selection.is_some());
        app.pop_char();
        assert!(app.view.selection.is_none());
        app.clear_input();
        assert_eq!(app.input, "");
    }

    #[test]
    fn test_save_without_selection() {
        let mut app = app("");
        app.save_svg();
        assert!(app.status.unwrap().contains("Nothing to save"));
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color("#EF0107"), Some(Color::Rgb(0xEF, 0x01, 0x07)));
        assert_eq!(hex_color("#fff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(hex_color("red"), None);
    }

    #[test]
    fn test_mini_doodle_hair_rows() {
        assert_eq!(mini_doodle("#000", "#fff", 40).len(), 8 + 6);
        assert_eq!(mini_doodle("#000", "#fff", 0).len(), 1 + 6);
    }
}
