// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use team_doodle::directory::DEFAULT_SUGGESTION_LIMIT;
use team_doodle::{render_svg, share_url, Config, DoodleView, TeamDirectory};

#[derive(Parser)]
#[command(name = "team-doodle", version, about = "How long would your hair be if you only cut it after a 5-win streak?")]
struct Cli {
    /// JSON or CSV team table (overrides DOODLE_DATA)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Render a team's doodle as SVG
    Render {
        team: String,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Seed for the skin tone
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print a team's record and derived values as JSON
    Lookup { team: String },
    /// List team names matching a query
    Teams {
        query: Option<String>,
        #[arg(short, long, default_value_t = DEFAULT_SUGGESTION_LIMIT)]
        limit: usize,
    },
    /// Print the shareable link for a team
    Link {
        team: String,
        /// Base URL (overrides DOODLE_PUBLIC_URL)
        #[arg(long)]
        base: Option<String>,
    },
    /// Interactive terminal UI (default)
    Ui {
        /// Pre-fill the input
        team: Option<String>,
    },
}

fn main() -> Result<()> {
    team_doodle::init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env().with_data_path(cli.data);
    let directory = config.load_directory()?;

    match cli.command.unwrap_or(Command::Ui { team: None }) {
        Command::Render { team, out, seed } => run_render(&directory, &team, out, seed),
        Command::Lookup { team } => run_lookup(&directory, &team),
        Command::Teams { query, limit } => {
            for name in directory.suggestions(query.as_deref().unwrap_or(""), limit) {
                println!("{}", name);
            }
            Ok(())
        }
        Command::Link { team, base } => {
            let base = base.unwrap_or(config.public_url);
            println!("{}", share_url(&base, &team));
            Ok(())
        }
        Command::Ui { team } => run_ui_mode(directory, config.public_url, team.unwrap_or_default()),
    }
}

fn run_render(directory: &TeamDirectory, team: &str, out: Option<PathBuf>, seed: Option<u64>) -> Result<()> {
    let view = DoodleView::build(directory, team);
    let Some(selection) = view.selection else {
        bail!("Team not found: {}", team);
    };

    let svg = match seed {
        Some(seed) => render_svg(&selection.doodle, &mut StdRng::seed_from_u64(seed)),
        None => render_svg(&selection.doodle, &mut rand::thread_rng()),
    };

    match out {
        Some(path) => {
            std::fs::write(&path, svg).with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✓ Saved {} doodle to {}", selection.team, path.display());
        }
        None => println!("{}", svg),
    }

    Ok(())
}

fn run_lookup(directory: &TeamDirectory, team: &str) -> Result<()> {
    let record = directory
        .lookup(team)
        .with_context(|| format!("Team not found: {}", team))?;
    let view = DoodleView::build(directory, team);

    let output = serde_json::json!({
        "record": record,
        "view": view.selection,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(directory: TeamDirectory, public_url: String, team: String) -> Result<()> {
    let mut app = ui::App::new(directory, public_url, team);
    ui::run_ui(&mut app)
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_directory: TeamDirectory, _public_url: String, _team: String) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use the web UI: cargo run --bin doodle-server --features server");
    std::process::exit(1);
}
