// Team Doodle - Core Library
// Exposes lookup, rendering and page modules for the CLI, TUI and web server

pub mod config;
pub mod directory;
pub mod doodle;
pub mod error;
pub mod hair;
pub mod loader;
pub mod page;
pub mod record;
pub mod share;
pub mod streak;
pub mod view;

#[cfg(feature = "server")]
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use directory::TeamDirectory;
pub use doodle::{render_svg, render_svg_with_skin, DoodleSpec, SKIN_TONES};
pub use error::TableError;
pub use hair::{hair_label, hair_length_to_px, DEFAULT_HAIR_PX};
pub use loader::{detect_format, get_parser, load_table, CsvTableParser, JsonTableParser, TableFormat, TableParser};
pub use record::{HairLength, ShirtType, TeamRecord};
pub use share::{share_url, team_from_query};
pub use view::{DoodleView, Selection};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install the tracing subscriber used by the binaries
///
/// Honours RUST_LOG; defaults to `info` for this crate.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("team_doodle=info,doodle_server=info,tower_http=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
