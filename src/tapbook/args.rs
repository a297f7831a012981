use clap::{Parser, Subcommand, ValueEnum};
use tapbook::commands::MoveDirection;
use tapbook::model::Orientation;

/// Version string: plain for releases, `version@hash date` for dev builds.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "tapbook", version = get_version())]
#[command(about = "Author and play talking picture books", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Book document to operate on (default: ./book.json)
    #[arg(short, long, global = true)]
    pub book: Option<std::path::PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a starter book document
    Init,

    /// List the book's pages in order
    #[command(alias = "ls")]
    Pages,

    /// Show one page in detail (defaults to the first page)
    Show { page: Option<String> },

    /// Append a new page
    AddPage,

    /// Remove a page (the last page cannot be removed)
    RemovePage { page: String },

    /// Rename a page
    RenamePage { from: String, to: String },

    /// Add a button to a page
    AddButton {
        page: String,

        /// Horizontal position, 0.0 (left) to 1.0 (right)
        #[arg(short, long, default_value_t = 0.5)]
        x: f64,

        /// Vertical position, 0.0 (top) to 1.0 (bottom)
        #[arg(short, long, default_value_t = 0.5)]
        y: f64,
    },

    /// Delete a button from a page
    DeleteButton { page: String, index: usize },

    /// Swap a button with its neighbor in the page's button order
    MoveButton {
        page: String,
        index: usize,
        #[arg(value_enum)]
        direction: Direction,
    },

    /// Reposition a button on its page
    PlaceButton {
        page: String,
        index: usize,
        x: f64,
        y: f64,
    },

    /// Set or clear a button's audio override URL
    Override {
        page: String,
        index: usize,

        /// Override URL
        #[arg(required_unless_present = "clear")]
        value: Option<String>,

        /// Remove the override so the button falls back to the sequence
        #[arg(long, conflicts_with = "value")]
        clear: bool,
    },

    /// Replace a page's sequence (comma-separated pool indices)
    Sequence { page: String, entries: String },

    /// Remove every button from a page
    ClearButtons { page: String },

    /// Inspect or replace the book-wide audio pool
    Pool {
        #[command(subcommand)]
        action: PoolAction,
    },

    /// Set a page's background image and orientation
    Image {
        page: String,

        /// Image path or URL
        #[arg(long)]
        path: Option<String>,

        #[arg(long, value_enum)]
        orientation: Option<OrientationArg>,
    },

    /// Resolve one button to its media URL
    Resolve { page: String, index: usize },

    /// List the media a player should prefetch for a page
    Plan { page: Option<String> },

    /// Play a page's buttons in order (or a single button)
    Play {
        page: Option<String>,

        /// Play just this button instead of the whole page
        #[arg(long)]
        button: Option<usize>,

        /// Pause between buttons in milliseconds
        #[arg(long, default_value_t = 500)]
        delay_ms: u64,
    },

    /// Write a timestamped copy of the book document
    Backup,
}

#[derive(Subcommand, Debug)]
pub enum PoolAction {
    /// Print the pool with its indices
    List,
    /// Replace the pool (comma- or newline-separated file list)
    Set { files: String },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum Direction {
    Up,
    Down,
}

impl From<Direction> for MoveDirection {
    fn from(d: Direction) -> Self {
        match d {
            Direction::Up => MoveDirection::Up,
            Direction::Down => MoveDirection::Down,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum OrientationArg {
    Portrait,
    Landscape,
}

impl From<OrientationArg> for Orientation {
    fn from(o: OrientationArg) -> Self {
        match o {
            OrientationArg::Portrait => Orientation::Portrait,
            OrientationArg::Landscape => Orientation::Landscape,
        }
    }
}
