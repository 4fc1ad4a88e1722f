use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::toolbar::RootType;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootTypeArg {
    Downloads,
    Drive,
    Removable,
    Archive,
    Recent,
}

impl From<RootTypeArg> for RootType {
    fn from(arg: RootTypeArg) -> Self {
        match arg {
            RootTypeArg::Downloads => RootType::Downloads,
            RootTypeArg::Drive => RootType::Drive,
            RootTypeArg::Removable => RootType::Removable,
            RootTypeArg::Archive => RootType::Archive,
            RootTypeArg::Recent => RootType::Recent,
        }
    }
}

/// filebar – browse a directory with a selection-aware toolbar
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Volume root to browse (defaults to CWD)
    #[arg(value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Include files ignored by .gitignore
    #[arg(long)]
    pub include_ignored: bool,

    /// Treat the volume as read-only
    #[arg(long)]
    pub read_only: bool,

    /// Kind of volume the root is mounted as
    #[arg(long, value_enum, default_value_t = RootTypeArg::Downloads)]
    pub root_type: RootTypeArg,

    /// Enable the unified "My files" volume (protects its Downloads folder)
    #[arg(long)]
    pub my_files: bool,

    /// Allow only one selected entry at a time
    #[arg(long)]
    pub single_select: bool,

    /// Start with checkboxes shown on every row
    #[arg(long)]
    pub check_select: bool,

    /// Glob patterns to preselect entries, relative to the root.
    /// Can be specified multiple times using --preselect <PATTERN_1> --preselect <PATTERN_2> ...
    #[arg(long, value_name = "PATTERN")]
    pub preselect: Vec<String>,

    /// Directory (relative to the root) to open before preselecting
    #[arg(long, value_name = "DIR")]
    pub open: Option<String>,

    /// Print the toolbar state for --preselect and exit without TUI.
    #[arg(long)]
    pub headless: bool,

    /// Write logs to this file (interactive mode logs nowhere otherwise)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
