use crate::layout::LayoutConfig;
use clap::ValueEnum;
use std::path::PathBuf;

/// Output format of the layout command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Versioned JSON document
    #[default]
    Json,
    /// Fixed-width text table
    Table,
}

/// Arguments for the layout command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct LayoutArgs {
    /// Entity input file (`-` for stdin)
    pub input: PathBuf,

    /// Output path (None = stdout)
    pub output: Option<PathBuf>,

    pub format: OutputFormat,

    /// Project name override (otherwise taken from the input or its file name)
    pub project: Option<String>,

    /// Snapshot id override (otherwise taken from the input)
    pub snapshot_id: Option<String>,

    /// Extra exclusion patterns
    pub exclude: Vec<String>,

    /// Apply the default exclusions (vendored code)
    pub default_excludes: bool,

    /// Fail on malformed paths instead of skipping them
    pub strict: bool,

    pub layout_config: LayoutConfig,

    /// Only emit this node (display path) and its subtree
    pub focus: Option<String>,

    /// Print a summary to stderr
    pub print_summary: bool,
}

impl Default for LayoutArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("-"),
            output: None,
            format: OutputFormat::Json,
            project: None,
            snapshot_id: None,
            exclude: Vec::new(),
            default_excludes: true,
            strict: false,
            layout_config: LayoutConfig::default(),
            focus: None,
            print_summary: false,
        }
    }
}
