//! Common CLI types

/// Output format options
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - colored counts and per-status org lists
    #[default]
    Pretty,
    /// Table format - one row per organization
    Table,
    /// JSON format - structured for scripts
    Json,
}
