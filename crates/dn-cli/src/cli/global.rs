use clap::ValueEnum;

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// Compact single-line JSON.
    Raw,
}

/// Flags command handlers read. `--quiet`/`--verbose` only shape logging and
/// are consumed in `main`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlobalFlags {
    pub format: OutputFormat,
}
