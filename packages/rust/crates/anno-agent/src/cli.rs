use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "code-annotation")]
#[command(
    about = "Annotate Python code with an LLM, tag each rewrite safe or unsafe, and merge the results back."
)]
pub(crate) struct Cli {
    /// Override config directory (settings at <DIR>/code-annotation/settings.yaml).
    #[arg(long, global = true)]
    pub(crate) conf: Option<PathBuf>,

    /// Debug logging (RUST_LOG still wins).
    #[arg(long, short, global = true)]
    pub(crate) verbose: bool,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Write `safe.<name>` / `unsafe.<name>` rewrites next to every Python file.
    Annotate(AnnotateArgs),
    /// Overwrite originals with their artifacts (unsafe first, safe last) and delete them.
    Replace(ReplaceArgs),
    /// Compare two Python files and print the verdict.
    Check(CheckArgs),
}

#[derive(Args)]
pub(crate) struct AnnotateArgs {
    /// File or directory to annotate.
    pub(crate) path: PathBuf,

    /// Also annotate files in sub directories.
    #[arg(long, short)]
    pub(crate) recursive: bool,

    /// Do not ask for type annotations.
    #[arg(long)]
    pub(crate) no_types: bool,

    /// Do not ask for docstrings.
    #[arg(long)]
    pub(crate) no_docs: bool,

    /// Ask for comments.
    #[arg(long)]
    pub(crate) comments: bool,

    /// Ask for better formatting.
    #[arg(long)]
    pub(crate) format: bool,

    /// Remove annotations instead of adding them.
    #[arg(long)]
    pub(crate) delete: bool,

    /// Extra instruction for the model.
    #[arg(long)]
    pub(crate) instruction: Option<String>,

    /// Annotate existing `safe.`/`unsafe.` files too.
    #[arg(long)]
    pub(crate) include_artifacts: bool,

    /// Model name (default from settings).
    #[arg(long)]
    pub(crate) model_name: Option<String>,

    /// Sampling temperature (default from settings).
    #[arg(long)]
    pub(crate) temperature: Option<f32>,

    /// Completion cache directory (default from settings).
    #[arg(long)]
    pub(crate) cache_path: Option<PathBuf>,

    /// Always query the model.
    #[arg(long)]
    pub(crate) no_cache: bool,

    /// Chat-completions endpoint (default from settings).
    #[arg(long)]
    pub(crate) inference_url: Option<String>,
}

#[derive(Args)]
pub(crate) struct ReplaceArgs {
    /// File or directory to merge.
    pub(crate) path: PathBuf,

    /// Also merge files in sub directories.
    #[arg(long, short)]
    pub(crate) recursive: bool,

    /// Leave `safe.` artifacts in place.
    #[arg(long)]
    pub(crate) exclude_safe: bool,

    /// Leave `unsafe.` artifacts in place.
    #[arg(long)]
    pub(crate) exclude_unsafe: bool,
}

#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Original file.
    pub(crate) original: PathBuf,

    /// Candidate rewrite.
    pub(crate) candidate: PathBuf,

    /// Print a diff of the normalized trees when they differ.
    #[arg(long)]
    pub(crate) diff: bool,
}
