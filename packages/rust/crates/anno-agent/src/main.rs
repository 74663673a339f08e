//! code-annotation CLI: annotate, replace, or check.
//!
//! Settings from `packages/conf/settings.yaml` and
//! `<PRJ_CONFIG_HOME>/code-annotation/settings.yaml`. Override the config
//! home with `--conf <dir>`.
//!
//! Logging: set `RUST_LOG=code_annotation=debug,anno_edit=debug` (or pass
//! `--verbose`) to see per-file logs on stderr.

mod cli;

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use anno_agent::{
    CachedGenerator, CodeAnnotationSettings, LlmConfig, LlmGenerator, load_settings,
    set_config_home_override,
};
use anno_edit::{
    AnnotateConfig, AnnotateStats, Generator, MergeConfig, TransformationRequest, Verdict,
    annotate_tree, explain, merge_tree,
};
use anno_io::read_text_safe;

use crate::cli::{AnnotateArgs, CheckArgs, Cli, Command, ReplaceArgs};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Some(conf_dir) = cli.conf.clone() {
        set_config_home_override(conf_dir);
    }

    // Initialize tracing: RUST_LOG overrides; --verbose => debug; else info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "code_annotation=debug,anno_agent=debug,anno_edit=debug"
        } else {
            "code_annotation=info,anno_agent=info,anno_edit=info"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let settings = load_settings();

    match cli.command {
        Command::Annotate(args) => run_annotate(args, &settings),
        Command::Replace(args) => run_replace(&args),
        Command::Check(args) => run_check(&args, &settings),
    }
}

fn run_annotate(args: AnnotateArgs, settings: &CodeAnnotationSettings) -> anyhow::Result<()> {
    let generator_settings = &settings.generator;
    let llm_config = LlmConfig {
        inference_url: args
            .inference_url
            .unwrap_or_else(|| generator_settings.inference_url()),
        model: args.model_name.unwrap_or_else(|| generator_settings.model()),
        temperature: args
            .temperature
            .unwrap_or_else(|| generator_settings.temperature()),
        api_key: generator_settings.api_key(),
        timeout: Duration::from_secs(generator_settings.timeout_secs()),
    };
    if llm_config.api_key.is_none() {
        tracing::warn!("no API key configured (settings generator.api_key or OPENAI_API_KEY)");
    }

    let request = TransformationRequest {
        types: !args.no_types,
        docs: !args.no_docs,
        comments: args.comments,
        format: args.format,
        delete: args.delete,
        instruction: args.instruction,
    };
    let config = AnnotateConfig {
        recursive: args.recursive,
        include_artifacts: args.include_artifacts,
        max_file_size: settings.files.max_file_size(),
    };

    let model = llm_config.model.clone();
    let temperature = llm_config.temperature;
    let llm = LlmGenerator::new(llm_config).context("failed to initialise LLM generator")?;
    let generator: Box<dyn Generator> = if args.no_cache {
        Box::new(llm)
    } else {
        let cache_path = args
            .cache_path
            .unwrap_or_else(|| generator_settings.cache_path());
        tracing::debug!(path = %cache_path.display(), "completion cache enabled");
        Box::new(CachedGenerator::new(llm, cache_path, model, temperature))
    };

    let stats = annotate_tree(&args.path, &request, &config, generator.as_ref())
        .with_context(|| format!("annotation of {} aborted", args.path.display()))?;
    print_annotate_summary(&stats);
    Ok(())
}

fn print_annotate_summary(stats: &AnnotateStats) {
    for file in &stats.files {
        println!("{:<6} {}", file.verdict, file.artifact.display());
    }
    for path in &stats.skipped_unreadable {
        println!("{:<6} {}", "skip", path.display());
    }
    println!(
        "annotated {} file(s): {} safe, {} unsafe, {} artifact(s) skipped, {} unreadable",
        stats.annotated(),
        stats.count(Verdict::Safe),
        stats.count(Verdict::Unsafe),
        stats.skipped_artifacts,
        stats.skipped_unreadable.len()
    );
}

fn run_replace(args: &ReplaceArgs) -> anyhow::Result<()> {
    let config = MergeConfig {
        recursive: args.recursive,
        exclude_safe: args.exclude_safe,
        exclude_unsafe: args.exclude_unsafe,
    };
    let stats = merge_tree(&args.path, &config)
        .with_context(|| format!("merge of {} aborted", args.path.display()))?;

    for merged in &stats.merged {
        if let Some(winner) = merged.winner() {
            println!("{winner:<6} {}", merged.original.display());
        }
    }
    println!(
        "merged {} of {} file(s)",
        stats.merged.len(),
        stats.files_scanned
    );
    Ok(())
}

fn run_check(args: &CheckArgs, settings: &CodeAnnotationSettings) -> anyhow::Result<()> {
    let limit = settings.files.max_file_size();
    let original = read_text_safe(&args.original, limit)
        .with_context(|| format!("cannot read {}", args.original.display()))?;
    let candidate = read_text_safe(&args.candidate, limit)
        .with_context(|| format!("cannot read {}", args.candidate.display()))?;

    let explanation = explain(&original, &candidate);
    match (&explanation.reason, args.diff) {
        (Some(reason), false) => println!("{}: {reason}", explanation.verdict),
        (None, _) => println!("{}", explanation.verdict),
        (Some(_), true) => println!("{explanation}"),
    }
    Ok(())
}
