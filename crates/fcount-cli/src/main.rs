//! fcount — count files, grouped by extension, in a directory.
//!
//! This binary parses the command line, runs one scan through
//! `fcount-core`, and renders the result. Results go to stdout;
//! logging and warnings go to stderr.

mod args;
mod render;

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fcount_core::{
    group_extensions, is_text_extension, probe_file_utility, reduce_frequency, reduce_matches,
    reduce_total, walk, Config, ExtensionSpec, FileFilter, NamePattern, Policy, PreviewStrategy,
    Previewer, ProbeOutcome, ScanError, Walker,
};

use crate::args::Cli;
use crate::render::ScanKind;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.supported_types {
        print!("{}", render::supported_types_message());
        return Ok(());
    }

    let config = match cli.config.as_deref() {
        Some(path) => Config::load(path)
            .with_context(|| format!("could not load config {}", path.display()))?,
        None => Config::default(),
    };

    let location = match &cli.path {
        Some(path) => path.clone(),
        None => std::env::current_dir().context("could not determine the current directory")?,
    };
    tracing::debug!(location = %location.display(), "resolved scan root");

    let policy_for = |filter: FileFilter| Policy {
        recursive: !cli.no_recursion,
        include_hidden: cli.all,
        case_sensitive: cli.case_sensitive,
        filter,
    };

    // --total: count files matching an extension filter.
    if let Some(raw) = cli.total.as_deref() {
        let policy = policy_for(FileFilter::Extension(ExtensionSpec::parse(raw)));
        let mut walker = walk(&location, &policy)?;

        announce(ScanKind::Total(raw), &policy, &location);
        let total = reduce_total(&mut walker, cli.total_size, cli.show_folders);
        print!("{}", render::total_report(&total));

        report_warnings(&walker);
        return Ok(());
    }

    // --filename-match: list files whose name matches a glob.
    if let Some(pattern_text) = cli.pattern.as_deref() {
        let pattern = NamePattern::new(pattern_text, cli.case_sensitive)?;
        let policy = policy_for(FileFilter::Pattern(pattern));
        let mut walker = walk(&location, &policy)?;
        let previewer = make_previewer(&cli, &config, &location)?;

        announce(ScanKind::PatternSearch(pattern_text), &policy, &location);
        let list = reduce_matches(&mut walker, cli.file_sizes, previewer.as_ref());
        print!("{}", render::match_list_report(&list, cli.file_sizes));

        report_warnings(&walker);
        return Ok(());
    }

    // --file-extension: list files matching an extension filter.
    if let Some(raw) = cli.file_extension.as_deref() {
        let spec = ExtensionSpec::parse(raw);
        let policy = policy_for(FileFilter::Extension(spec.clone()));
        let mut walker = walk(&location, &policy)?;
        let previewer = make_previewer(&cli, &config, &location)?;

        // Extension-based previews require the filter to name a
        // text-allow-listed extension (or the any-extension sentinel).
        if let Some(p) = &previewer {
            if matches!(p.strategy(), PreviewStrategy::ExtensionList) {
                match &spec {
                    ExtensionSpec::NoExtension => bail_unsupported_preview(raw)?,
                    ExtensionSpec::Concrete(ext) if !is_text_extension(ext) => {
                        bail_unsupported_preview(raw)?
                    }
                    _ => {}
                }
            }
        }

        announce(ScanKind::ExtensionSearch(raw), &policy, &location);
        let list = reduce_matches(&mut walker, cli.file_sizes, previewer.as_ref());
        print!("{}", render::match_list_report(&list, cli.file_sizes));

        report_warnings(&walker);
        return Ok(());
    }

    // Default mode: frequency table over every file.
    let policy = policy_for(FileFilter::Extension(ExtensionSpec::Any));
    let mut walker = walk(&location, &policy)?;

    announce(ScanKind::Frequency, &policy, &location);
    let table = reduce_frequency(&mut walker);

    if table.is_empty() {
        println!("No files were found in the specified directory.");
        report_warnings(&walker);
        return Ok(());
    }

    let rows = if cli.sort_alpha {
        table.alphabetical()
    } else {
        table.by_frequency()
    };

    if cli.group {
        let grouped = group_extensions(&rows, &config.group_map());
        print!("{}", render::grouped_table(&grouped));
        println!();
        println!("  Found {} file(s).", table.total());
    } else {
        print!("{}", render::two_column_table(&rows, table.total()));
    }

    report_warnings(&walker);
    Ok(())
}

fn announce(kind: ScanKind<'_>, policy: &Policy, location: &Path) {
    println!(
        "{}",
        render::start_message(
            kind,
            policy.recursive,
            policy.include_hidden,
            policy.case_sensitive,
            location,
        )
    );
    println!();
}

/// Builds the previewer when `--preview` is active.
///
/// With `--shell-command file` the utility is probed first; an unusable
/// utility is a fatal error, not a downgrade to extension previews.
fn make_previewer(cli: &Cli, config: &Config, location: &Path) -> anyhow::Result<Option<Previewer>> {
    if !cli.preview {
        return Ok(None);
    }
    let max_chars = cli.preview_size.unwrap_or(config.preview.max_chars);
    let strategy = if cli.shell_command.is_some() {
        match probe_file_utility(location) {
            ProbeOutcome::Ok => PreviewStrategy::FileUtility,
            ProbeOutcome::Unavailable(reason) => {
                return Err(ScanError::FileUtilityUnavailable(reason).into());
            }
        }
    } else {
        PreviewStrategy::ExtensionList
    };
    Ok(Some(Previewer::new(strategy, max_chars)))
}

fn bail_unsupported_preview(raw: &str) -> anyhow::Result<()> {
    Err(ScanError::PreviewNotSupported).with_context(|| {
        format!(
            "no text preview for extension '{raw}'; run with --supported-types \
             to see the allow-list, or add --shell-command file to classify by content"
        )
    })
}

fn report_warnings(walker: &Walker) {
    if let Some(summary) = render::warning_summary(walker.warnings()) {
        eprintln!();
        eprint!("{summary}");
    }
}
