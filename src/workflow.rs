use crate::browser::{self, BrowserApp, BrowserConfig, ToolbarSummary};
use crate::{cli, file_scanner};
use anyhow::{Context, Result};
use glob::Pattern;
use tracing::{info, warn};

fn browser_config(cli_args: &cli::Cli) -> BrowserConfig {
    BrowserConfig {
        read_only: cli_args.read_only,
        root_type: cli_args.root_type.into(),
        multiple: !cli_args.single_select,
        check_select: cli_args.check_select,
        my_files_volume: cli_args.my_files,
    }
}

// Invalid patterns are reported and skipped rather than aborting the run.
fn compile_patterns(patterns: &[String]) -> Vec<Pattern> {
    patterns
        .iter()
        .filter_map(|s| match Pattern::new(s) {
            Ok(p) => Some(p),
            Err(e) => {
                warn!("invalid pattern '{}': {}", s, e);
                None
            }
        })
        .collect()
}

pub fn format_summary(summary: &ToolbarSummary) -> String {
    let label = if summary.label.is_empty() {
        "(none)"
    } else {
        summary.label.as_str()
    };
    format!(
        "label: {}\ndelete button: {}\nselecting: {}\ncheck-select: {}",
        label,
        if summary.delete_visible {
            "visible"
        } else {
            "hidden"
        },
        summary.selecting,
        summary.check_select
    )
}

fn run_headless_mode(mut app: BrowserApp, cli_args: &cli::Cli) -> Result<()> {
    if let Some(dir) = &cli_args.open {
        app.open_directory(dir);
    }
    let patterns = compile_patterns(&cli_args.preselect);
    if patterns.is_empty() {
        warn!("no usable --preselect patterns; reporting the empty selection");
    }
    app.select_matching(&patterns);
    println!("{}", format_summary(&app.summary()));
    Ok(())
}

fn run_interactive_mode(mut app: BrowserApp, cli_args: &cli::Cli) -> Result<()> {
    if let Some(dir) = &cli_args.open {
        app.open_directory(dir);
    }
    let patterns = compile_patterns(&cli_args.preselect);
    if !patterns.is_empty() {
        app.select_matching(&patterns);
    }
    browser::run_browser(app)
}

pub fn run_filebar(cli_args: cli::Cli) -> Result<()> {
    let volume = file_scanner::scan_volume(&cli_args.root, cli_args.include_ignored)?;
    info!(
        root = %cli_args.root.display(),
        entries = volume.len(),
        "volume scanned"
    );

    let config = browser_config(&cli_args);
    let app = BrowserApp::new(volume, &config).context("failed to set up the toolbar")?;

    if cli_args.headless {
        run_headless_mode(app, &cli_args)
    } else {
        run_interactive_mode(app, &cli_args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_patterns_are_skipped() {
        let patterns = compile_patterns(&["*.rs".to_string(), "[".to_string()]);
        assert_eq!(patterns.len(), 1);
    }

    #[test]
    fn summary_is_printed_line_by_line() {
        let text = format_summary(&ToolbarSummary {
            label: String::new(),
            delete_visible: false,
            selecting: false,
            check_select: false,
        });
        assert_eq!(
            text,
            "label: (none)\ndelete button: hidden\nselecting: false\ncheck-select: false"
        );
    }

    #[test]
    fn single_select_flag_disables_multiple_mode() {
        use clap::Parser;
        let cli_args = cli::Cli::parse_from(["filebar", "--single-select", "--read-only"]);
        let config = browser_config(&cli_args);
        assert!(!config.multiple);
        assert!(config.read_only);
    }
}
