mod render;

use std::env;
use std::fs::File;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use rtf2rtf_core::{FormatConfig, format_stream};

use crate::render::{Format, StderrReporter};

const USAGE: &str = "usage: rtf2rtf [FILE | -]";

/// Page size override, in bytes.
const PAGE_SIZE_VAR: &str = "RTF2RTF_PAGE_SIZE";
/// Diagnostics format: `pretty` or `json`.
const DIAGNOSTICS_VAR: &str = "RTF2RTF_DIAGNOSTICS";

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "rtf2rtf",
    about = "Reformat an RTF document: one control word or text run per line, hex escapes decoded to UTF-8",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// Input file. Reads standard input when omitted or `-`.
    file: Option<String>,
}

fn main() -> ExitCode {
    let Some(cli) = parse_args() else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("rtf2rtf: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Any option, `--` included, is a usage error; only `-` may start with a dash.
fn parse_args() -> Option<Cli> {
    if env::args_os().nth(1).is_some_and(|arg| arg.as_os_str() == "--") {
        return None;
    }
    Cli::try_parse().ok()
}

fn run(cli: &Cli) -> Result<()> {
    let config = page_config()?;
    let format = Format::from_setting(env_setting(DIAGNOSTICS_VAR)?.as_deref())
        .with_context(|| format!("invalid {DIAGNOSTICS_VAR}"))?;
    let mut reporter = StderrReporter::new(format);

    let input: Box<dyn Read> = match cli.file.as_deref() {
        None | Some("-") => Box::new(io::stdin().lock()),
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("{path}: cannot open for reading"))?,
        ),
    };

    let mut stdout = format_stream(input, io::stdout().lock(), &config, &mut reporter)
        .context("cannot write to standard output")?;
    stdout
        .flush()
        .context("cannot write to standard output")?;
    reporter.finish();
    Ok(())
}

// ── Environment configuration ───────────────────────────────────────────

fn env_setting(name: &str) -> Result<Option<String>> {
    match env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e).with_context(|| format!("invalid {name}")),
    }
}

fn page_config() -> Result<FormatConfig> {
    let Some(value) = env_setting(PAGE_SIZE_VAR)? else {
        return Ok(FormatConfig::default());
    };
    let size: usize = value
        .trim()
        .parse()
        .with_context(|| format!("invalid {PAGE_SIZE_VAR} '{value}'"))?;
    FormatConfig::with_page_size(size).with_context(|| format!("invalid {PAGE_SIZE_VAR}"))
}
