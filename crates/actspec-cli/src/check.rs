//! # Check Subcommand
//!
//! Replays a stream of JSON actions (one per line) through the validating
//! middleware compiled from a manifest, the same way a host's dispatch
//! pipeline would see them. Every action the middleware reports is listed
//! with its line number; the summary decides the exit status.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde_json::Value;

use actspec_core::{ActionFormat, JsonFormat};
use actspec_schema::{Manifest, MiddlewareOptions, TracingReporter, Verdict};

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the schema manifest (YAML, or JSON with a `.json` extension).
    pub manifest: PathBuf,

    /// File of JSON actions, one per line. Reads stdin when omitted or `-`.
    #[arg(long)]
    pub actions: Option<PathBuf>,

    /// Evaluate payload testers instead of only checking the action type.
    #[arg(long)]
    pub check_payloads: bool,

    /// Additional action type to exempt from validation (repeatable).
    #[arg(long = "ignore", value_name = "TYPE")]
    pub ignore: Vec<String>,
}

/// Counts of verdicts over one action stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckSummary {
    /// Actions read.
    pub total: usize,
    /// Actions with a registered type (and valid payload, if checked).
    pub accepted: usize,
    /// Actions on the ignore list.
    pub ignored: usize,
    /// Registered actions whose payload failed its tester.
    pub rejected: usize,
    /// Actions of an unregistered type.
    pub unknown: usize,
}

impl CheckSummary {
    /// Returns true if nothing was reported.
    pub fn is_clean(&self) -> bool {
        self.rejected == 0 && self.unknown == 0
    }

    fn record(&mut self, verdict: Verdict) {
        self.total += 1;
        match verdict {
            Verdict::Accepted => self.accepted += 1,
            Verdict::Ignored => self.ignored += 1,
            Verdict::Rejected => self.rejected += 1,
            Verdict::Unknown => self.unknown += 1,
        }
    }
}

/// Open the action stream named by the arguments.
pub fn open_input(args: &CheckArgs) -> anyhow::Result<Box<dyn BufRead>> {
    match &args.actions {
        Some(path) if path.as_os_str() != "-" => {
            let file = File::open(path)
                .with_context(|| format!("opening actions file {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

/// Check every action in `input`, writing reported actions and a summary
/// to `out`.
///
/// Blank lines are skipped. A line that is not valid JSON aborts the run.
pub fn run(
    args: &CheckArgs,
    input: impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<CheckSummary> {
    let manifest = Manifest::from_path(&args.manifest)
        .with_context(|| format!("loading {}", args.manifest.display()))?;
    let schema = manifest.compile_with(JsonFormat)?;

    let mut options =
        MiddlewareOptions::new(TracingReporter).check_payloads(args.check_payloads);
    for action_type in &args.ignore {
        options = options.ignore(action_type.clone());
    }
    let middleware = schema.create_middleware(options);

    let mut summary = CheckSummary::default();
    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("reading line {line_no}"))?;
        if line.trim().is_empty() {
            continue;
        }
        let action: Value = serde_json::from_str(&line)
            .with_context(|| format!("line {line_no}: invalid JSON"))?;

        let verdict = middleware.observe(&action);
        if verdict.is_reported() {
            let action_type = JsonFormat.unformat(&action).action_type;
            writeln!(out, "line {line_no}: {verdict:?} {action_type}")?;
        }
        summary.record(verdict);
    }

    tracing::debug!(?summary, "checked action stream");
    writeln!(
        out,
        "{} actions: {} accepted, {} ignored, {} rejected, {} unknown",
        summary.total, summary.accepted, summary.ignored, summary.rejected, summary.unknown
    )?;
    Ok(summary)
}
