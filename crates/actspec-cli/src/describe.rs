//! # Describe Subcommand
//!
//! Prints every action a manifest declares, in declaration order, with its
//! namespaced type, documentation, and payload shape.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use actspec_schema::{Manifest, ParsedAction};

/// Arguments for the describe subcommand.
#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Path to the schema manifest (YAML, or JSON with a `.json` extension).
    pub manifest: PathBuf,
}

/// Load and compile the manifest, then write its description to `out`.
pub fn run(args: &DescribeArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let manifest = Manifest::from_path(&args.manifest)
        .with_context(|| format!("loading {}", args.manifest.display()))?;
    let schema = manifest.compile()?;

    if !schema.namespace().is_empty() {
        writeln!(out, "namespace: {}", schema.namespace())?;
    }
    for action in schema.iter() {
        let namespaced = schema.actions().get(&action.action_type)?;
        writeln!(out, "{} ({namespaced})", action.action_type)?;
        if !action.doc.is_empty() {
            writeln!(out, "    {}", action.doc)?;
        }
        write_payload(action, out)?;
    }
    Ok(())
}

fn write_payload(action: &ParsedAction, out: &mut impl Write) -> std::io::Result<()> {
    if action.args.is_empty() {
        return writeln!(out, "    payload: none");
    }
    if action.is_whole_payload() {
        return writeln!(out, "    payload: whole value");
    }
    for arg in &action.args {
        let id = arg.id.as_deref().unwrap_or_default();
        if arg.doc.is_empty() {
            writeln!(out, "    - {id}")?;
        } else {
            writeln!(out, "    - {id}: {}", arg.doc)?;
        }
    }
    Ok(())
}
