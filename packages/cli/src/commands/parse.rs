use super::{read_input, write_output};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use mailblock_editor::Document;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// HTML file to parse (`-` for stdin)
    pub input: String,

    /// Single-line JSON
    #[arg(long)]
    pub compact: bool,

    /// Write JSON here instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn parse(args: ParseArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let html = read_input(&args.input, cwd)?;

    let doc = Document::from_html(&html, &config.editor);
    let json = if args.compact {
        serde_json::to_string(doc.blocks())?
    } else {
        serde_json::to_string_pretty(doc.blocks())?
    };

    write_output(&json, args.out.as_deref(), cwd)?;
    eprintln!(
        "{} {} → {} blocks",
        "✓".green(),
        args.input,
        doc.blocks().len()
    );
    Ok(())
}
