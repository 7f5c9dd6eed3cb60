use super::{read_input, write_output};
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use mailblock_compiler_html::compile_to_html;
use mailblock_model::Block;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Blocks JSON file (`-` for stdin)
    pub input: String,

    /// No indentation in the document shell
    #[arg(long)]
    pub compact: bool,

    /// Document `<title>` (overrides config)
    #[arg(long)]
    pub title: Option<String>,

    /// Write HTML here instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let json = read_input(&args.input, cwd)?;

    let mut blocks: Vec<Block> =
        serde_json::from_str(&json).with_context(|| format!("{} is not a block list", args.input))?;
    mailblock_editor::normalize_orders(&mut blocks);

    let options = config.compile_options(args.compact, args.title.as_deref());
    let html = compile_to_html(&blocks, options);

    if html.is_empty() {
        eprintln!("{} {} renders to an empty document", "⚠️".yellow(), args.input);
    }

    write_output(&html, args.out.as_deref(), cwd)?;
    eprintln!("{} Rendered {} blocks", "✓".green(), blocks.len());
    Ok(())
}
