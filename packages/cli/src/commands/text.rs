use super::{read_input, write_output};
use anyhow::Result;
use clap::Args;
use mailblock_compiler_html::html_to_plain_text;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct TextArgs {
    /// HTML file (`-` for stdin)
    pub input: String,

    /// Write text here instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

/// Plain-text alternative of an HTML newsletter
pub fn text(args: TextArgs, cwd: &str) -> Result<()> {
    let html = read_input(&args.input, cwd)?;
    write_output(&html_to_plain_text(&html), args.out.as_deref(), cwd)
}
