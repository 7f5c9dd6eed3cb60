use super::{read_input, write_output};
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use mailblock_editor::Document;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RoundtripArgs {
    /// HTML file to normalize (`-` for stdin)
    pub input: String,

    #[arg(long)]
    pub compact: bool,

    /// Fail unless re-parsing the output reproduces it exactly
    #[arg(long)]
    pub check: bool,

    /// Write HTML here instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

/// Parse HTML and render it back as editor markup
pub fn roundtrip(args: RoundtripArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let html = read_input(&args.input, cwd)?;
    let options = config.compile_options(args.compact, None);

    let doc = Document::from_html(&html, &config.editor);
    let rendered = doc.to_html(options.clone());

    if args.check {
        let again = Document::from_html(&rendered, &config.editor).to_html(options);
        if again != rendered {
            return Err(anyhow!(
                "{} is not stable: re-parsing the output changes it",
                args.input
            ));
        }
        eprintln!("{} Output is stable", "✓".green());
    }

    write_output(&rendered, args.out.as_deref(), cwd)?;
    eprintln!(
        "{} {} → {} blocks",
        "✓".green(),
        args.input,
        doc.blocks().len()
    );
    Ok(())
}
