pub mod parse;
pub mod render;
pub mod roundtrip;
pub mod text;

pub use parse::{parse, ParseArgs};
pub use render::{render, RenderArgs};
pub use roundtrip::{roundtrip, RoundtripArgs};
pub use text::{text, TextArgs};

use anyhow::{Context, Result};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Read a file, or stdin for `-`
pub(crate) fn read_input(input: &str, cwd: &str) -> Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("reading stdin")?;
        return Ok(buffer);
    }

    let path = PathBuf::from(cwd).join(input);
    std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
}

/// Write to a file, or stdout when no path is given
pub(crate) fn write_output(output: &str, out: Option<&Path>, cwd: &str) -> Result<()> {
    match out {
        Some(path) => {
            let path = PathBuf::from(cwd).join(path);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, output).with_context(|| format!("writing {}", path.display()))
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            if !output.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            Ok(())
        }
    }
}
