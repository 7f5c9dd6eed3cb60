use mailblock_compiler_html::CompileOptions;
use mailblock_editor::EditorConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "mailblock.config.json";

/// Mailblock configuration file format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub editor: EditorConfig,

    /// Serializer output options
    #[serde(default)]
    pub compiler: CompilerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerConfig {
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    #[serde(default = "default_indent")]
    pub indent: String,

    /// `<title>` of rendered documents
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_pretty() -> bool {
    true
}

fn default_indent() -> String {
    "  ".to_string()
}

fn default_title() -> String {
    "Newsletter".to_string()
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
            indent: default_indent(),
            title: default_title(),
        }
    }
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "loaded config");
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Serializer options, with command-line overrides applied
    pub fn compile_options(&self, compact: bool, title: Option<&str>) -> CompileOptions {
        CompileOptions {
            pretty: self.compiler.pretty && !compact,
            indent: self.compiler.indent.clone(),
            title: title.unwrap_or(&self.compiler.title).to_string(),
        }
    }
}
