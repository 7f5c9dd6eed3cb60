use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Editor settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// History entries kept, the present one included (0 = unbounded)
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Quiet period before typed text is committed
    #[serde(default = "default_input_debounce_ms")]
    pub input_debounce_ms: u64,
}

fn default_history_capacity() -> usize {
    50
}

fn default_input_debounce_ms() -> u64 {
    400
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
            input_debounce_ms: default_input_debounce_ms(),
        }
    }
}

impl EditorConfig {
    pub fn input_debounce(&self) -> Duration {
        Duration::from_millis(self.input_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.history_capacity, 50);
        assert_eq!(config.input_debounce(), Duration::from_millis(400));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EditorConfig = serde_json::from_str(r#"{ "historyCapacity": 5 }"#).unwrap();
        assert_eq!(config.history_capacity, 5);
        assert_eq!(config.input_debounce_ms, 400);
    }
}
