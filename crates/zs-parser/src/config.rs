//! Parser configuration, loadable from TOML.

use serde::Deserialize;

use crate::types::TimeFormat;

/// Settings fixed before a run starts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParserConfig {
    /// Encoding of the `ts` field.
    #[serde(default)]
    pub time_format: TimeFormat,
    /// Longest accepted line in bytes, excluding the newline. A longer line
    /// ends the run with a source read error.
    #[serde(default = "default_max_line_bytes")]
    pub max_line_bytes: usize,
}

fn default_max_line_bytes() -> usize {
    64 * 1024
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            time_format: TimeFormat::default(),
            max_line_bytes: default_max_line_bytes(),
        }
    }
}

impl ParserConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(contents)?;
        Ok(config)
    }

    pub fn with_time_format(mut self, time_format: TimeFormat) -> Self {
        self.time_format = time_format;
        self
    }
}
