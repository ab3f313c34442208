use anyhow::Result;
use serde::Serialize;

/// Output format shared by every command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Parse a format name. Anything unrecognised is text.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "yaml" | "yml" => OutputFormat::Yaml,
            _ => OutputFormat::Text,
        }
    }

    /// Print `value` as JSON or YAML, or hand over to `text` for the
    /// human readable rendering.
    pub fn print<T: Serialize>(self, value: &T, text: impl FnOnce(&T)) -> Result<()> {
        match self {
            OutputFormat::Json => {
                let json_output = serde_json::to_string_pretty(value)?;
                println!("{}", json_output);
            }
            OutputFormat::Yaml => {
                let yaml_output = serde_yaml::to_string(value)?;
                print!("{}", yaml_output);
            }
            OutputFormat::Text => text(value),
        }
        Ok(())
    }
}
