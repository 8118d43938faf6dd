use anyhow::Context;
use corkboard::{ImportConfig, SchemaVariant};
use dialogue::DialogueConfig;
use rich_text::{CustomTag, RichTextOptions};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub import: ImportSection,
    pub dialogue: DialogueSection,
    pub logging: LoggingConfig,
    pub tags: Vec<TagConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImportSection {
    pub schema: SchemaVariant,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DialogueSection {
    /// Consecutive automatic transitions allowed before the walk is cut off.
    pub max_auto_steps: usize,
    pub extract_code_blocks: bool,
}

impl Default for DialogueSection {
    fn default() -> Self {
        Self {
            max_auto_steps: 1000,
            extract_code_blocks: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`.
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// A custom tag; tags with a replacement are replacing tags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TagConfig {
    pub name: String,
    #[serde(default)]
    pub replacement: Option<String>,
}

impl From<&TagConfig> for CustomTag {
    fn from(tag: &TagConfig) -> Self {
        match &tag.replacement {
            Some(replacement) => CustomTag::replace(&tag.name, replacement),
            None => CustomTag::decorate(&tag.name),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Importer settings; `force_legacy` overrides the configured schema.
    pub fn import_config(&self, force_legacy: bool) -> ImportConfig {
        let schema = if force_legacy {
            SchemaVariant::Legacy
        } else {
            self.import.schema
        };
        ImportConfig::default().with_schema(schema)
    }

    pub fn render_options(&self) -> RichTextOptions {
        RichTextOptions {
            extract_code_blocks: self.dialogue.extract_code_blocks,
            custom_tags: self.tags.iter().map(CustomTag::from).collect(),
        }
    }

    pub fn dialogue_config(&self) -> DialogueConfig {
        DialogueConfig {
            render: self.render_options(),
        }
    }
}
