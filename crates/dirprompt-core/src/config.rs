//! Section and prompt configuration types.

use std::path::{Path, PathBuf};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_PREAMBLE: &str = "You are a gigabrain clarity smart contract DeFi developer! \
Work directly from the provided examples. You are not allowed to modify the contract \
interfaces as they will not be valid.";

const DEFAULT_KNOWLEDGE_INTRO: &str = "Here are some tips to help you provide clear and \
concise responses relating to Clarity Smart contact development:";

const DEFAULT_FENCE: &str = "clarity";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`PromptConfig`].
    #[error("Cannot parse config: {source}")]
    Parse {
        #[source]
        source: toml::de::Error,
    },

    /// The config parsed but describes an unusable setup.
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

/// One directory to aggregate into a titled section.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct SectionConfig {
    /// Directory to aggregate, absolute or relative to the working directory.
    pub root: PathBuf,

    /// Title rendered above the section.
    pub title: String,

    /// Whether the section is placed into the assembled prompt.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub include: bool,
}

fn default_true() -> bool {
    true
}

fn check_section(root: &Path, title: &str) -> Result<(), String> {
    if root.as_os_str().is_empty() {
        return Err("Section root cannot be empty".to_string());
    }
    if title.trim().is_empty() {
        return Err("Section title cannot be empty".to_string());
    }
    Ok(())
}

impl SectionConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        let Some(ref root) = self.root else {
            return Err("Section root is required".to_string());
        };
        let Some(ref title) = self.title else {
            return Err("Section title is required".to_string());
        };
        check_section(root, title)
    }
}

impl SectionConfig {
    /// Create a new section config builder.
    pub fn builder() -> SectionConfigBuilder {
        SectionConfigBuilder::default()
    }

    /// Create an included section for a directory.
    pub fn new(root: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            title: title.into(),
            include: true,
        }
    }

    /// Mark the section as built but left out of the prompt.
    pub fn excluded(mut self) -> Self {
        self.include = false;
        self
    }
}

/// Everything needed to assemble a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Opening instruction placed before the knowledge block.
    pub preamble: String,

    /// Sentence introducing the aggregated sections.
    pub knowledge_intro: String,

    /// Info string of the code fence wrapping the sections.
    pub fence: String,

    /// Base directory for relative section roots (None = process cwd).
    pub working_dir: Option<PathBuf>,

    /// Sections to build, in prompt order.
    pub sections: Vec<SectionConfig>,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            preamble: DEFAULT_PREAMBLE.to_string(),
            knowledge_intro: DEFAULT_KNOWLEDGE_INTRO.to_string(),
            fence: DEFAULT_FENCE.to_string(),
            working_dir: None,
            sections: vec![
                SectionConfig::new("lib/examples", "Code Examples"),
                SectionConfig::new("lib/docs", "Documentation").excluded(),
            ],
        }
    }
}

impl PromptConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input).map_err(|source| ConfigError::Parse { source })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&input)
    }

    /// Check every section for an empty root or title.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for section in &self.sections {
            check_section(&section.root, &section.title)
                .map_err(|message| ConfigError::Invalid { message })?;
        }
        Ok(())
    }

    /// Sections that end up in the prompt.
    pub fn included_sections(&self) -> impl Iterator<Item = &SectionConfig> {
        self.sections.iter().filter(|s| s.include)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_builder() {
        let section = SectionConfig::builder()
            .root("lib/examples")
            .title("Code Examples")
            .build()
            .unwrap();

        assert_eq!(section.root, PathBuf::from("lib/examples"));
        assert!(section.include);
    }

    #[test]
    fn test_section_builder_rejects_empty_title() {
        let result = SectionConfig::builder().root("lib").title("  ").build();
        assert!(result.is_err());

        let result = SectionConfig::builder().title("Docs").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_default_prompt_config() {
        let config = PromptConfig::default();

        assert_eq!(config.fence, "clarity");
        assert_eq!(config.sections.len(), 2);
        let included: Vec<_> = config.included_sections().map(|s| s.title.as_str()).collect();
        assert_eq!(included, vec!["Code Examples"]);
    }

    #[test]
    fn test_from_toml_str() {
        let config = PromptConfig::from_toml_str(
            r#"
            preamble = "Be brief."
            fence = "rust"

            [[sections]]
            root = "src"
            title = "Sources"

            [[sections]]
            root = "notes"
            title = "Notes"
            include = false
            "#,
        )
        .unwrap();

        assert_eq!(config.preamble, "Be brief.");
        assert_eq!(config.fence, "rust");
        // Unset keys keep their defaults.
        assert_eq!(config.knowledge_intro, DEFAULT_KNOWLEDGE_INTRO);
        assert_eq!(config.sections.len(), 2);
        assert!(!config.sections[1].include);
    }

    #[test]
    fn test_from_toml_str_rejects_empty_root() {
        let err = PromptConfig::from_toml_str(
            r#"
            [[sections]]
            root = ""
            title = "Nothing"
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_from_toml_str_rejects_garbage() {
        let err = PromptConfig::from_toml_str("sections = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
