//! Prompt assembly from configured sections.

use futures::future::join_all;

use dirprompt_core::{PromptConfig, Section, channel};

use crate::SectionBuilder;

/// Assembles the final prompt text.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    config: PromptConfig,
    sections: SectionBuilder,
}

impl PromptBuilder {
    /// Create a prompt builder for a configuration.
    pub fn new(config: PromptConfig) -> Self {
        let sections = match &config.working_dir {
            Some(dir) => SectionBuilder::new().with_working_dir(dir),
            None => SectionBuilder::new(),
        };
        Self { config, sections }
    }

    /// Build the prompt: preamble, then the included sections inside a fence.
    ///
    /// Included sections are built concurrently and kept in config order;
    /// excluded ones are never walked.
    pub async fn build(&self) -> String {
        tracing::info!(target: channel::INFO, "Starting prompt build");
        tracing::info!(
            target: channel::INFO,
            "Working directory: {}",
            std::env::current_dir().unwrap_or_default().display()
        );

        let sections = join_all(
            self.config
                .included_sections()
                .map(|s| self.sections.build(&s.root, &s.title)),
        )
        .await;
        let knowledge = sections
            .iter()
            .map(Section::to_string)
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "{}\n\n\n{}\n\n```{}\n{}\n```",
            self.config.preamble, self.config.knowledge_intro, self.config.fence, knowledge
        )
    }
}
