//! Prompt construction plus a single provider call

use crate::error::Result;
use crate::llm::prompts::PromptTemplates;
use crate::llm::provider::FeedbackProvider;
use log::info;
use std::time::Instant;

pub struct FeedbackGenerator {
    templates: PromptTemplates,
    provider: Box<dyn FeedbackProvider>,
}

impl FeedbackGenerator {
    pub fn new(provider: Box<dyn FeedbackProvider>) -> Self {
        Self {
            templates: PromptTemplates::default(),
            provider,
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn ensure_available(&self) -> Result<()> {
        self.provider.ensure_available()
    }

    /// Feedback text for a resume. The provider's answer is returned verbatim.
    pub async fn generate(&self, resume_text: &str, job_role: Option<&str>) -> Result<String> {
        self.ensure_available()?;

        let prompt = self.templates.render_critique(resume_text, job_role);
        let start = Instant::now();
        let feedback = self.provider.generate(&prompt).await?;

        info!(
            "{} produced {} chars of feedback in {}ms",
            self.provider.name(),
            feedback.len(),
            start.elapsed().as_millis()
        );
        Ok(feedback)
    }
}
