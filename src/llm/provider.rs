//! Feedback providers: the canned demo and hosted models

use crate::error::Result;
use async_trait::async_trait;

/// A source of critique text for a rendered prompt
#[async_trait]
pub trait FeedbackProvider: Send + Sync {
    /// Display name shown next to the feedback
    fn name(&self) -> &str;

    /// Fails with `ProviderUnavailable` when the provider cannot be used at all.
    /// Checked before any prompt is built.
    fn ensure_available(&self) -> Result<()>;

    /// One attempt, no retries
    async fn generate(&self, prompt: &str) -> Result<String>;
}

pub const DEMO_FEEDBACK: &str = r#"## Resume Feedback (Demo Mode)

- Add a strong professional summary at the top
- Use measurable achievements instead of responsibilities
- Improve keyword alignment with your job role
- Group technical skills into categories
- Keep bullet points under 2 lines for readability
"#;

/// Returns the same feedback for every prompt without any network access
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoProvider;

#[async_trait]
impl FeedbackProvider for DemoProvider {
    fn name(&self) -> &str {
        "Demo Mode"
    }

    fn ensure_available(&self) -> Result<()> {
        Ok(())
    }

    async fn generate(&self, _prompt: &str) -> Result<String> {
        Ok(DEMO_FEEDBACK.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_is_byte_identical_across_prompts() {
        let provider = DemoProvider;
        let first = provider.generate("Resume: Jane Roe, data engineer").await.unwrap();
        let second = provider.generate("Resume: John Doe, nurse").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first, DEMO_FEEDBACK);
    }

    #[test]
    fn test_demo_always_available() {
        assert!(DemoProvider.ensure_available().is_ok());
        assert_eq!(DemoProvider.name(), "Demo Mode");
    }
}
