//! Feedback generation: prompt construction and provider dispatch

pub mod gemini;
pub mod generator;
pub mod prompts;
pub mod provider;

pub use generator::FeedbackGenerator;
pub use provider::{DemoProvider, FeedbackProvider};

use crate::config::{Config, FeedbackMode};
use crate::error::Result;
use gemini::GeminiProvider;

/// Build the provider for a mode. Missing credentials surface later, on first use.
pub fn provider_for(mode: FeedbackMode, config: &Config) -> Result<Box<dyn FeedbackProvider>> {
    match mode {
        FeedbackMode::Demo => Ok(Box::new(DemoProvider)),
        FeedbackMode::Gemini => Ok(Box::new(GeminiProvider::from_config(config)?)),
    }
}
