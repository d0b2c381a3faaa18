//! Scoring and the analysis engine

pub mod analyzer;
pub mod score_engine;

pub use analyzer::{AnalysisOutcome, AnalysisReport, Analyzer};
