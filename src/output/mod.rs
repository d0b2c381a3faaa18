//! Rendering of analysis outcomes: console, JSON and Markdown

pub mod formatter;

pub use formatter::{OutputFormatter, ReportGenerator};
