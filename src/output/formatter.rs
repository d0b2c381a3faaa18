//! Output formatters for analysis outcomes

use crate::config::OutputFormat;
use crate::error::{CritiqueError, Result};
use crate::processing::analyzer::{AnalysisOutcome, AnalysisReport};
use crate::processing::score_engine::ScoreTier;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting analysis outcomes
pub trait OutputFormatter {
    fn format_outcome(&self, outcome: &AnalysisOutcome) -> Result<String>;
}

/// Colored terminal output
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON for scripting
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Width of the console score bar in cells
const BAR_WIDTH: usize = 20;

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn tier_color(tier: ScoreTier) -> Color {
        match tier {
            ScoreTier::Low => Color::Red,
            ScoreTier::Moderate => Color::Yellow,
            ScoreTier::Strong => Color::Green,
        }
    }

    fn score_bar(&self, score: u8, tier: ScoreTier) -> String {
        let filled = (score as usize * BAR_WIDTH + 50) / 100;
        let bar = format!("{}{}", "■".repeat(filled), "·".repeat(BAR_WIDTH - filled));
        format!("[{}] {}%", self.colorize(&bar, Self::tier_color(tier)), score)
    }

    fn format_report(&self, report: &AnalysisReport) -> String {
        let mut output = String::new();

        output.push_str(&self.format_header("🧠 Resume Analysis Complete", 1));
        output.push_str(&format!("📄 Resume length: {} words\n", report.word_count));

        output.push_str(&self.format_header("📊 ATS Compatibility Score", 2));
        output.push_str(&format!("{}\n", self.score_bar(report.score, report.tier)));
        match &report.job_role {
            Some(role) => output.push_str(&format!(
                "Your resume matches {}% of the job role keywords ({})\n",
                report.score, role
            )),
            None => output.push_str("No job role given, so no keywords were matched\n"),
        }
        output.push_str(&format!(
            "{}\n",
            self.colorize(report.tier.advice(), Self::tier_color(report.tier))
        ));

        if self.detailed && !report.keywords.keywords.is_empty() {
            if !report.keywords.matched.is_empty() {
                output.push_str(&format!(
                    "  ✅ Matched: {}\n",
                    self.colorize(&report.keywords.matched.join(", "), Color::Green)
                ));
            }
            if !report.keywords.missing.is_empty() {
                output.push_str(&format!(
                    "  ⚠️  Missing: {}\n",
                    self.colorize(&report.keywords.missing.join(", "), Color::Yellow)
                ));
            }
        }

        output.push_str(&self.format_header("Professional Resume Feedback", 2));
        output.push_str(report.feedback.trim_end());
        output.push('\n');

        if self.detailed {
            output.push_str(&format!(
                "\n{}\n",
                self.colorize(
                    &format!(
                        "Provider: {} | Processing time: {}ms | Generated: {}",
                        report.provider,
                        report.processing_time_ms,
                        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
                    ),
                    Color::BrightBlack
                )
            ));
        }

        output
    }

    /// One-line rendering of a failed or rejected trigger
    pub fn format_error(&self, error: &CritiqueError) -> String {
        let (icon, color) = if error.is_rejection() {
            ("⏳", Color::Yellow)
        } else {
            ("❌", Color::Red)
        };
        format!("{} {}", icon, self.colorize(&error.to_string(), color))
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_outcome(&self, outcome: &AnalysisOutcome) -> Result<String> {
        match outcome {
            AnalysisOutcome::Cached { filename, feedback } => {
                let mut output = self.format_header("🧠 Resume Analysis (Cached)", 1);
                if self.detailed {
                    output.push_str(&format!(
                        "{}\n",
                        self.colorize(&format!("Unchanged document: {}", filename), Color::BrightBlack)
                    ));
                }
                output.push_str(feedback.trim_end());
                output.push('\n');
                Ok(output)
            }
            AnalysisOutcome::Completed(report) => Ok(self.format_report(report)),
        }
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_outcome(&self, outcome: &AnalysisOutcome) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(outcome)?)
        } else {
            Ok(serde_json::to_string(outcome)?)
        }
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_tier_badge(tier: ScoreTier) -> &'static str {
        match tier {
            ScoreTier::Strong => "🟢 Strong",
            ScoreTier::Moderate => "🟡 Moderate",
            ScoreTier::Low => "🔴 Low",
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_outcome(&self, outcome: &AnalysisOutcome) -> Result<String> {
        let report = match outcome {
            AnalysisOutcome::Cached { feedback, .. } => {
                return Ok(format!("# 🧠 Resume Analysis (Cached)\n\n{}\n", feedback.trim()));
            }
            AnalysisOutcome::Completed(report) => report,
        };

        let mut output = String::new();
        output.push_str("# 🧠 Resume Analysis\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Resume:** `{}` | **Generated:** {} | **Provider:** {}\n\n",
                report.filename,
                report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.provider
            ));
        }

        output.push_str("## 📊 ATS Compatibility Score\n\n");
        output.push_str(&format!(
            "**Score:** {}% {}\n\n",
            report.score,
            Self::markdown_tier_badge(report.tier)
        ));
        output.push_str(&format!("**Resume length:** {} words\n\n", report.word_count));
        if let Some(role) = &report.job_role {
            output.push_str(&format!("**Target role:** {}\n\n", role));
        }
        if !report.keywords.matched.is_empty() {
            output.push_str(&format!("**Matched keywords:** `{}`\n\n", report.keywords.matched.join("`, `")));
        }
        if !report.keywords.missing.is_empty() {
            output.push_str(&format!("**Missing keywords:** `{}`\n\n", report.keywords.missing.join("`, `")));
        }
        output.push_str(&format!("> {}\n\n", report.tier.advice()));

        output.push_str("## Professional Resume Feedback\n\n");
        output.push_str(report.feedback.trim());
        output.push('\n');

        Ok(output)
    }
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(detailed),
        }
    }

    pub fn generate(&self, outcome: &AnalysisOutcome, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_outcome(outcome),
            OutputFormat::Json => self.json_formatter.format_outcome(outcome),
            OutputFormat::Markdown => self.markdown_formatter.format_outcome(outcome),
        }
    }

    pub fn format_error(&self, error: &CritiqueError) -> String {
        self.console_formatter.format_error(error)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    match format {
        OutputFormat::Console => format!("{}_critique.txt", base_name),
        OutputFormat::Json => format!("{}_critique.json", base_name),
        OutputFormat::Markdown => format!("{}_critique.md", base_name),
    }
}
