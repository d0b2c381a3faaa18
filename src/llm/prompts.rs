//! Prompt template for resume critique

use log::debug;

/// Role phrase used when the user did not name a target role
pub const GENERAL_ROLE: &str = "General job applications";

/// The five areas every critique covers, in prompt order
pub const FOCUS_AREAS: [&str; 5] = [
    "Content clarity and impact",
    "Skills relevance",
    "Experience quality",
    "Formatting & ATS optimization",
    "Suggestions for this role",
];

#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub critique: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            critique: CRITIQUE_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    /// Render the critique prompt. The resume text is embedded verbatim.
    pub fn render_critique(&self, resume_text: &str, job_role: Option<&str>) -> String {
        let role = job_role
            .map(str::trim)
            .filter(|role| !role.is_empty())
            .unwrap_or(GENERAL_ROLE);

        let focus = FOCUS_AREAS
            .iter()
            .enumerate()
            .map(|(i, area)| {
                if i + 1 == FOCUS_AREAS.len() {
                    format!("{}. {}: {}", i + 1, area, role)
                } else {
                    format!("{}. {}", i + 1, area)
                }
            })
            .collect::<Vec<_>>()
            .join("\n");

        // Substitute around the resume so text inside it or the role is never treated as a placeholder
        let (head, tail) = self
            .critique
            .split_once("{resume}")
            .unwrap_or((self.critique.as_str(), ""));
        let prompt = format!("{}{}{}", head.replace("{focus}", &focus), resume_text, tail);

        debug!(
            "Rendered critique prompt: {} chars (resume {} chars, role '{}')",
            prompt.len(),
            resume_text.len(),
            role
        );
        prompt
    }
}

const CRITIQUE_TEMPLATE: &str = r#"You are a professional career coach and resume expert.

Analyze this resume and provide structured, actionable feedback.

Focus on:
{focus}

Resume:
{resume}

Respond in clear bullet points with section headings."#;
