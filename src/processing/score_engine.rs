//! ATS (Applicant Tracking System) keyword-overlap scoring

use aho_corasick::AhoCorasick;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Which job-role keywords were found in a resume
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordBreakdown {
    pub keywords: Vec<String>,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

/// Qualitative band for an ATS score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTier {
    Low,
    Moderate,
    Strong,
}

impl ScoreTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=39 => ScoreTier::Low,
            40..=69 => ScoreTier::Moderate,
            _ => ScoreTier::Strong,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreTier::Low => "low",
            ScoreTier::Moderate => "moderate",
            ScoreTier::Strong => "strong",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            ScoreTier::Low => "Low ATS match: add more role-specific keywords",
            ScoreTier::Moderate => "Moderate ATS match: small improvements recommended",
            ScoreTier::Strong => "Strong ATS match: well optimized!",
        }
    }
}

impl std::fmt::Display for ScoreTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Lower-cased, whitespace-separated keywords of a job role, first occurrence wins
pub fn role_keywords(job_role: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    job_role
        .to_lowercase()
        .split_whitespace()
        .filter(|keyword| seen.insert(keyword.to_string()))
        .map(str::to_string)
        .collect()
}

/// Split role keywords into those present in the text and those absent.
/// A keyword is present when it occurs anywhere in the lower-cased text, even inside a longer word.
pub fn keyword_breakdown(text: &str, job_role: &str) -> KeywordBreakdown {
    let keywords = role_keywords(job_role);
    if keywords.is_empty() {
        return KeywordBreakdown {
            keywords,
            matched: Vec::new(),
            missing: Vec::new(),
        };
    }

    let haystack = text.to_lowercase();
    let found = find_present(&haystack, &keywords);

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    for (index, keyword) in keywords.iter().enumerate() {
        if found.contains(&index) {
            matched.push(keyword.clone());
        } else {
            missing.push(keyword.clone());
        }
    }

    KeywordBreakdown {
        keywords,
        matched,
        missing,
    }
}

/// Score in `[0, 100]`: share of role keywords present, rounded half up
pub fn score(text: &str, job_role: &str) -> u8 {
    keyword_breakdown(text, job_role).score()
}

impl KeywordBreakdown {
    pub fn score(&self) -> u8 {
        let total = self.keywords.len() as u64;
        if total == 0 {
            return 0;
        }
        let hits = self.matched.len() as u64;
        let rounded = (100 * hits + total / 2) / total;
        rounded.min(100) as u8
    }
}

fn find_present(haystack: &str, keywords: &[String]) -> HashSet<usize> {
    match AhoCorasick::new(keywords) {
        Ok(matcher) => matcher
            .find_overlapping_iter(haystack)
            .map(|m| m.pattern().as_usize())
            .collect(),
        Err(e) => {
            debug!("Keyword automaton unavailable ({}), scanning keywords one by one", e);
            keywords
                .iter()
                .enumerate()
                .filter(|(_, keyword)| haystack.contains(keyword.as_str()))
                .map(|(index, _)| index)
                .collect()
        }
    }
}

/// Whitespace-separated word count
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
