//! Analysis engine: one trigger through gate, extraction, scoring and feedback

use crate::config::Config;
use crate::error::{CritiqueError, Result};
use crate::input::UploadedDocument;
use crate::llm::FeedbackGenerator;
use crate::processing::score_engine::{keyword_breakdown, word_count, KeywordBreakdown, ScoreTier};
use crate::session::gate::short_hash;
use crate::session::{GateDecision, RequestGate, SessionState};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Where a trigger is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisStage {
    Idle,
    RateCheck,
    Extracting,
    Scoring,
    Generating,
    Cached,
    Done,
    Rejected,
    Failed,
}

/// Everything rendered after a completed analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub filename: String,
    pub job_role: Option<String>,
    pub word_count: usize,
    pub score: u8,
    pub tier: ScoreTier,
    pub keywords: KeywordBreakdown,
    pub feedback: String,
    pub provider: String,
    pub content_hash: String,
    pub generated_at: DateTime<Utc>,
    pub processing_time_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AnalysisOutcome {
    /// Same document as the last completed analysis; nothing was recomputed
    Cached { filename: String, feedback: String },
    Completed(AnalysisReport),
}

impl AnalysisOutcome {
    pub fn feedback(&self) -> &str {
        match self {
            AnalysisOutcome::Cached { feedback, .. } => feedback,
            AnalysisOutcome::Completed(report) => &report.feedback,
        }
    }

    pub fn is_cached(&self) -> bool {
        matches!(self, AnalysisOutcome::Cached { .. })
    }
}

pub struct Analyzer {
    gate: RequestGate,
    generator: FeedbackGenerator,
}

impl Analyzer {
    pub fn new(gate: RequestGate, generator: FeedbackGenerator) -> Self {
        Self { gate, generator }
    }

    pub fn from_config(config: &Config, generator: FeedbackGenerator) -> Self {
        Self::new(RequestGate::new(config.min_interval()), generator)
    }

    pub fn provider_name(&self) -> &str {
        self.generator.provider_name()
    }

    /// Fails with `ProviderUnavailable` when the provider has no credential
    pub fn ensure_available(&self) -> Result<()> {
        self.generator.ensure_available()
    }

    /// Run one trigger. Only a completed analysis is stored in the session cache.
    pub async fn run(
        &self,
        state: &mut SessionState,
        document: Option<UploadedDocument>,
        job_role: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<AnalysisOutcome> {
        let mut stage = AnalysisStage::Idle;
        let result = self.run_stages(state, document, job_role, now, &mut stage).await;

        let terminal = match &result {
            Ok(AnalysisOutcome::Cached { .. }) => AnalysisStage::Cached,
            Ok(AnalysisOutcome::Completed(_)) => AnalysisStage::Done,
            Err(e) if e.is_rejection() => AnalysisStage::Rejected,
            Err(_) => AnalysisStage::Failed,
        };
        transition(&mut stage, terminal);

        if let Err(e) = &result {
            if terminal == AnalysisStage::Failed {
                warn!("Analysis failed ({}): {}", e.kind(), e);
            } else {
                info!("Analysis rejected: {}", e);
            }
        }
        result
    }

    async fn run_stages(
        &self,
        state: &mut SessionState,
        document: Option<UploadedDocument>,
        job_role: Option<&str>,
        now: DateTime<Utc>,
        stage: &mut AnalysisStage,
    ) -> Result<AnalysisOutcome> {
        let document = document.ok_or(CritiqueError::NoFileProvided)?;

        transition(stage, AnalysisStage::RateCheck);
        let content_hash = document.content_hash().to_string();
        if let GateDecision::Cached(feedback) = self.gate.admit(state, now, &content_hash)? {
            info!("Serving cached feedback for {}", document.filename());
            return Ok(AnalysisOutcome::Cached {
                filename: document.filename().to_string(),
                feedback,
            });
        }

        let start = Instant::now();

        transition(stage, AnalysisStage::Extracting);
        let request = document.into_request(job_role)?;

        transition(stage, AnalysisStage::Scoring);
        let words = word_count(&request.text);
        let keywords = keyword_breakdown(&request.text, request.job_role.as_deref().unwrap_or(""));
        let score = keywords.score();
        info!("{}: {} words, ATS score {}%", request.filename, words, score);

        transition(stage, AnalysisStage::Generating);
        let feedback = self
            .generator
            .generate(&request.text, request.job_role.as_deref())
            .await?;

        state.store(request.content_hash.clone(), feedback.clone());
        debug!("Cached feedback for {}", short_hash(&request.content_hash));

        Ok(AnalysisOutcome::Completed(AnalysisReport {
            filename: request.filename,
            job_role: request.job_role,
            word_count: words,
            score,
            tier: ScoreTier::from_score(score),
            keywords,
            feedback,
            provider: self.generator.provider_name().to_string(),
            content_hash: request.content_hash,
            generated_at: now,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }))
    }
}

fn transition(stage: &mut AnalysisStage, next: AnalysisStage) {
    debug!("Analysis stage {:?} -> {:?}", stage, next);
    *stage = next;
}

/// Run a trigger on its own task so a panic becomes `Unexpected` instead of ending the process.
/// The session is handed back. After a panic the cache is as it was before the trigger,
/// and the request still counts against the interval if it had passed the gate.
pub async fn run_guarded(
    analyzer: Arc<Analyzer>,
    state: SessionState,
    document: Option<UploadedDocument>,
    job_role: Option<String>,
    now: DateTime<Utc>,
) -> (SessionState, Result<AnalysisOutcome>) {
    let snapshot = state.clone();
    let content_hash = document.as_ref().map(|doc| doc.content_hash().to_string());
    let task = tokio::spawn({
        let analyzer = analyzer.clone();
        async move {
            let mut state = state;
            let result = analyzer.run(&mut state, document, job_role.as_deref(), now).await;
            (state, result)
        }
    });

    match task.await {
        Ok(finished) => finished,
        Err(e) => {
            warn!("Analysis task aborted: {}", e);
            let mut state = snapshot;
            if let Some(hash) = content_hash {
                if let Ok(GateDecision::Proceed) = analyzer.gate.check(&state, now, &hash) {
                    state.mark_accepted(now);
                }
            }
            (state, Err(CritiqueError::Unexpected(format!("analysis aborted: {}", e))))
        }
    }
}
