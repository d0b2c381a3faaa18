//! Integration tests for the resume critiquer

use chrono::{Duration, TimeZone, Utc};
use resume_critiquer::config::{Config, FeedbackMode, OutputFormat};
use resume_critiquer::input::UploadedDocument;
use resume_critiquer::llm::{self, provider::DEMO_FEEDBACK, FeedbackGenerator};
use resume_critiquer::output::ReportGenerator;
use resume_critiquer::processing::score_engine::ScoreTier;
use resume_critiquer::processing::{AnalysisOutcome, Analyzer};
use resume_critiquer::session::SessionState;
use resume_critiquer::CritiqueError;
use std::path::Path;

fn demo_analyzer(config: &Config) -> Analyzer {
    let provider = llm::provider_for(FeedbackMode::Demo, config).unwrap();
    Analyzer::from_config(config, FeedbackGenerator::new(provider))
}

fn t0() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
}

#[tokio::test]
async fn test_text_upload_from_txt() {
    let document = UploadedDocument::from_path(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    assert_eq!(document.filename(), "sample_resume.txt");

    let request = document.into_request(Some("Rust Engineer")).unwrap();
    assert!(request.text.contains("John Doe"));
    assert!(request.text.contains("Software Engineer"));
    assert_eq!(request.job_role.as_deref(), Some("Rust Engineer"));
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let result = UploadedDocument::from_path(Path::new("tests/fixtures/unsupported.xyz")).await;
    assert!(matches!(result, Err(CritiqueError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let result = UploadedDocument::from_path(Path::new("tests/fixtures/nonexistent.txt")).await;
    assert!(matches!(result, Err(CritiqueError::Io(_))));
}

#[tokio::test]
async fn test_invalid_pdf_is_unreadable() {
    let config = Config::default();
    let analyzer = demo_analyzer(&config);
    let mut state = SessionState::new();

    let document = UploadedDocument::from_path(Path::new("tests/fixtures/not_a_pdf.pdf"))
        .await
        .unwrap();
    let result = analyzer.run(&mut state, Some(document), None, t0()).await;
    assert!(matches!(result, Err(CritiqueError::UnreadableDocument(_))));
    assert!(state.cache().is_none());
}

#[tokio::test]
async fn test_multi_page_pdf_upload() {
    let document = UploadedDocument::from_path(Path::new("tests/fixtures/multi_page_resume.pdf"))
        .await
        .unwrap();
    let request = document.into_request(None).unwrap();

    // The middle page has no text
    assert_eq!(request.text, "Jane Roe Senior Data\nEngineer building Spark pipelines\n");
}

#[tokio::test]
async fn test_multi_page_pdf_analysis() {
    let config = Config::default();
    let analyzer = demo_analyzer(&config);
    let mut state = SessionState::new();

    let document = UploadedDocument::from_path(Path::new("tests/fixtures/multi_page_resume.pdf"))
        .await
        .unwrap();
    let outcome = analyzer
        .run(&mut state, Some(document), Some("Senior Data Engineer Python"), t0())
        .await
        .unwrap();

    let report = match outcome {
        AnalysisOutcome::Completed(report) => report,
        other => panic!("expected completed analysis, got {:?}", other),
    };
    // "Data" and "Engineer" sit on different pages and stay separate words
    assert_eq!(report.word_count, 8);
    assert_eq!(report.score, 75);
    assert_eq!(report.keywords.missing, vec!["python"]);
}

#[tokio::test]
async fn test_empty_upload_is_unreadable() {
    let config = Config::default();
    let analyzer = demo_analyzer(&config);
    let mut state = SessionState::new();

    let document = UploadedDocument::from_path(Path::new("tests/fixtures/empty.txt"))
        .await
        .unwrap();
    let result = analyzer.run(&mut state, Some(document), Some("Engineer"), t0()).await;
    assert!(matches!(result, Err(CritiqueError::UnreadableDocument(_))));
}

#[tokio::test]
async fn test_demo_session_flow() {
    let config = Config::default();
    let analyzer = demo_analyzer(&config);
    let mut state = SessionState::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    // First trigger runs the full pipeline
    let document = UploadedDocument::from_path(path).await.unwrap();
    let outcome = analyzer
        .run(&mut state, Some(document), Some("Senior Data Engineer"), t0())
        .await
        .unwrap();
    let report = match &outcome {
        AnalysisOutcome::Completed(report) => report.clone(),
        other => panic!("expected completed analysis, got {:?}", other),
    };
    assert_eq!(report.score, 67);
    assert_eq!(report.tier, ScoreTier::Moderate);
    assert_eq!(report.word_count, 72);
    assert_eq!(report.feedback, DEMO_FEEDBACK);
    assert_eq!(report.provider, "Demo Mode");

    // Same file again shortly after: cached
    let document = UploadedDocument::from_path(path).await.unwrap();
    let again = analyzer
        .run(&mut state, Some(document), Some("Senior Data Engineer"), t0() + Duration::seconds(1))
        .await
        .unwrap();
    assert!(again.is_cached());
    assert_eq!(again.feedback(), report.feedback);

    // A different file two seconds in: rejected
    let other = UploadedDocument::new(b"Jane Roe, registered nurse".to_vec(), "jane.txt");
    let rejected = analyzer
        .run(&mut state, Some(other), None, t0() + Duration::seconds(2))
        .await;
    assert!(matches!(rejected, Err(CritiqueError::TooSoon { remaining_secs: 8 })));

    // No file at all
    let missing = analyzer.run(&mut state, None, None, t0() + Duration::seconds(30)).await;
    assert!(matches!(missing, Err(CritiqueError::NoFileProvided)));

    // Reset clears the memo
    state.reset();
    let document = UploadedDocument::from_path(path).await.unwrap();
    let fresh = analyzer
        .run(&mut state, Some(document), None, t0() + Duration::seconds(31))
        .await
        .unwrap();
    assert!(!fresh.is_cached());
}

#[tokio::test]
async fn test_gemini_without_credential_is_unavailable() {
    let mut config = Config::default();
    config.provider.api_key_env = "RESUME_CRITIQUER_INTEGRATION_UNSET_KEY".to_string();

    let provider = llm::provider_for(FeedbackMode::Gemini, &config).unwrap();
    assert_eq!(provider.name(), "Google Gemini (AI)");
    let analyzer = Analyzer::from_config(&config, FeedbackGenerator::new(provider));
    assert!(matches!(analyzer.ensure_available(), Err(CritiqueError::ProviderUnavailable(_))));
    let mut state = SessionState::new();

    let document = UploadedDocument::new(b"Rust engineer".to_vec(), "cv.txt");
    let result = analyzer.run(&mut state, Some(document), None, t0()).await;
    assert!(matches!(result, Err(CritiqueError::ProviderUnavailable(_))));
    assert!(state.cache().is_none());
}

#[tokio::test]
async fn test_configured_interval_is_honoured() {
    let mut config = Config::default();
    config.gate.min_interval_secs = 60;
    let analyzer = demo_analyzer(&config);
    let mut state = SessionState::new();

    let first = UploadedDocument::new(b"first resume".to_vec(), "a.txt");
    analyzer.run(&mut state, Some(first), None, t0()).await.unwrap();

    let second = UploadedDocument::new(b"second resume".to_vec(), "b.txt");
    let result = analyzer
        .run(&mut state, Some(second), None, t0() + Duration::seconds(30))
        .await;
    assert!(matches!(result, Err(CritiqueError::TooSoon { remaining_secs: 30 })));
}

#[tokio::test]
async fn test_rendered_outputs() {
    let config = Config::default();
    let analyzer = demo_analyzer(&config);
    let mut state = SessionState::new();

    let document = UploadedDocument::new(b"Rust engineer building services".to_vec(), "cv.txt");
    let outcome = analyzer
        .run(&mut state, Some(document), Some("rust engineer"), t0())
        .await
        .unwrap();

    let reports = ReportGenerator::with_options(false, false);
    let console = reports.generate(&outcome, OutputFormat::Console).unwrap();
    assert!(console.contains("Strong ATS match"));
    assert!(console.contains("Resume Feedback (Demo Mode)"));

    let json = reports.generate(&outcome, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["score"], 100);
    assert_eq!(value["status"], "completed");
}
