//! crates/edustream_core/src/assistant.rs
//!
//! The AI assistant used by the search box, the publish form and the player.
//!
//! All three operations go through [`AiAssistant::structured_completion`]: one
//! prompt, an optional response shape, and a fallback value. Transport errors,
//! timeouts and malformed responses are logged and replaced by the fallback, so
//! callers only ever look at the returned value.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::CourseAnalysis;
use crate::ports::{
    CompletionRequest, CompletionService, PortError, PortResult, ResponseSchema, SchemaType,
};

/// The reply appended to the transcript when the tutor cannot answer.
pub const TUTOR_FALLBACK: &str = "I'm sorry, I couldn't process that question right now.";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

pub const MAX_SUGGESTIONS: usize = 5;
pub const ANALYSIS_OUTCOMES: usize = 3;
pub const ANALYSIS_TAGS: usize = 5;

fn suggestions_prompt(query: &str) -> String {
    format!(
        r#"Given the search query "{query}", suggest 5 relevant educational topics or course titles related to software, design, or business. Return as a JSON array of strings."#
    )
}

fn analysis_prompt(title: &str, description: &str) -> String {
    format!(
        "Analyze this course content:
Title: {title}
Description: {description}

Provide:
1. A 1-sentence catchy hook.
2. 3 key learning outcomes.
3. 5 suggested tags for SEO."
    )
}

fn tutor_prompt(context: &str, question: &str) -> String {
    format!(
        r#"You are an expert educational tutor. Based on this video content description: "{context}", answer the following student question: "{question}". Keep it helpful, concise, and professional."#
    )
}

//=========================================================================================
// Response Shapes
//=========================================================================================

pub fn suggestions_schema() -> ResponseSchema {
    ResponseSchema::new("search_suggestions", SchemaType::array_of(SchemaType::String))
}

pub fn analysis_schema() -> ResponseSchema {
    ResponseSchema::new(
        "course_analysis",
        SchemaType::Object {
            properties: vec![
                ("hook".to_string(), SchemaType::String),
                ("outcomes".to_string(), SchemaType::array_of(SchemaType::String)),
                ("tags".to_string(), SchemaType::array_of(SchemaType::String)),
            ],
            required: vec!["hook".to_string(), "outcomes".to_string(), "tags".to_string()],
        },
    )
}

#[derive(Deserialize)]
struct AnalysisPayload {
    hook: String,
    outcomes: Vec<String>,
    tags: Vec<String>,
}

fn parse_json<T: DeserializeOwned>(text: &str) -> PortResult<T> {
    serde_json::from_str(text.trim()).map_err(|e| PortError::Schema(e.to_string()))
}

fn clean_entries(entries: Vec<String>) -> Vec<String> {
    entries
        .into_iter()
        .map(|entry| entry.trim().to_string())
        .filter(|entry| !entry.is_empty())
        .collect()
}

fn parse_suggestions(text: &str) -> PortResult<Vec<String>> {
    let mut suggestions = clean_entries(parse_json::<Vec<String>>(text)?);
    suggestions.truncate(MAX_SUGGESTIONS);
    Ok(suggestions)
}

/// Accepts the analysis only when every field is populated. Surplus entries
/// are cut; missing ones reject the whole response.
fn parse_analysis(text: &str) -> PortResult<Option<CourseAnalysis>> {
    let payload: AnalysisPayload = parse_json(text)?;

    let hook = payload.hook.trim().to_string();
    if hook.is_empty() {
        return Err(PortError::Schema("analysis hook is empty".to_string()));
    }
    let mut outcomes = clean_entries(payload.outcomes);
    if outcomes.len() < ANALYSIS_OUTCOMES {
        return Err(PortError::Schema(format!(
            "expected {} outcomes, got {}",
            ANALYSIS_OUTCOMES,
            outcomes.len()
        )));
    }
    let mut tags = clean_entries(payload.tags);
    if tags.len() < ANALYSIS_TAGS {
        return Err(PortError::Schema(format!(
            "expected {} tags, got {}",
            ANALYSIS_TAGS,
            tags.len()
        )));
    }
    outcomes.truncate(ANALYSIS_OUTCOMES);
    tags.truncate(ANALYSIS_TAGS);

    Ok(Some(CourseAnalysis { hook, outcomes, tags }))
}

fn parse_answer(text: &str) -> PortResult<String> {
    let answer = text.trim();
    if answer.is_empty() {
        return Err(PortError::Schema("tutor returned an empty answer".to_string()));
    }
    Ok(answer.to_string())
}

//=========================================================================================
// The Assistant
//=========================================================================================

/// Fail-soft client for the generative-language service.
#[derive(Clone)]
pub struct AiAssistant {
    completions: Arc<dyn CompletionService>,
    timeout: Duration,
}

impl AiAssistant {
    pub fn new(completions: Arc<dyn CompletionService>) -> Self {
        Self { completions, timeout: DEFAULT_TIMEOUT }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sends one request and turns its text into `T` with `parse`. Any failure
    /// along the way yields `fallback`.
    pub async fn structured_completion<T>(
        &self,
        operation: &'static str,
        request: CompletionRequest,
        parse: impl FnOnce(&str) -> PortResult<T>,
        fallback: T,
    ) -> T {
        let outcome = match tokio::time::timeout(self.timeout, self.completions.complete(request)).await {
            Ok(Ok(text)) => parse(&text),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(PortError::Timeout(self.timeout.as_millis())),
        };

        match outcome {
            Ok(value) => value,
            Err(e) => {
                warn!(operation, error = %e, "AI request failed, returning fallback");
                fallback
            }
        }
    }

    /// Up to five topic or course-title ideas for a search query.
    pub async fn get_search_suggestions(&self, query: &str) -> Vec<String> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let request = CompletionRequest {
            prompt: suggestions_prompt(query),
            response_schema: Some(suggestions_schema()),
        };
        self.structured_completion("search_suggestions", request, parse_suggestions, Vec::new())
            .await
    }

    /// A hook, three outcomes and five tags for a course draft, or `None` when
    /// the analysis could not be produced.
    pub async fn analyze_course_content(&self, title: &str, description: &str) -> Option<CourseAnalysis> {
        if title.trim().is_empty() || description.trim().is_empty() {
            debug!("Skipping course analysis: title or description is empty");
            return None;
        }
        let request = CompletionRequest {
            prompt: analysis_prompt(title, description),
            response_schema: Some(analysis_schema()),
        };
        self.structured_completion("course_analysis", request, parse_analysis, None)
            .await
    }

    /// Answers a student question about the lesson described by `context`.
    /// Always returns text: [`TUTOR_FALLBACK`] stands in for any failure.
    pub async fn ask_tutor(&self, context: &str, question: &str) -> String {
        if question.trim().is_empty() {
            debug!("Skipping tutor request: question is empty");
            return TUTOR_FALLBACK.to_string();
        }
        let request = CompletionRequest {
            prompt: tutor_prompt(context, question),
            response_schema: None,
        };
        self.structured_completion("tutor", request, parse_answer, TUTOR_FALLBACK.to_string())
            .await
    }
}
