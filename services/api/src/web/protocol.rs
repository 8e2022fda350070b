//! services/api/src/web/protocol.rs
//!
//! Defines the JSON payloads exchanged between the browser client and the API
//! server. Core records (courses, users, messages) are embedded as-is.

use edustream_core::{
    access::VideoAccess,
    chrome::ChromeState,
    domain::{ChatMessage, Course, CourseAnalysis, CourseDraft, User, Video, View},
    navigation::Transition,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

//=========================================================================================
// Requests FROM the Client
//=========================================================================================

#[derive(Deserialize, Debug, ToSchema)]
pub struct NavigateRequest {
    /// One of `home`, `search`, `dashboard`, `watch`.
    #[schema(value_type = String, example = "dashboard")]
    pub view: View,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct SearchRequest {
    /// Free text, or `All` to clear the filter.
    pub term: String,
}

#[derive(Deserialize, Debug, IntoParams)]
pub struct CoursesQuery {
    /// Overrides the stored search query for this request only.
    pub q: Option<String>,
}

/// The publish form. Omitted fields take the form's defaults.
#[derive(Deserialize, Debug, ToSchema)]
pub struct DraftPayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// The price as typed, e.g. `"29.99"`.
    pub price: Option<String>,
    pub category: Option<String>,
}

impl From<DraftPayload> for CourseDraft {
    fn from(payload: DraftPayload) -> Self {
        let defaults = CourseDraft::default();
        CourseDraft {
            title: payload.title,
            description: payload.description,
            price: payload.price.unwrap_or(defaults.price),
            category: payload.category.unwrap_or(defaults.category),
        }
    }
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct SuggestionsRequest {
    pub query: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct TutorQuestionRequest {
    pub question: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct ScrollRequest {
    pub scroll_y: f64,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct ResizeRequest {
    pub width: u32,
}

//=========================================================================================
// Responses TO the Client
//=========================================================================================

#[derive(Serialize, Debug, ToSchema)]
pub struct StateResponse {
    #[schema(value_type = String)]
    pub view: View,
    pub search_query: String,
    /// The suggestion chip to highlight.
    pub active_term: String,
    #[schema(value_type = Option<Object>)]
    pub selected_course: Option<Course>,
    #[schema(value_type = Option<Object>)]
    pub active_video: Option<Video>,
    #[schema(value_type = Object)]
    pub user: User,
    #[schema(value_type = Object)]
    pub chrome: ChromeState,
    /// True while a tutor question is waiting for its answer.
    pub awaiting_reply: bool,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct TransitionResponse {
    #[schema(value_type = String)]
    pub from: View,
    #[schema(value_type = String)]
    pub view: View,
    pub scroll_to_top: bool,
}

impl From<Transition> for TransitionResponse {
    fn from(t: Transition) -> Self {
        Self { from: t.from, view: t.to, scroll_to_top: t.scroll_to_top }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct CourseListResponse {
    pub query: String,
    #[schema(value_type = Vec<Object>)]
    pub courses: Vec<Course>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct SearchTermsResponse {
    pub terms: Vec<String>,
    pub active_term: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct EnrollResponse {
    pub course_id: String,
    /// False when the user already held the enrollment.
    pub newly_enrolled: bool,
    pub enrolled_courses: Vec<String>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct VideoAccessEntry {
    pub video_id: String,
    pub title: String,
    /// `playable`, `preview_locked` or `locked`.
    #[schema(value_type = String)]
    pub access: VideoAccess,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct CourseAccessResponse {
    pub course_id: String,
    pub videos: Vec<VideoAccessEntry>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct DashboardResponse {
    #[schema(value_type = Vec<Object>)]
    pub owned_courses: Vec<Course>,
    pub categories: Vec<String>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<String>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct AnalysisResponse {
    /// Absent when the analysis could not be produced.
    #[schema(value_type = Option<Object>)]
    pub analysis: Option<CourseAnalysis>,
    /// The draft with the tagline applied, or unchanged without an analysis.
    #[schema(value_type = Object)]
    pub draft: CourseDraft,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct TranscriptResponse {
    pub awaiting_reply: bool,
    #[schema(value_type = Vec<Object>)]
    pub messages: Vec<ChatMessage>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct TutorReplyResponse {
    pub reply: String,
    /// False when the viewer left the player before the answer arrived.
    pub delivered: bool,
    #[schema(value_type = Vec<Object>)]
    pub messages: Vec<ChatMessage>,
}
