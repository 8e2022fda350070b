//! services/api/src/web/assistant.rs
//!
//! Handlers for the AI-assisted features: search suggestions, course analysis
//! and the tutor chat. None of them surface AI failures as HTTP errors; the
//! assistant's fallbacks come back as ordinary responses.

use crate::web::{protocol::*, rest::reject, state::AppState};
use axum::{extract::State, http::StatusCode, response::Json};
use edustream_core::{dashboard::apply_analysis, domain::CourseDraft};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

#[utoipa::path(
    post,
    path = "/ai/suggestions",
    request_body = SuggestionsRequest,
    responses((status = 200, description = "Up to five ideas; empty when unavailable", body = SuggestionsResponse))
)]
pub async fn suggestions_handler(
    State(app_state): State<Arc<AppState>>,
    Json(body): Json<SuggestionsRequest>,
) -> Json<SuggestionsResponse> {
    let suggestions = app_state.assistant.get_search_suggestions(&body.query).await;
    Json(SuggestionsResponse { suggestions })
}

/// Analyzes a draft and returns it with the AI tagline appended.
#[utoipa::path(
    post,
    path = "/ai/analysis",
    request_body = DraftPayload,
    responses((status = 200, description = "Analysis, or the unchanged draft when unavailable", body = AnalysisResponse))
)]
pub async fn analysis_handler(
    State(app_state): State<Arc<AppState>>,
    Json(body): Json<DraftPayload>,
) -> Json<AnalysisResponse> {
    let draft: CourseDraft = body.into();
    let analysis = app_state
        .assistant
        .analyze_course_content(&draft.title, &draft.description)
        .await;
    let draft = apply_analysis(draft, analysis.as_ref());
    Json(AnalysisResponse { analysis, draft })
}

#[utoipa::path(
    get,
    path = "/tutor/messages",
    responses((status = 200, description = "The current transcript", body = TranscriptResponse))
)]
pub async fn transcript_handler(State(app_state): State<Arc<AppState>>) -> Json<TranscriptResponse> {
    let session = app_state.session.lock().await;
    Json(TranscriptResponse {
        awaiting_reply: session.is_awaiting_reply(),
        messages: session.transcript().to_vec(),
    })
}

/// Asks the tutor about the lesson on screen.
///
/// The question is appended before the AI call and the reply after it; the
/// session lock is released in between so the rest of the API stays usable.
/// The call and the write-back run on their own task, so the reply still lands
/// in the transcript when the client goes away mid-request.
#[utoipa::path(
    post,
    path = "/tutor/messages",
    request_body = TutorQuestionRequest,
    responses(
        (status = 200, description = "Reply appended (an apology when the AI is unavailable)", body = TutorReplyResponse),
        (status = 400, description = "Empty question"),
        (status = 409, description = "No lesson open, or a question is still waiting"),
        (status = 423, description = "Enroll to unlock the tutor")
    )
)]
pub async fn ask_tutor_handler(
    State(app_state): State<Arc<AppState>>,
    Json(body): Json<TutorQuestionRequest>,
) -> Result<Json<TutorReplyResponse>, (StatusCode, String)> {
    let pending = app_state
        .session
        .lock()
        .await
        .begin_question(&body.question)
        .map_err(reject)?;

    let task_state = app_state.clone();
    let answer_task = tokio::spawn(async move {
        let start_time = Instant::now();
        let reply = task_state
            .assistant
            .ask_tutor(&pending.context, &pending.question)
            .await;
        info!("Tutor answered in {:?}", start_time.elapsed());

        let mut session = task_state.session.lock().await;
        let delivered = session.finish_question(&pending, reply.clone());
        if !delivered {
            warn!("Viewer left the player before the tutor replied; reply dropped");
        }
        TutorReplyResponse {
            reply,
            delivered,
            messages: session.transcript().to_vec(),
        }
    });

    answer_task.await.map(Json).map_err(|e| {
        error!("Tutor task failed: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Tutor task failed".to_string())
    })
}
