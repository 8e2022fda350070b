//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for browsing, navigation, enrollment and
//! publishing, and the master definition for the OpenAPI specification.

use crate::web::{assistant, protocol::*, state::AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use edustream_core::{
    catalog::{active_term, SUGGESTED_SEARCH_TERMS},
    domain::{Course, CourseDraft, COURSE_CATEGORIES},
    session::IntentError,
    tutor::TutorError,
};
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        get_state_handler,
        list_courses_handler,
        search_terms_handler,
        navigate_handler,
        search_handler,
        explore_handler,
        select_course_handler,
        enroll_handler,
        course_access_handler,
        choose_video_handler,
        dashboard_handler,
        publish_handler,
        scroll_handler,
        resize_handler,
        close_sidebar_handler,
        assistant::suggestions_handler,
        assistant::analysis_handler,
        assistant::transcript_handler,
        assistant::ask_tutor_handler,
    ),
    components(
        schemas(
            NavigateRequest, SearchRequest, DraftPayload, SuggestionsRequest,
            TutorQuestionRequest, ScrollRequest, ResizeRequest, StateResponse,
            TransitionResponse, CourseListResponse, SearchTermsResponse, EnrollResponse,
            VideoAccessEntry, CourseAccessResponse, DashboardResponse, SuggestionsResponse,
            AnalysisResponse, TranscriptResponse, TutorReplyResponse,
        )
    ),
    tags(
        (name = "EduStream API", description = "Course catalog, player gating, publishing and the AI tutor.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Error Mapping
//=========================================================================================

/// Maps a refused intent onto an HTTP status and message.
pub fn reject(err: IntentError) -> (StatusCode, String) {
    let status = match &err {
        IntentError::UnknownCourse(_) | IntentError::UnknownVideo(_) => StatusCode::NOT_FOUND,
        IntentError::VideoLocked(_) | IntentError::ChatLocked => StatusCode::LOCKED,
        IntentError::NothingPlaying | IntentError::Tutor(TutorError::AwaitingReply) => {
            StatusCode::CONFLICT
        }
        IntentError::Tutor(TutorError::EmptyQuestion) | IntentError::Publish(_) => {
            StatusCode::BAD_REQUEST
        }
    };
    (status, err.to_string())
}

//=========================================================================================
// Browsing
//=========================================================================================

/// Snapshot of the viewer session.
#[utoipa::path(
    get,
    path = "/state",
    responses((status = 200, description = "Current view and user", body = StateResponse))
)]
pub async fn get_state_handler(State(app_state): State<Arc<AppState>>) -> Json<StateResponse> {
    let session = app_state.session.lock().await;
    let router = session.router();
    Json(StateResponse {
        view: router.view(),
        search_query: router.search_query().to_string(),
        active_term: active_term(router.search_query()).to_string(),
        selected_course: session.selected_course().cloned(),
        active_video: session.active_video().cloned(),
        user: session.user().clone(),
        chrome: *session.chrome(),
        awaiting_reply: session.is_awaiting_reply(),
    })
}

/// Courses matching `q`, or the stored search query when `q` is absent.
#[utoipa::path(
    get,
    path = "/courses",
    params(CoursesQuery),
    responses((status = 200, description = "Filtered catalog, in catalog order", body = CourseListResponse))
)]
pub async fn list_courses_handler(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<CoursesQuery>,
) -> Json<CourseListResponse> {
    let session = app_state.session.lock().await;
    let query = params
        .q
        .unwrap_or_else(|| session.router().search_query().to_string());
    let courses = session.catalog().filter(&query).into_iter().cloned().collect();
    Json(CourseListResponse { query, courses })
}

#[utoipa::path(
    get,
    path = "/search-terms",
    responses((status = 200, description = "Quick search chips", body = SearchTermsResponse))
)]
pub async fn search_terms_handler(State(app_state): State<Arc<AppState>>) -> Json<SearchTermsResponse> {
    let session = app_state.session.lock().await;
    Json(SearchTermsResponse {
        terms: SUGGESTED_SEARCH_TERMS.iter().map(|t| t.to_string()).collect(),
        active_term: active_term(session.router().search_query()).to_string(),
    })
}

//=========================================================================================
// Navigation
//=========================================================================================

#[utoipa::path(
    post,
    path = "/navigate",
    request_body = NavigateRequest,
    responses(
        (status = 200, description = "View changed", body = TransitionResponse),
        (status = 409, description = "The watch view needs a selected course")
    )
)]
pub async fn navigate_handler(
    State(app_state): State<Arc<AppState>>,
    Json(body): Json<NavigateRequest>,
) -> Result<Json<TransitionResponse>, (StatusCode, String)> {
    let mut session = app_state.session.lock().await;
    session
        .navigate(body.view)
        .map(|t| Json(t.into()))
        .ok_or_else(|| reject(IntentError::NothingPlaying))
}

#[utoipa::path(
    post,
    path = "/search",
    request_body = SearchRequest,
    responses((status = 200, description = "Search query stored", body = TransitionResponse))
)]
pub async fn search_handler(
    State(app_state): State<Arc<AppState>>,
    Json(body): Json<SearchRequest>,
) -> Json<TransitionResponse> {
    let mut session = app_state.session.lock().await;
    Json(session.search(&body.term).into())
}

/// Clears the search and opens the search view.
#[utoipa::path(
    post,
    path = "/explore",
    responses((status = 200, description = "Search view with the full catalog", body = TransitionResponse))
)]
pub async fn explore_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<TransitionResponse>, (StatusCode, String)> {
    let mut session = app_state.session.lock().await;
    session
        .explore()
        .map(|t| Json(t.into()))
        .ok_or_else(|| reject(IntentError::NothingPlaying))
}

#[utoipa::path(
    post,
    path = "/courses/{id}/select",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course opened in the player", body = TransitionResponse),
        (status = 404, description = "Unknown course")
    )
)]
pub async fn select_course_handler(
    State(app_state): State<Arc<AppState>>,
    Path(course_id): Path<String>,
) -> Result<Json<TransitionResponse>, (StatusCode, String)> {
    let mut session = app_state.session.lock().await;
    session
        .select_course(&course_id)
        .map(|t| Json(t.into()))
        .ok_or_else(|| reject(IntentError::UnknownCourse(course_id)))
}

//=========================================================================================
// Enrollment and Player
//=========================================================================================

#[utoipa::path(
    post,
    path = "/courses/{id}/enroll",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Enrollment recorded (idempotent)", body = EnrollResponse),
        (status = 404, description = "Unknown course")
    )
)]
pub async fn enroll_handler(
    State(app_state): State<Arc<AppState>>,
    Path(course_id): Path<String>,
) -> Result<Json<EnrollResponse>, (StatusCode, String)> {
    let mut session = app_state.session.lock().await;
    if !session.catalog().contains(&course_id) {
        return Err(reject(IntentError::UnknownCourse(course_id)));
    }
    let newly_enrolled = session.enroll(&course_id);
    Ok(Json(EnrollResponse {
        course_id,
        newly_enrolled,
        enrolled_courses: session.user().enrolled_courses.clone(),
    }))
}

#[utoipa::path(
    get,
    path = "/courses/{id}/access",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Gating for each lesson", body = CourseAccessResponse),
        (status = 404, description = "Unknown course")
    )
)]
pub async fn course_access_handler(
    State(app_state): State<Arc<AppState>>,
    Path(course_id): Path<String>,
) -> Result<Json<CourseAccessResponse>, (StatusCode, String)> {
    let session = app_state.session.lock().await;
    let videos = session
        .course_access(&course_id)
        .map_err(reject)?
        .into_iter()
        .map(|(video, access)| VideoAccessEntry {
            video_id: video.id.clone(),
            title: video.title.clone(),
            access,
        })
        .collect();
    Ok(Json(CourseAccessResponse { course_id, videos }))
}

/// Switches the player to another lesson of the open course.
#[utoipa::path(
    post,
    path = "/player/videos/{id}",
    params(("id" = String, Path, description = "Video id")),
    responses(
        (status = 200, description = "Lesson is now active"),
        (status = 404, description = "Unknown lesson"),
        (status = 409, description = "No course is open"),
        (status = 423, description = "Lesson is locked")
    )
)]
pub async fn choose_video_handler(
    State(app_state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let mut session = app_state.session.lock().await;
    let video = session.choose_video(&video_id).map_err(reject)?.clone();
    Ok(Json(video))
}

//=========================================================================================
// Dashboard
//=========================================================================================

#[utoipa::path(
    get,
    path = "/dashboard",
    responses((status = 200, description = "Courses the user published", body = DashboardResponse))
)]
pub async fn dashboard_handler(State(app_state): State<Arc<AppState>>) -> Json<DashboardResponse> {
    let session = app_state.session.lock().await;
    Json(DashboardResponse {
        owned_courses: session.owned_courses().into_iter().cloned().collect(),
        categories: COURSE_CATEGORIES.iter().map(|c| c.to_string()).collect(),
    })
}

/// Publishes a draft. The new course is placed at the front of the catalog.
#[utoipa::path(
    post,
    path = "/dashboard/courses",
    request_body = DraftPayload,
    responses(
        (status = 201, description = "Course published"),
        (status = 400, description = "Missing title or description, or invalid price")
    )
)]
pub async fn publish_handler(
    State(app_state): State<Arc<AppState>>,
    Json(body): Json<DraftPayload>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let draft: CourseDraft = body.into();
    let mut session = app_state.session.lock().await;
    let course: Course = session.publish(&draft).map_err(|e| {
        warn!("Rejected publish: {}", e);
        reject(e)
    })?;
    info!("Catalog now holds {} courses", session.catalog().len());
    Ok((StatusCode::CREATED, Json(course)))
}

//=========================================================================================
// Chrome
//=========================================================================================

#[utoipa::path(
    post,
    path = "/chrome/scroll",
    request_body = ScrollRequest,
    responses((status = 200, description = "Header visibility updated"))
)]
pub async fn scroll_handler(
    State(app_state): State<Arc<AppState>>,
    Json(body): Json<ScrollRequest>,
) -> impl IntoResponse {
    let mut session = app_state.session.lock().await;
    session.on_scroll(body.scroll_y);
    Json(*session.chrome())
}

#[utoipa::path(
    post,
    path = "/chrome/resize",
    request_body = ResizeRequest,
    responses((status = 200, description = "Sidebar state updated"))
)]
pub async fn resize_handler(
    State(app_state): State<Arc<AppState>>,
    Json(body): Json<ResizeRequest>,
) -> impl IntoResponse {
    let mut session = app_state.session.lock().await;
    session.on_resize(body.width);
    Json(*session.chrome())
}

#[utoipa::path(
    post,
    path = "/chrome/sidebar/close",
    responses((status = 200, description = "Sidebar closed"))
)]
pub async fn close_sidebar_handler(State(app_state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut session = app_state.session.lock().await;
    session.close_sidebar();
    Json(*session.chrome())
}
