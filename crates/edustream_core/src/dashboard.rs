//! crates/edustream_core/src/dashboard.rs
//!
//! The creator dashboard's publish form: turning a draft into a catalog
//! record and folding an AI analysis back into the draft.

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Course, CourseAnalysis, CourseDraft, Video, COURSE_CATEGORIES};

const PLACEHOLDER_CLIP: &str = "https://www.w3schools.com/html/mov_bbb.mp4";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PublishError {
    #[error("Course title is required")]
    MissingTitle,
    #[error("Course description is required")]
    MissingDescription,
    #[error("Invalid price: {0:?}")]
    InvalidPrice(String),
}

/// Parses the price field; it must be a finite, non-negative number.
pub fn parse_price(raw: &str) -> Result<f64, PublishError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price >= 0.0)
        .ok_or_else(|| PublishError::InvalidPrice(raw.to_string()))
}

fn placeholder_video() -> Video {
    Video {
        id: format!("v{}", Uuid::new_v4().simple()),
        title: "Course Introduction".to_string(),
        description: "Overview of what students will achieve.".to_string(),
        url: PLACEHOLDER_CLIP.to_string(),
        duration: "10:00".to_string(),
        order: 1,
    }
}

/// Builds the catalog record for a draft published by `author`.
pub fn build_course(draft: &CourseDraft, author: &str) -> Result<Course, PublishError> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(PublishError::MissingTitle);
    }
    let description = draft.description.trim();
    if description.is_empty() {
        return Err(PublishError::MissingDescription);
    }
    let price = parse_price(&draft.price)?;
    let category = match draft.category.trim() {
        "" => COURSE_CATEGORIES[0],
        other => other,
    };

    Ok(Course {
        id: format!("c{}", Uuid::new_v4().simple()),
        title: title.to_string(),
        description: description.to_string(),
        thumbnail: format!("https://picsum.photos/seed/{}/1280/720", title),
        author: author.to_string(),
        category: category.to_string(),
        price,
        rating: 5.0,
        enrolled_count: 0,
        videos: vec![placeholder_video()],
        created_at: Utc::now().to_rfc3339(),
    })
}

/// Appends the analysis hook to the draft description as a tagline. Without
/// an analysis the draft comes back untouched.
pub fn apply_analysis(mut draft: CourseDraft, analysis: Option<&CourseAnalysis>) -> CourseDraft {
    if let Some(analysis) = analysis {
        draft.description = format!("{}\n\nAI Tagline: {}", draft.description, analysis.hook);
    }
    draft
}
