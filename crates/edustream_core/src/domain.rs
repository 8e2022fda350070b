//! crates/edustream_core/src/domain.rs
//!
//! Defines the core data structures for the application: the catalog records,
//! the signed-in user, and the transient values produced by the AI assistant.
//! Field names serialize in camelCase so a seed document can be written in the
//! same shape the browser client already uses.

use serde::{Deserialize, Serialize};

/// A single lesson inside a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    /// Display string such as `"12:05"`; never parsed.
    pub duration: String,
    pub order: u32,
}

/// A published course and its ordered lessons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub author: String,
    pub category: String,
    /// `0.0` for free courses.
    pub price: f64,
    pub rating: f64,
    pub enrolled_count: u64,
    pub videos: Vec<Video>,
    pub created_at: String,
}

impl Course {
    pub fn is_free(&self) -> bool {
        self.price <= 0.0
    }

    /// Checks the record invariants a catalog entry must hold.
    pub fn is_well_formed(&self) -> bool {
        !self.videos.is_empty()
            && self.price >= 0.0
            && (0.0..=5.0).contains(&self.rating)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Instructor,
}

/// The single in-memory user of a viewer session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub role: Role,
    pub enrolled_courses: Vec<String>,
    pub owned_courses: Vec<String>,
}

impl User {
    pub fn is_enrolled(&self, course_id: &str) -> bool {
        self.enrolled_courses.iter().any(|id| id == course_id)
    }

    pub fn owns(&self, course_id: &str) -> bool {
        self.owned_courses.iter().any(|id| id == course_id)
    }
}

/// Which presentation view is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Home,
    Search,
    Dashboard,
    Watch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Ai,
}

/// One bubble of the tutoring transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: ChatRole::User, text: text.into() }
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self { role: ChatRole::Ai, text: text.into() }
    }
}

/// Marketing copy generated for a course draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseAnalysis {
    pub hook: String,
    pub outcomes: Vec<String>,
    pub tags: Vec<String>,
}

/// Categories offered by the publish form.
pub const COURSE_CATEGORIES: [&str; 4] = ["Software", "Design", "AI Tools", "Business"];

/// The publish form as the creator filled it in.
///
/// `price` is kept as the raw text from the form; it is parsed when the draft
/// is published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseDraft {
    pub title: String,
    pub description: String,
    pub price: String,
    pub category: String,
}

impl Default for CourseDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            price: "0".to_string(),
            category: COURSE_CATEGORIES[0].to_string(),
        }
    }
}
