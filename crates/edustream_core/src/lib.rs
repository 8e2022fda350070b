pub mod access;
pub mod assistant;
pub mod catalog;
pub mod chrome;
pub mod dashboard;
pub mod domain;
pub mod fixtures;
pub mod navigation;
pub mod ports;
pub mod session;
pub mod tutor;

#[cfg(test)]
mod testing;

pub use access::{can_play, VideoAccess};
pub use assistant::{AiAssistant, TUTOR_FALLBACK};
pub use catalog::{filter_courses, Catalog, SHOW_ALL, SUGGESTED_SEARCH_TERMS};
pub use domain::{ChatMessage, ChatRole, Course, CourseAnalysis, CourseDraft, Role, User, Video, View};
pub use ports::{CompletionRequest, CompletionService, PortError, PortResult, ResponseSchema, SchemaType};
pub use session::{IntentError, ViewerSession};
