//! crates/edustream_core/src/session.rs
//!
//! The viewer session: the one object that owns the catalog, the user, the
//! router, the player and the tutoring transcript. Every change goes through
//! one of the intent methods below.

use tracing::{debug, info};

use crate::access::{can_chat, can_play, course_access, VideoAccess};
use crate::assistant::AiAssistant;
use crate::catalog::Catalog;
use crate::chrome::ChromeState;
use crate::dashboard::{build_course, PublishError};
use crate::domain::{ChatMessage, Course, CourseDraft, User, Video, View};
use crate::navigation::{Transition, ViewRouter};
use crate::tutor::{lesson_context, PendingQuestion, TutorError, TutorTranscript};

/// Why an intent was refused. The session is unchanged when one is returned.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IntentError {
    #[error("Course not found: {0}")]
    UnknownCourse(String),
    #[error("Video not found: {0}")]
    UnknownVideo(String),
    #[error("No course is open in the player")]
    NothingPlaying,
    #[error("Video {0} is locked until the course is purchased")]
    VideoLocked(String),
    #[error("Enroll in the course to unlock the tutor")]
    ChatLocked,
    #[error(transparent)]
    Tutor(#[from] TutorError),
    #[error(transparent)]
    Publish(#[from] PublishError),
}

pub struct ViewerSession {
    catalog: Catalog,
    user: User,
    router: ViewRouter,
    active_video: Option<String>,
    transcript: TutorTranscript,
    chrome: ChromeState,
}

impl ViewerSession {
    pub fn new(catalog: Catalog, user: User) -> Self {
        Self {
            catalog,
            user,
            router: ViewRouter::new(),
            active_video: None,
            transcript: TutorTranscript::new(),
            chrome: ChromeState::default(),
        }
    }

    //=====================================================================================
    // Read access
    //=====================================================================================

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn router(&self) -> &ViewRouter {
        &self.router
    }

    pub fn chrome(&self) -> &ChromeState {
        &self.chrome
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        self.transcript.messages()
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.transcript.is_awaiting_reply()
    }

    /// Courses matching the stored search query.
    pub fn visible_courses(&self) -> Vec<&Course> {
        self.catalog.filter(self.router.search_query())
    }

    pub fn selected_course(&self) -> Option<&Course> {
        self.router
            .selected_course()
            .and_then(|id| self.catalog.find(id))
    }

    pub fn active_video(&self) -> Option<&Video> {
        let course = self.selected_course()?;
        let id = self.active_video.as_deref()?;
        course.videos.iter().find(|v| v.id == id)
    }

    /// Each lesson of `course_id` paired with its gating under the current enrollment.
    pub fn course_access(&self, course_id: &str) -> Result<Vec<(&Video, VideoAccess)>, IntentError> {
        let course = self
            .catalog
            .find(course_id)
            .ok_or_else(|| IntentError::UnknownCourse(course_id.to_string()))?;
        Ok(course.videos.iter().zip(course_access(course, &self.user)).collect())
    }

    /// The dashboard's list: courses the user published, in catalog order.
    pub fn owned_courses(&self) -> Vec<&Course> {
        self.catalog
            .courses()
            .iter()
            .filter(|c| self.user.owns(&c.id))
            .collect()
    }

    //=====================================================================================
    // Intents
    //=====================================================================================

    pub fn navigate(&mut self, view: View) -> Option<Transition> {
        let transition = self.router.navigate(view)?;
        self.after_transition(&transition);
        Some(transition)
    }

    pub fn search(&mut self, term: &str) -> Transition {
        let transition = self.router.search(term);
        self.after_transition(&transition);
        transition
    }

    /// The bottom bar's explore action.
    pub fn explore(&mut self) -> Option<Transition> {
        self.search(crate::catalog::SHOW_ALL);
        self.navigate(View::Search)
    }

    /// Opens `course_id` in the player on its first lesson with an empty transcript.
    pub fn select_course(&mut self, course_id: &str) -> Option<Transition> {
        let transition = self.router.select_course(&self.catalog, course_id)?;
        self.active_video = self
            .catalog
            .find(course_id)
            .and_then(|c| c.videos.first())
            .map(|v| v.id.clone());
        self.transcript.reset();
        info!(course_id, "Opened course in player");
        Some(transition)
    }

    /// Records an enrollment. Returns true when the user was not enrolled yet.
    pub fn enroll(&mut self, course_id: &str) -> bool {
        if !self.catalog.contains(course_id) {
            debug!(course_id, "Ignoring enrollment in unknown course");
            return false;
        }
        if self.user.is_enrolled(course_id) {
            return false;
        }
        self.user.enrolled_courses.push(course_id.to_string());
        info!(course_id, user_id = %self.user.id, "User enrolled");
        true
    }

    /// Switches the player to another lesson of the open course.
    pub fn choose_video(&mut self, video_id: &str) -> Result<&Video, IntentError> {
        let course = self.selected_course().ok_or(IntentError::NothingPlaying)?;
        let index = course
            .videos
            .iter()
            .position(|v| v.id == video_id)
            .ok_or_else(|| IntentError::UnknownVideo(video_id.to_string()))?;
        // The first lesson stays selectable as the course preview.
        if index > 0 && !can_play(course, &self.user, index) {
            return Err(IntentError::VideoLocked(video_id.to_string()));
        }
        self.active_video = Some(video_id.to_string());
        self.active_video().ok_or(IntentError::NothingPlaying)
    }

    pub fn publish(&mut self, draft: &CourseDraft) -> Result<Course, IntentError> {
        let course = build_course(draft, &self.user.name)?;
        self.user.owned_courses.push(course.id.clone());
        self.catalog.prepend(course.clone());
        info!(course_id = %course.id, title = %course.title, "Published course");
        Ok(course)
    }

    /// Appends the user's question and hands back what the tutor needs.
    /// The caller must pass the reply to [`ViewerSession::finish_question`].
    pub fn begin_question(&mut self, question: &str) -> Result<PendingQuestion, IntentError> {
        if self.router.view() != View::Watch {
            return Err(IntentError::NothingPlaying);
        }
        let course = self.selected_course().ok_or(IntentError::NothingPlaying)?;
        if !can_chat(course, &self.user) {
            return Err(IntentError::ChatLocked);
        }
        let video = self.active_video().ok_or(IntentError::NothingPlaying)?;
        let context = lesson_context(course, video);
        Ok(self.transcript.begin(question, context)?)
    }

    /// Returns false when the reply arrived for a transcript that has since been reset.
    pub fn finish_question(&mut self, pending: &PendingQuestion, reply: String) -> bool {
        self.transcript.resolve(pending, reply)
    }

    /// Question and answer in one step, for callers that own the session.
    pub async fn ask_tutor(&mut self, assistant: &AiAssistant, question: &str) -> Result<String, IntentError> {
        let pending = self.begin_question(question)?;
        let reply = assistant.ask_tutor(&pending.context, &pending.question).await;
        self.finish_question(&pending, reply.clone());
        Ok(reply)
    }

    pub fn on_scroll(&mut self, scroll_y: f64) {
        self.chrome.on_scroll(scroll_y);
    }

    pub fn on_resize(&mut self, viewport_width: u32) {
        self.chrome.on_resize(viewport_width);
    }

    pub fn close_sidebar(&mut self) {
        self.chrome.close_sidebar();
    }

    fn after_transition(&mut self, transition: &Transition) {
        if transition.left_watch() {
            self.transcript.reset();
            self.active_video = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::TUTOR_FALLBACK;
    use crate::domain::ChatRole;
    use crate::fixtures::{seed_courses, seed_user};
    use crate::ports::PortError;
    use crate::testing::ScriptedCompletions;
    use std::sync::Arc;

    fn session() -> ViewerSession {
        let user = User { enrolled_courses: Vec::new(), ..seed_user() };
        ViewerSession::new(Catalog::new(seed_courses()), user)
    }

    #[test]
    fn enroll_is_idempotent() {
        let mut session = session();

        assert!(session.enroll("c3"));
        let once = session.user().enrolled_courses.clone();
        assert!(!session.enroll("c3"));

        assert_eq!(session.user().enrolled_courses, once);
        assert!(!session.enroll("nope"));
    }

    #[test]
    fn enrolling_unlocks_second_lesson() {
        let mut session = session();
        session.select_course("c3").unwrap();

        assert_eq!(session.course_access("c3").unwrap()[1].1, VideoAccess::Locked);
        assert_eq!(session.choose_video("v5"), Err(IntentError::VideoLocked("v5".to_string())));

        session.enroll("c3");

        assert_eq!(session.course_access("c3").unwrap()[1].1, VideoAccess::Playable);
        assert_eq!(session.choose_video("v5").unwrap().id, "v5");
    }

    #[test]
    fn course_access_pairs_each_lesson_with_its_gate() {
        let session = session();

        let ids: Vec<(&str, VideoAccess)> = session
            .course_access("c3")
            .unwrap()
            .into_iter()
            .map(|(video, access)| (video.id.as_str(), access))
            .collect();

        assert_eq!(ids, vec![("v4", VideoAccess::PreviewLocked), ("v5", VideoAccess::Locked)]);
        assert_eq!(
            session.course_access("missing").unwrap_err(),
            IntentError::UnknownCourse("missing".to_string())
        );
    }

    #[test]
    fn publish_prepends_and_records_ownership() {
        let mut session = session();
        let draft = CourseDraft {
            title: "X".to_string(),
            description: "Y".to_string(),
            price: "10".to_string(),
            ..CourseDraft::default()
        };

        let course = session.publish(&draft).unwrap();

        assert_eq!(session.catalog().courses()[0].id, course.id);
        assert_eq!(session.catalog().len(), 4);
        assert_eq!(course.videos.len(), 1);
        assert!(session.user().owned_courses.contains(&course.id));
        let owned: Vec<&str> = session.owned_courses().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(owned, vec![course.id.as_str(), "c2"]);
    }

    #[test]
    fn rejected_publish_leaves_catalog_alone() {
        let mut session = session();
        let draft = CourseDraft::default();

        assert_eq!(session.publish(&draft), Err(IntentError::Publish(PublishError::MissingTitle)));
        assert_eq!(session.catalog().len(), 3);
    }

    #[test]
    fn locked_course_refuses_questions() {
        let mut session = session();
        session.select_course("c3");

        assert_eq!(session.begin_question("hi?"), Err(IntentError::ChatLocked));
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn leaving_player_resets_transcript_and_drops_late_reply() {
        let mut session = session();
        session.select_course("c2");
        let pending = session.begin_question("What is AI?").unwrap();

        session.navigate(View::Dashboard);

        assert!(session.transcript().is_empty());
        assert!(!session.finish_question(&pending, "late".to_string()));
        assert!(session.transcript().is_empty());
        assert!(session.active_video().is_none());
    }

    #[test]
    fn explore_clears_query_and_opens_search() {
        let mut session = session();
        session.search("python");
        assert_eq!(session.visible_courses().len(), 1);

        session.explore();

        assert_eq!(session.router().view(), View::Search);
        assert_eq!(session.visible_courses().len(), 3);
    }

    #[tokio::test]
    async fn tutor_failure_appends_apology_after_question() {
        let completions = Arc::new(ScriptedCompletions::new(vec![Err(PortError::Transport(
            "unreachable".to_string(),
        ))]));
        let assistant = AiAssistant::new(completions.clone());
        let mut session = session();
        session.select_course("c2");

        let reply = session.ask_tutor(&assistant, "How is AI changing design?").await.unwrap();

        assert_eq!(reply, TUTOR_FALLBACK);
        let transcript = session.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0], ChatMessage::user("How is AI changing design?"));
        assert_eq!(transcript[1].role, ChatRole::Ai);
        assert_eq!(transcript[1].text, TUTOR_FALLBACK);
        let prompt = completions.last_request().unwrap().prompt;
        assert!(prompt.contains(
            "Course: Generative AI for Designers. Video: The Future of Design. \
             Description: How AI is changing the landscape."
        ));
    }
}
