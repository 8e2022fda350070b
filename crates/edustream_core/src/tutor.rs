//! crates/edustream_core/src/tutor.rs
//!
//! The player's tutoring transcript.
//!
//! Every question goes through [`TutorTranscript::begin`], which appends the
//! user's message right away, and [`TutorTranscript::resolve`], which appends
//! the single reply. Only one question may be outstanding at a time. Resetting
//! the transcript bumps its generation, so a reply that arrives after the
//! viewer has moved on is dropped instead of landing in the new conversation.

use tracing::debug;

use crate::assistant::AiAssistant;
use crate::domain::{ChatMessage, Course, Video};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TutorError {
    #[error("Question is empty")]
    EmptyQuestion,
    #[error("A question is already waiting for an answer")]
    AwaitingReply,
}

/// Context handed to the tutor for the lesson currently on screen.
pub fn lesson_context(course: &Course, video: &Video) -> String {
    format!(
        "Course: {}. Video: {}. Description: {}",
        course.title, video.title, video.description
    )
}

/// A question whose answer has not been appended yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuestion {
    generation: u64,
    pub context: String,
    pub question: String,
}

#[derive(Debug, Clone, Default)]
pub struct TutorTranscript {
    messages: Vec<ChatMessage>,
    generation: u64,
    awaiting_reply: bool,
}

impl TutorTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// While true, the submit control stays disabled.
    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    pub fn begin(&mut self, question: &str, context: String) -> Result<PendingQuestion, TutorError> {
        if question.trim().is_empty() {
            return Err(TutorError::EmptyQuestion);
        }
        if self.awaiting_reply {
            return Err(TutorError::AwaitingReply);
        }
        self.messages.push(ChatMessage::user(question));
        self.awaiting_reply = true;
        Ok(PendingQuestion {
            generation: self.generation,
            context,
            question: question.to_string(),
        })
    }

    /// Appends the reply for `pending`. Returns false when the transcript has
    /// been reset since the question was asked; the reply is discarded.
    pub fn resolve(&mut self, pending: &PendingQuestion, reply: String) -> bool {
        if pending.generation != self.generation {
            debug!(
                asked_in = pending.generation,
                current = self.generation,
                "Discarding tutor reply for a reset transcript"
            );
            return false;
        }
        self.messages.push(ChatMessage::ai(reply));
        self.awaiting_reply = false;
        true
    }

    /// Clears the conversation, e.g. when the viewer leaves the player.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.awaiting_reply = false;
        self.generation += 1;
    }

    /// Asks and answers in one step for callers that own the transcript
    /// outright. Returns the text of the appended reply.
    pub async fn ask(
        &mut self,
        assistant: &AiAssistant,
        question: &str,
        context: String,
    ) -> Result<String, TutorError> {
        let pending = self.begin(question, context)?;
        let reply = assistant.ask_tutor(&pending.context, &pending.question).await;
        self.resolve(&pending, reply.clone());
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::TUTOR_FALLBACK;
    use crate::domain::ChatRole;
    use crate::fixtures::seed_courses;
    use crate::ports::PortError;
    use crate::testing::ScriptedCompletions;
    use std::sync::Arc;

    #[test]
    fn context_names_course_and_lesson() {
        let course = &seed_courses()[0];
        let context = lesson_context(course, &course.videos[1]);

        assert_eq!(
            context,
            "Course: Advanced React Architecture. Video: State Management Deep Dive. \
             Description: Comparing Redux vs Context vs Zustand."
        );
    }

    #[test]
    fn second_question_is_refused_while_first_is_outstanding() {
        let mut transcript = TutorTranscript::new();
        let pending = transcript.begin("first?", "ctx".to_string()).unwrap();

        assert_eq!(
            transcript.begin("second?", "ctx".to_string()),
            Err(TutorError::AwaitingReply)
        );
        assert!(transcript.resolve(&pending, "answer".to_string()));
        assert!(transcript.begin("second?", "ctx".to_string()).is_ok());
    }

    #[test]
    fn blank_question_is_ignored() {
        let mut transcript = TutorTranscript::new();
        assert_eq!(transcript.begin("  ", "ctx".to_string()), Err(TutorError::EmptyQuestion));
        assert!(transcript.messages().is_empty());
    }

    #[test]
    fn reply_after_reset_is_discarded() {
        let mut transcript = TutorTranscript::new();
        let pending = transcript.begin("hello?", "ctx".to_string()).unwrap();

        transcript.reset();

        assert!(!transcript.resolve(&pending, "late".to_string()));
        assert!(transcript.messages().is_empty());
        assert!(!transcript.is_awaiting_reply());
    }

    #[tokio::test]
    async fn failed_request_still_produces_exactly_one_reply() {
        let completions = Arc::new(ScriptedCompletions::new(vec![Err(PortError::Transport(
            "offline".to_string(),
        ))]));
        let assistant = AiAssistant::new(completions);
        let mut transcript = TutorTranscript::new();

        transcript
            .ask(&assistant, "Why Redux?", "ctx".to_string())
            .await
            .unwrap();

        assert_eq!(
            transcript.messages(),
            &[ChatMessage::user("Why Redux?"), ChatMessage::ai(TUTOR_FALLBACK)]
        );
        assert!(!transcript.is_awaiting_reply());
    }

    #[tokio::test]
    async fn messages_alternate_between_user_and_ai() {
        let completions = Arc::new(ScriptedCompletions::new(vec![
            Ok("one".to_string()),
            Err(PortError::Timeout(10)),
            Ok("three".to_string()),
        ]));
        let assistant = AiAssistant::new(completions);
        let mut transcript = TutorTranscript::new();

        for question in ["a?", "b?", "c?"] {
            transcript.ask(&assistant, question, "ctx".to_string()).await.unwrap();
        }

        let roles: Vec<ChatRole> = transcript.messages().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                ChatRole::User,
                ChatRole::Ai,
                ChatRole::User,
                ChatRole::Ai,
                ChatRole::User,
                ChatRole::Ai
            ]
        );
    }
}
