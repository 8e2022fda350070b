//! crates/edustream_core/src/access.rs
//!
//! Enrollment gating. A priced course is only playable once the user has
//! enrolled in it; before that the first lesson is shown as a locked preview
//! and the rest are locked outright.

use serde::Serialize;

use crate::domain::{Course, User};

/// How a single lesson is presented to the current user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoAccess {
    Playable,
    /// Listed as the course preview, but the player stays behind the paywall.
    PreviewLocked,
    Locked,
}

impl VideoAccess {
    pub fn is_playable(self) -> bool {
        matches!(self, VideoAccess::Playable)
    }
}

/// True when the course is free or the user holds an enrollment for it.
pub fn has_full_access(course: &Course, user: &User) -> bool {
    course.is_free() || user.is_enrolled(&course.id)
}

pub fn video_access(course: &Course, user: &User, video_index: usize) -> VideoAccess {
    if video_index >= course.videos.len() {
        return VideoAccess::Locked;
    }
    if has_full_access(course, user) {
        VideoAccess::Playable
    } else if video_index == 0 {
        VideoAccess::PreviewLocked
    } else {
        VideoAccess::Locked
    }
}

pub fn can_play(course: &Course, user: &User, video_index: usize) -> bool {
    video_access(course, user, video_index).is_playable()
}

/// Access for every lesson, in course order.
pub fn course_access(course: &Course, user: &User) -> Vec<VideoAccess> {
    (0..course.videos.len())
        .map(|index| video_access(course, user, index))
        .collect()
}

/// The tutor chat is gated exactly like the player.
pub fn can_chat(course: &Course, user: &User) -> bool {
    has_full_access(course, user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{seed_courses, seed_user};

    fn student() -> User {
        User {
            enrolled_courses: Vec::new(),
            ..seed_user()
        }
    }

    fn course(id: &str) -> Course {
        seed_courses()
            .into_iter()
            .find(|c| c.id == id)
            .expect("fixture course")
    }

    #[test]
    fn free_course_is_fully_playable_without_enrollment() {
        let free = course("c2");
        let user = student();

        assert!(course_access(&free, &user).iter().all(|a| a.is_playable()));
        assert!(can_chat(&free, &user));
    }

    #[test]
    fn priced_course_previews_first_lesson_and_locks_the_rest() {
        let priced = course("c3");
        let user = student();

        assert_eq!(
            course_access(&priced, &user),
            vec![VideoAccess::PreviewLocked, VideoAccess::Locked]
        );
        assert!(!can_play(&priced, &user, 0));
        assert!(!can_play(&priced, &user, 1));
        assert!(!can_chat(&priced, &user));
    }

    #[test]
    fn enrollment_unlocks_every_lesson() {
        let priced = course("c3");
        let mut user = student();
        user.enrolled_courses.push("c3".to_string());

        assert!(can_play(&priced, &user, 0));
        assert!(can_play(&priced, &user, 1));
    }

    #[test]
    fn out_of_range_index_is_never_playable() {
        let free = course("c2");
        assert_eq!(video_access(&free, &seed_user(), 7), VideoAccess::Locked);
    }
}
