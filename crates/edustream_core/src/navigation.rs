//! crates/edustream_core/src/navigation.rs
//!
//! The view router: which screen is visible, the stored search query, and the
//! course currently open in the player.

use crate::catalog::{Catalog, SHOW_ALL};
use crate::domain::View;

/// The observable result of a routing intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: View,
    pub to: View,
    /// The viewport should jump back to the top.
    pub scroll_to_top: bool,
}

impl Transition {
    pub fn left_watch(&self) -> bool {
        self.from == View::Watch && self.to != View::Watch
    }
}

#[derive(Debug, Clone, Default)]
pub struct ViewRouter {
    view: View,
    search_query: String,
    selected_course: Option<String>,
}

impl ViewRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn selected_course(&self) -> Option<&str> {
        self.selected_course.as_deref()
    }

    /// Switches to `view`. Going home clears the search query.
    ///
    /// The watch view needs a selected course; without one the call is a no-op.
    pub fn navigate(&mut self, view: View) -> Option<Transition> {
        if view == View::Watch && self.selected_course.is_none() {
            return None;
        }
        let from = self.view;
        self.view = view;
        if view == View::Home {
            self.search_query.clear();
        }
        Some(Transition { from, to: view, scroll_to_top: true })
    }

    /// Stores a new search term. The [`SHOW_ALL`] sentinel is stored as an
    /// empty query. Searching from the dashboard or the player lands on home.
    pub fn search(&mut self, term: &str) -> Transition {
        let term = term.trim();
        self.search_query = if term == SHOW_ALL { String::new() } else { term.to_string() };

        let from = self.view;
        if !matches!(from, View::Home | View::Search) {
            self.view = View::Home;
        }
        Transition { from, to: self.view, scroll_to_top: from != self.view }
    }

    /// Opens a course in the player. Unknown ids leave the router untouched.
    pub fn select_course(&mut self, catalog: &Catalog, course_id: &str) -> Option<Transition> {
        if !catalog.contains(course_id) {
            return None;
        }
        let from = self.view;
        self.selected_course = Some(course_id.to_string());
        self.view = View::Watch;
        Some(Transition { from, to: View::Watch, scroll_to_top: true })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::seed_courses;

    fn catalog() -> Catalog {
        Catalog::new(seed_courses())
    }

    #[test]
    fn going_home_clears_the_query() {
        let mut router = ViewRouter::new();
        router.search("react");
        router.navigate(View::Search);
        assert_eq!(router.search_query(), "react");

        let transition = router.navigate(View::Home).unwrap();

        assert_eq!(router.search_query(), "");
        assert!(transition.scroll_to_top);
    }

    #[test]
    fn search_from_dashboard_forces_home() {
        let mut router = ViewRouter::new();
        router.navigate(View::Dashboard);

        let transition = router.search("Deep Learning");

        assert_eq!(router.view(), View::Home);
        assert_eq!(transition.from, View::Dashboard);
        assert_eq!(router.search_query(), "Deep Learning");
    }

    #[test]
    fn search_keeps_search_view() {
        let mut router = ViewRouter::new();
        router.navigate(View::Search);

        let transition = router.search(SHOW_ALL);

        assert_eq!(router.view(), View::Search);
        assert_eq!(router.search_query(), "");
        assert!(!transition.scroll_to_top);
    }

    #[test]
    fn selecting_unknown_course_is_a_noop() {
        let mut router = ViewRouter::new();
        router.navigate(View::Dashboard);

        assert!(router.select_course(&catalog(), "missing").is_none());
        assert_eq!(router.view(), View::Dashboard);
        assert!(router.selected_course().is_none());
    }

    #[test]
    fn selecting_known_course_opens_player() {
        let mut router = ViewRouter::new();

        let transition = router.select_course(&catalog(), "c2").unwrap();

        assert_eq!(router.view(), View::Watch);
        assert_eq!(router.selected_course(), Some("c2"));
        assert!(transition.scroll_to_top);

        let back = router.navigate(View::Home).unwrap();
        assert!(back.left_watch());
    }

    #[test]
    fn watch_requires_a_selection() {
        let mut router = ViewRouter::new();
        assert!(router.navigate(View::Watch).is_none());
        assert_eq!(router.view(), View::Home);
    }
}
