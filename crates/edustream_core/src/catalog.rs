//! crates/edustream_core/src/catalog.rs
//!
//! The in-memory course catalog and the text filter used by the home and
//! search views.

use crate::domain::Course;

/// The search term that stands for "no filter".
pub const SHOW_ALL: &str = "All";

/// The strip of quick search terms shown above the course grid.
pub const SUGGESTED_SEARCH_TERMS: [&str; 10] = [
    SHOW_ALL,
    "How to build React Apps",
    "Advanced Python Tips",
    "Generative AI Tutorials",
    "Mobile UI Design",
    "Machine Learning 101",
    "Business Growth Strategies",
    "Social Media Marketing",
    "Deep Learning",
    "Blockchain Dev",
];

/// Returns the courses whose title, author, category or description contains
/// `query`, ignoring case. An empty query or [`SHOW_ALL`] keeps every course.
/// Catalog order is preserved.
pub fn filter_courses<'a>(query: &str, catalog: &'a [Course]) -> Vec<&'a Course> {
    if query.is_empty() || query == SHOW_ALL {
        return catalog.iter().collect();
    }
    let needle = query.to_lowercase();
    catalog
        .iter()
        .filter(|course| {
            [&course.title, &course.author, &course.category, &course.description]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

/// The term highlighted in the suggestion strip for the stored query.
pub fn active_term(query: &str) -> &str {
    if query.is_empty() {
        SHOW_ALL
    } else {
        query
    }
}

/// Ordered collection of every course known to the process.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    courses: Vec<Course>,
}

impl Catalog {
    pub fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn find(&self, course_id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == course_id)
    }

    pub fn contains(&self, course_id: &str) -> bool {
        self.find(course_id).is_some()
    }

    /// Newly published courses go to the front of the catalog.
    pub fn prepend(&mut self, course: Course) {
        self.courses.insert(0, course);
    }

    pub fn filter(&self, query: &str) -> Vec<&Course> {
        filter_courses(query, &self.courses)
    }
}
