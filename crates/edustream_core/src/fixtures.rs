//! crates/edustream_core/src/fixtures.rs
//!
//! Built-in seed data used when no seed document is configured.

use crate::domain::{Course, Role, User, Video};

const SAMPLE_CLIP_A: &str = "https://www.w3schools.com/html/mov_bbb.mp4";
const SAMPLE_CLIP_B: &str = "https://www.w3schools.com/html/movie.mp4";

fn video(id: &str, title: &str, description: &str, url: &str, duration: &str, order: u32) -> Video {
    Video {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        url: url.to_string(),
        duration: duration.to_string(),
        order,
    }
}

pub fn seed_user() -> User {
    User {
        id: "u1".to_string(),
        name: "Alex Johnson".to_string(),
        email: "alex@edustream.ai".to_string(),
        avatar: "https://picsum.photos/id/64/100/100".to_string(),
        role: Role::Instructor,
        enrolled_courses: vec!["c1".to_string()],
        owned_courses: vec!["c2".to_string()],
    }
}

pub fn seed_courses() -> Vec<Course> {
    vec![
        Course {
            id: "c1".to_string(),
            title: "Advanced React Architecture".to_string(),
            description: "Learn how to build scalable React applications with cutting-edge patterns and the Gemini AI API.".to_string(),
            thumbnail: "https://picsum.photos/id/1/800/450".to_string(),
            author: "Sarah Drasner".to_string(),
            category: "Development".to_string(),
            price: 49.99,
            rating: 4.8,
            enrolled_count: 1240,
            created_at: "2023-10-01".to_string(),
            videos: vec![
                video("v1", "Introduction to Architecture", "Overview of what we will build.", SAMPLE_CLIP_A, "12:05", 1),
                video("v2", "State Management Deep Dive", "Comparing Redux vs Context vs Zustand.", SAMPLE_CLIP_B, "24:15", 2),
            ],
        },
        Course {
            id: "c2".to_string(),
            title: "Generative AI for Designers".to_string(),
            description: "Master the art of prompt engineering and visual AI tools for modern design workflows.".to_string(),
            thumbnail: "https://picsum.photos/id/2/800/450".to_string(),
            author: "Alex Johnson".to_string(),
            category: "Design".to_string(),
            price: 0.0,
            rating: 4.9,
            enrolled_count: 3500,
            created_at: "2023-11-15".to_string(),
            videos: vec![video(
                "v3",
                "The Future of Design",
                "How AI is changing the landscape.",
                SAMPLE_CLIP_A,
                "15:30",
                1,
            )],
        },
        Course {
            id: "c3".to_string(),
            title: "Data Science with Python".to_string(),
            description: "A comprehensive guide from basics to advanced machine learning models.".to_string(),
            thumbnail: "https://picsum.photos/id/3/800/450".to_string(),
            author: "David Silver".to_string(),
            category: "Data Science".to_string(),
            price: 29.99,
            rating: 4.7,
            enrolled_count: 890,
            created_at: "2024-01-05".to_string(),
            videos: vec![
                video("v4", "Python Fundamentals", "Core basics for data science.", SAMPLE_CLIP_B, "45:00", 1),
                video("v5", "Working with DataFrames", "Loading, cleaning and reshaping tabular data.", SAMPLE_CLIP_A, "38:20", 2),
            ],
        },
    ]
}
