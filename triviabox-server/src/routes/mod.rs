//! Route handlers organized by resource

pub mod categories;
pub mod questions;
pub mod quizzes;

pub use categories::list_categories;
pub use questions::{
    create_question, delete_question, list_questions, questions_by_category, search_questions,
};
pub use quizzes::play_quiz;
