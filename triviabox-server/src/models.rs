//! Domain records and per-endpoint request/response shapes
//!
//! Request structs keep required fields as `Option` so that handlers
//! decide between missing and empty input themselves instead of leaning
//! on extractor rejections.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A quiz item scoped to one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

/// A topical grouping for questions.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Categories keyed by id, serialized as the `{id: type}` object the
/// clients expect.
pub type CategoryMap = BTreeMap<i64, String>;

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateQuestionRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub difficulty: Option<i64>,
    pub category: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    pub quiz_category: Option<QuizCategory>,
    pub previous_questions: Option<Vec<i64>>,
}

/// Category selector for quiz play. Id 0 means all categories.
#[derive(Debug, Deserialize)]
pub struct QuizCategory {
    pub id: i64,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: CategoryMap,
}

/// Page of the unfiltered question bank, with the category map bundled
/// in for the list view.
#[derive(Debug, Serialize)]
pub struct QuestionsPage {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: CategoryMap,
    pub current_category: Option<i64>,
}

/// Filtered question listing (search results or one category).
#[derive(Debug, Serialize)]
pub struct QuestionList {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: Option<i64>,
}

/// Quiz draw result. `question` is null once the category is exhausted.
#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    pub question: Option<Question>,
}
