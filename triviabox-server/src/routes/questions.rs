//! Question routes - paginated listing, create, delete, search, and
//! category-scoped queries

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::db::Database;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    CreateQuestionRequest, QuestionList, QuestionsPage, SearchRequest, SuccessResponse,
};
use crate::paging::page_slice;

/// Category ids accepted by the category-scoped listing. Static
/// configuration, deliberately independent of the categories table.
pub const KNOWN_CATEGORY_IDS: &[i64] = &[1, 2, 3, 4, 5, 6];

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}

/// GET /questions?page=N - one page of the full question bank
pub async fn list_questions(
    State(db): State<Database>,
    Query(params): Query<PageQuery>,
) -> ApiResult<Json<QuestionsPage>> {
    let questions = db.list_questions()?;
    let categories = db.category_map()?;

    let page = params.page.unwrap_or(1);
    let page_items = page_slice(&questions, page).to_vec();

    Ok(Json(QuestionsPage {
        success: true,
        total_questions: questions.len(),
        questions: page_items,
        categories,
        current_category: None,
    }))
}

/// DELETE /questions/{id}
pub async fn delete_question(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> ApiResult<Json<SuccessResponse>> {
    if !db.delete_question(id)? {
        return Err(ApiError::Unprocessable);
    }

    Ok(Json(SuccessResponse { success: true }))
}

/// POST /questions - add a question to the bank
pub async fn create_question(
    State(db): State<Database>,
    Json(req): Json<CreateQuestionRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    let question = req
        .question
        .as_deref()
        .filter(|q| !q.is_empty())
        .ok_or(ApiError::BadRequest)?;
    let answer = req
        .answer
        .as_deref()
        .filter(|a| !a.is_empty())
        .ok_or(ApiError::BadRequest)?;
    let difficulty = req.difficulty.ok_or(ApiError::BadRequest)?;
    let category = req.category.ok_or(ApiError::BadRequest)?;

    db.insert_question(question, answer, category, difficulty)?;
    Ok(Json(SuccessResponse { success: true }))
}

/// POST /questions/search - substring match on the question text
pub async fn search_questions(
    State(db): State<Database>,
    Json(req): Json<SearchRequest>,
) -> ApiResult<Json<QuestionList>> {
    let term = req
        .search_term
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or(ApiError::BadRequest)?;

    let questions = db.search_questions(term)?;
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(QuestionList {
        success: true,
        total_questions: questions.len(),
        questions,
        current_category: None,
    }))
}

/// GET /categories/{id}/questions?page=N
pub async fn questions_by_category(
    State(db): State<Database>,
    Path(category_id): Path<i64>,
    Query(params): Query<PageQuery>,
) -> ApiResult<Json<QuestionList>> {
    if !KNOWN_CATEGORY_IDS.contains(&category_id) {
        return Err(ApiError::BadRequest);
    }

    // Emptiness is checked on the full category set, before slicing; a
    // category with questions but an out-of-range page is still a
    // success with an empty page.
    let questions = db.questions_in_category(category_id)?;
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }

    let page = params.page.unwrap_or(1);
    let page_items = page_slice(&questions, page).to_vec();

    Ok(Json(QuestionList {
        success: true,
        total_questions: questions.len(),
        questions: page_items,
        current_category: Some(category_id),
    }))
}
