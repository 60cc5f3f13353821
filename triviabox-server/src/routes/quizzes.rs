//! Quiz route - draw the next question for a play session

use axum::{extract::State, Json};

use crate::db::Database;
use crate::error::{ApiError, ApiResult};
use crate::models::{QuizRequest, QuizResponse};
use crate::quiz;

/// POST /quizzes - one random question outside the already-asked set
pub async fn play_quiz(
    State(db): State<Database>,
    Json(req): Json<QuizRequest>,
) -> ApiResult<Json<QuizResponse>> {
    let category = req.quiz_category.ok_or(ApiError::BadRequest)?;
    let previous = req.previous_questions.ok_or(ApiError::BadRequest)?;

    let pool = if category.id == 0 {
        db.list_questions()?
    } else {
        db.questions_in_category(category.id)?
    };

    Ok(Json(QuizResponse {
        success: true,
        question: quiz::draw(pool, &previous),
    }))
}
