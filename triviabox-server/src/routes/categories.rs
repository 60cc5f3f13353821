//! Category routes

use axum::{extract::State, Json};

use crate::db::Database;
use crate::error::ApiResult;
use crate::models::CategoriesResponse;

/// GET /categories - all categories as an `{id: type}` map
pub async fn list_categories(
    State(db): State<Database>,
) -> ApiResult<Json<CategoriesResponse>> {
    let categories = db.category_map()?;
    Ok(Json(CategoriesResponse {
        success: true,
        categories,
    }))
}
