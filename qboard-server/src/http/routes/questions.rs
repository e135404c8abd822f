//! Question endpoints: list, create, vote, and moderation

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::QuestionRepo;
use crate::http::error::ApiError;
use crate::http::extractors::AdminToken;
use crate::http::server::AppState;
use crate::models::{ListOrder, Question, QuestionText};

/// List query parameters; both optional with spec'd defaults.
/// A malformed `order` value is rejected by the Query extractor as a 400.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ListParams {
    pub include_hidden: bool,
    pub order: ListOrder,
}

/// Create question request
#[derive(Deserialize)]
pub struct CreateQuestionRequest {
    pub text: String,
}

/// Question response
#[derive(Serialize)]
pub struct QuestionResponse {
    pub id: i64,
    pub text: String,
    pub votes: i64,
    pub hidden: bool,
    pub created_at: String,
}

impl From<Question> for QuestionResponse {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            text: q.text,
            votes: q.votes,
            hidden: q.hidden,
            created_at: q.created_at,
        }
    }
}

/// Vote response
#[derive(Serialize)]
pub struct VoteResponse {
    pub id: i64,
    pub votes: i64,
}

/// Delete confirmation
#[derive(Serialize)]
pub struct DeleteResponse {
    pub status: &'static str,
    pub deleted: i64,
}

/// GET /api/questions - list questions
async fn list_questions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<QuestionResponse>>, ApiError> {
    let questions = QuestionRepo::new(&state.pool)
        .list(params.include_hidden, params.order)
        .await?;

    Ok(Json(
        questions.into_iter().map(QuestionResponse::from).collect(),
    ))
}

/// POST /api/questions - submit a question
async fn create_question(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateQuestionRequest>,
) -> Result<(StatusCode, Json<QuestionResponse>), ApiError> {
    let text = QuestionText::new(&req.text)?;
    let question = QuestionRepo::new(&state.pool).create(text).await?;

    Ok((StatusCode::CREATED, Json(QuestionResponse::from(question))))
}

/// POST /api/questions/{id}/vote - upvote a visible question
async fn vote_question(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<VoteResponse>, ApiError> {
    let votes = QuestionRepo::new(&state.pool).vote(id).await?;
    Ok(Json(VoteResponse { id, votes }))
}

/// POST /api/questions/{id}/hide - moderate a question out of view
async fn hide_question(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    AdminToken(token): AdminToken,
) -> Result<Json<QuestionResponse>, ApiError> {
    state.admin.require(token.as_deref())?;
    let question = QuestionRepo::new(&state.pool).set_hidden(id, true).await?;
    Ok(Json(QuestionResponse::from(question)))
}

/// POST /api/questions/{id}/unhide - restore a hidden question
async fn unhide_question(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    AdminToken(token): AdminToken,
) -> Result<Json<QuestionResponse>, ApiError> {
    state.admin.require(token.as_deref())?;
    let question = QuestionRepo::new(&state.pool).set_hidden(id, false).await?;
    Ok(Json(QuestionResponse::from(question)))
}

/// DELETE /api/questions/{id} - permanently remove a question
async fn delete_question(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    AdminToken(token): AdminToken,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.admin.require(token.as_deref())?;
    QuestionRepo::new(&state.pool).delete(id).await?;
    Ok(Json(DeleteResponse {
        status: "ok",
        deleted: id,
    }))
}

/// Question routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/questions", get(list_questions).post(create_question))
        .route("/api/questions/{id}", delete(delete_question))
        .route("/api/questions/{id}/vote", post(vote_question))
        .route("/api/questions/{id}/hide", post(hide_question))
        .route("/api/questions/{id}/unhide", post(unhide_question))
}
