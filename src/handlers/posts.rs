use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::{error::AuthError, gate::AuthUser},
    error::AppError,
    moderation,
    models::post::{CreatePost, Post},
    AppState,
};

pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreatePost>,
) -> Result<(StatusCode, Json<Post>), AppError> {
    let body = moderation::clean_body(&payload.body)?;
    let now = Utc::now();

    let post = sqlx::query_as::<_, Post>(
        "INSERT INTO posts (id, created_at, updated_at, user_id, body) \
         VALUES (?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(now)
    .bind(now)
    .bind(user_id)
    .bind(&body)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(post)))
}

#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    pub author_id: Option<String>,
    pub sort: Option<String>,
}

pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<Vec<Post>>, AppError> {
    let mut posts = match query.author_id.as_deref() {
        None => {
            sqlx::query_as::<_, Post>("SELECT * FROM posts")
                .fetch_all(&state.db)
                .await?
        }
        Some(author_id) => {
            let author_id = Uuid::parse_str(author_id)
                .map_err(|_| AppError::BadRequest("Invalid author_id".to_string()))?;
            sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE user_id = ?")
                .bind(author_id)
                .fetch_all(&state.db)
                .await?
        }
    };

    match query.sort.as_deref() {
        Some("desc") => posts.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        _ => posts.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
    }

    Ok(Json(posts))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<Json<Post>, AppError> {
    let post_id = Uuid::parse_str(&post_id)
        .map_err(|_| AppError::BadRequest("Invalid post id".to_string()))?;

    let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = ?")
        .bind(post_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    Ok(Json(post))
}

pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(post_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let post_id = Uuid::parse_str(&post_id)
        .map_err(|_| AppError::BadRequest("Invalid post id".to_string()))?;

    let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = ?")
        .bind(post_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    // Authenticated is not enough: only the owner may delete.
    if post.user_id != user_id {
        return Err(AuthError::Forbidden.into());
    }

    sqlx::query("DELETE FROM posts WHERE id = ?")
        .bind(post_id)
        .execute(&state.db)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
