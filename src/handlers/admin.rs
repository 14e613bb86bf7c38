use std::sync::atomic::Ordering;

use axum::{extract::State, response::Html};

use crate::{error::AppError, AppState};

pub async fn metrics(State(state): State<AppState>) -> Html<String> {
    let hits = state.hits.load(Ordering::Relaxed);
    Html(format!(
        "<html>\n<body>\n\t<h1>Welcome, Warbler Admin</h1>\n\t<p>Warbler has been visited {hits} times!</p>\n</body>\n</html>\n"
    ))
}

// Development escape hatch: zero the counter, and on a dev platform wipe
// all users (posts and refresh tokens cascade).
pub async fn reset(State(state): State<AppState>) -> Result<String, AppError> {
    state.hits.store(0, Ordering::Relaxed);

    if state.platform == "dev" {
        sqlx::query("DELETE FROM users").execute(&state.db).await?;
        tracing::info!("deleted all users");
    }

    Ok("Hits reset to 0".to_string())
}
