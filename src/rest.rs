use std::sync::atomic::Ordering;

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{handlers, AppState};

pub fn router(state: AppState) -> Router {
    let app_files = Router::new()
        .nest_service("/app", ServeDir::new("."))
        .layer(middleware::from_fn_with_state(state.clone(), track_hits));

    Router::new()
        .route("/api/healthz", get(handlers::health::readiness))
        .route("/admin/metrics", get(handlers::admin::metrics))
        .route("/admin/reset", post(handlers::admin::reset))
        .route(
            "/api/users",
            post(handlers::users::create_user).put(handlers::users::update_user),
        )
        .route("/api/login", post(handlers::auth::login))
        .route("/api/refresh", post(handlers::auth::refresh))
        .route("/api/revoke", post(handlers::auth::revoke))
        .route(
            "/api/posts",
            post(handlers::posts::create_post).get(handlers::posts::list_posts),
        )
        .route(
            "/api/posts/:post_id",
            get(handlers::posts::get_post).delete(handlers::posts::delete_post),
        )
        .route(
            "/api/webhooks/payments",
            post(handlers::webhooks::payment_webhook),
        )
        .merge(app_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn track_hits(State(state): State<AppState>, request: Request, next: Next) -> Response {
    state.hits.fetch_add(1, Ordering::Relaxed);
    next.run(request).await
}
