use axum::{
    Router,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{clear_score, list_scores, upsert_score};

/// Score writes are authorized per request by the claimed profile, not by API key.
pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_scores))
        .route("/upsert", post(upsert_score))
        .route("/clear", post(clear_score))
}
