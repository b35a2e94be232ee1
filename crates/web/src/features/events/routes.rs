use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use storage::Database;

use super::handlers::{
    create_event, delete_event, get_event, get_event_by_share_code, get_leaderboard, list_events,
    update_event,
};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_event))
        .route("/:id", put(update_event).delete(delete_event))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_events))
        .route("/share/:code", get(get_event_by_share_code))
        .route("/:id", get(get_event))
        .route("/:id/leaderboard", get(get_leaderboard))
        .merge(protected)
}
