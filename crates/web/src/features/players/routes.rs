use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use storage::Database;

use super::handlers::{
    claim_profile, create_player, delete_player, get_player, get_players_by_ids, list_players,
    update_player,
};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_player))
        .route("/:id", put(update_player).delete(delete_player))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_players))
        .route("/by-ids", post(get_players_by_ids))
        .route("/:id", get(get_player))
        .route("/:id/claim", post(claim_profile))
        .merge(protected)
}
