use axum::routing::get;
use axum::Router;

use crate::handlers::listing;
use crate::state::AppState;

/// Mount `/apartments` routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/apartments", get(listing::list).post(listing::create))
        .route(
            "/apartments/{id}",
            get(listing::get_by_id)
                .patch(listing::update)
                .delete(listing::delete),
        )
}
