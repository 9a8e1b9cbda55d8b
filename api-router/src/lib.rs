use api_state::ApiState;
use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
use error::panic_response;
use routes::{chat::chat, liveness::live};
use tower_http::catch_panic::CatchPanicLayer;

pub mod api_state;
pub mod error;
mod routes;

/// Router for the chat API. Any panic inside a handler is turned into a 500
/// carrying the usual error envelope.
pub fn api_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    ApiState: FromRef<S>,
{
    catch_panics(
        Router::new()
            .route("/live", get(live))
            .route("/chat", post(chat)),
    )
}

fn catch_panics<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(CatchPanicLayer::custom(panic_response))
}
