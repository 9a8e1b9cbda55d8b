mod handlers;

use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
pub use handlers::{not_found, show_index, submit_request};

use crate::html_state::HtmlState;

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    HtmlState: FromRef<S>,
{
    Router::new()
        .route("/", get(show_index))
        .route("/ask", post(submit_request))
}
