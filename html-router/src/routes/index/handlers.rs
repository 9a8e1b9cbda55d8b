use axum::{extract::State, response::IntoResponse, Form};
use axum_htmx::HxRequest;
use serde::{Deserialize, Serialize};

use crate::{
    html_state::HtmlState, middlewares::response_middleware::TemplateResponse,
    utils::result_view::ResultView,
};

const PAGE_TEMPLATE: &str = "index.html";
const RESULT_BLOCK: &str = "result";

#[derive(Serialize)]
pub struct IndexPageData {
    message: String,
    result: Option<ResultView>,
}

#[derive(Debug, Deserialize)]
pub struct AskForm {
    #[serde(default)]
    message: String,
}

pub async fn show_index() -> impl IntoResponse {
    TemplateResponse::new_template(
        PAGE_TEMPLATE,
        IndexPageData {
            message: String::new(),
            result: None,
        },
    )
}

/// Sends the form text to the chat endpoint. htmx requests get only the result
/// block back; plain form posts get the whole page.
pub async fn submit_request(
    State(state): State<HtmlState>,
    HxRequest(is_htmx): HxRequest,
    Form(form): Form<AskForm>,
) -> impl IntoResponse {
    let result = if form.message.trim().is_empty() {
        ResultView::empty_input()
    } else {
        state.chat_client.send(&form.message).await
    };

    let data = IndexPageData {
        message: form.message,
        result: Some(result),
    };

    if is_htmx {
        TemplateResponse::new_partial(PAGE_TEMPLATE, RESULT_BLOCK, data)
    } else {
        TemplateResponse::new_template(PAGE_TEMPLATE, data)
    }
}

pub async fn not_found() -> impl IntoResponse {
    TemplateResponse::not_found()
}
