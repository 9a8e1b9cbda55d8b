use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse, Response},
    Extension,
};
use common::utils::template_engine::{ProvidesTemplateEngine, Value};
use minijinja::context;
use serde::Serialize;
use tracing::error;

#[derive(Clone, Debug)]
pub enum TemplateKind {
    Full(String),
    Partial(String, String),
    Error(StatusCode),
}

/// A handler's request to render a template. The actual rendering happens in
/// [`with_template_response`], which has access to the engine.
#[derive(Clone)]
pub struct TemplateResponse {
    template_kind: TemplateKind,
    context: Value,
}

impl TemplateResponse {
    pub fn new_template<T: Serialize>(name: impl Into<String>, context: T) -> Self {
        Self {
            template_kind: TemplateKind::Full(name.into()),
            context: Value::from_serialize(&context),
        }
    }

    pub fn new_partial<T: Serialize>(
        template: impl Into<String>,
        block: impl Into<String>,
        context: T,
    ) -> Self {
        Self {
            template_kind: TemplateKind::Partial(template.into(), block.into()),
            context: Value::from_serialize(&context),
        }
    }

    pub fn error(status: StatusCode, title: &str, description: &str) -> Self {
        Self {
            template_kind: TemplateKind::Error(status),
            context: context! {
                status_code => status.as_u16(),
                title => title,
                description => description
            },
        }
    }

    pub fn not_found() -> Self {
        Self::error(
            StatusCode::NOT_FOUND,
            "Page Not Found",
            "The page you're looking for doesn't exist.",
        )
    }
}

impl IntoResponse for TemplateResponse {
    fn into_response(self) -> Response {
        Extension(self).into_response()
    }
}

pub async fn with_template_response<S>(
    State(state): State<S>,
    req: Request,
    next: Next,
) -> Response
where
    S: ProvidesTemplateEngine + Clone + Send + Sync + 'static,
{
    let response = next.run(req).await;

    let Some(template_response) = response.extensions().get::<TemplateResponse>().cloned() else {
        return response;
    };
    let template_engine = state.template_engine();

    let (status, rendered) = match &template_response.template_kind {
        TemplateKind::Full(name) => (
            StatusCode::OK,
            template_engine
                .render(name, &template_response.context)
                .inspect_err(|e| error!("Failed to render template '{}': {:?}", name, e)),
        ),
        TemplateKind::Partial(template, block) => (
            StatusCode::OK,
            template_engine
                .render_block(template, block, &template_response.context)
                .inspect_err(|e| {
                    error!("Failed to render block '{}/{}': {:?}", template, block, e);
                }),
        ),
        TemplateKind::Error(status) => (
            *status,
            template_engine
                .render("errors/error.html", &template_response.context)
                .inspect_err(|e| error!("Critical: Failed to render 'errors/error.html': {:?}", e)),
        ),
    };

    match rendered {
        Ok(html) => (status, Html(html)).into_response(),
        Err(_) => {
            let status = if status.is_success() {
                StatusCode::INTERNAL_SERVER_ERROR
            } else {
                status
            };
            (status, Html(fallback_error())).into_response()
        }
    }
}

fn fallback_error() -> String {
    r#"
    <html>
        <body>
            <main>
                <h1>Error</h1>
                <p>Sorry, something went wrong displaying this page.</p>
            </main>
        </body>
    </html>
    "#
    .to_string()
}
