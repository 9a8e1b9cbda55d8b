use anyhow::Context;
use api_router::{api_routes, api_state::ApiState};
use axum::{extract::FromRef, Router};
use common::utils::config::{get_config, AppConfig};
use html_router::{html_routes, html_state::HtmlState};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> anyhow::Result<()> {
    // Set up tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .try_init()
        .ok();

    let config = get_config().context("loading configuration")?;
    info!(
        model = %config.ollama_model,
        chat_endpoint = %config.chat_endpoint(),
        "Configuration loaded"
    );

    let app = build_app(&config)?;

    info!("Starting server listening on 0.0.0.0:{}", config.http_port);
    let serve_address = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&serve_address)
        .await
        .with_context(|| format!("binding {serve_address}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_app(config: &AppConfig) -> anyhow::Result<Router> {
    let api_state = ApiState::new(config).context("building chat api state")?;
    let html_state = HtmlState::new_with_resources(config, None);

    Ok(Router::new()
        .merge(api_routes())
        .merge(html_routes(&html_state))
        .with_state(AppState {
            api_state,
            html_state,
        }))
}

#[derive(Clone, FromRef)]
struct AppState {
    api_state: ApiState,
    html_state: HtmlState,
}
