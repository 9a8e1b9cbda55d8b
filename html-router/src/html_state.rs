use common::create_template_engine;
use common::utils::config::AppConfig;
use common::utils::template_engine::{ProvidesTemplateEngine, TemplateEngine};
use std::sync::Arc;
use tracing::debug;

use crate::utils::chat_client::ChatClient;

#[derive(Clone)]
pub struct HtmlState {
    pub templates: Arc<TemplateEngine>,
    pub chat_client: ChatClient,
}

impl HtmlState {
    pub fn new_with_resources(
        config: &AppConfig,
        template_engine: Option<Arc<TemplateEngine>>,
    ) -> Self {
        let templates =
            template_engine.unwrap_or_else(|| Arc::new(create_template_engine!("templates")));
        debug!("Template engine configured for html_router.");

        let chat_client = ChatClient::new(config.chat_endpoint());
        debug!(endpoint = chat_client.endpoint(), "Page will post requests to chat endpoint");

        Self {
            templates,
            chat_client,
        }
    }
}

impl ProvidesTemplateEngine for HtmlState {
    fn template_engine(&self) -> &Arc<TemplateEngine> {
        &self.templates
    }
}
