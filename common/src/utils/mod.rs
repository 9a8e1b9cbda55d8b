pub mod config;
pub mod llm;
pub mod template_engine;
pub mod ticketing;
