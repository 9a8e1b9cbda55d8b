pub mod chat_client;
pub mod result_view;
