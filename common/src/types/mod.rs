pub mod chat_response;
pub mod incident;
