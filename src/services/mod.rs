mod evaluator;
mod openrouter_client_http;
pub mod prompt_builder;
pub mod response_extractor;

pub use evaluator::Evaluator;
pub use openrouter_client_http::HttpChatClient;
