mod mock_model_client;
mod openai_model_client;

pub use mock_model_client::MockModelClient;
pub use openai_model_client::OpenAiModelClient;
