use std::future::Future;

use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_openai::{Client, config::OpenAIConfig};

use crate::config::RequestConfig;
use crate::error::ProviderError;

use super::prompt;

/// Sends a prompt to a model and returns the raw completion text.
///
/// The returned text is untrusted; it goes through [`super::parser::normalize`]
/// before anything is shown.
pub trait CompletionInvoker {
    fn invoke(
        &self,
        prompt: &str,
        model: &str,
    ) -> impl Future<Output = Result<String, ProviderError>> + Send;
}

pub struct AiClient {
    client: Client<OpenAIConfig>,
}

impl AiClient {
    pub fn new(config: &RequestConfig) -> Self {
        let mut openai_config = OpenAIConfig::new().with_api_key(config.api_key.clone());
        if let Some(base) = &config.api_base {
            openai_config = openai_config.with_api_base(base.clone());
        }

        Self {
            client: Client::with_config(openai_config),
        }
    }
}

impl CompletionInvoker for AiClient {
    async fn invoke(&self, user_prompt: &str, model: &str) -> Result<String, ProviderError> {
        let system_msg: ChatCompletionRequestMessage = ChatCompletionRequestSystemMessageArgs::default()
            .content(prompt::SYSTEM_PROMPT)
            .build()
            .map_err(classify_error)?
            .into();
        let user_msg: ChatCompletionRequestMessage = ChatCompletionRequestUserMessageArgs::default()
            .content(user_prompt)
            .build()
            .map_err(classify_error)?
            .into();

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(vec![system_msg, user_msg])
            .build()
            .map_err(classify_error)?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(classify_error)?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(ProviderError::EmptyResponse)
    }
}

fn classify_error(err: OpenAIError) -> ProviderError {
    match err {
        OpenAIError::ApiError(api) => classify_api_error(api.code.as_deref(), &api.message),
        OpenAIError::Reqwest(e) => ProviderError::Network(e.to_string()),
        other => ProviderError::Api(other.to_string()),
    }
}

/// Map an API error code onto the provider error kinds.
fn classify_api_error(code: Option<&str>, message: &str) -> ProviderError {
    let message = message.to_string();
    match code {
        Some("invalid_api_key" | "invalid_authentication" | "unauthorized") => {
            ProviderError::Auth(message)
        }
        Some("insufficient_quota" | "rate_limit_exceeded") => ProviderError::Quota(message),
        _ => ProviderError::Api(message),
    }
}
