//! Open-ended farming questions answered by an OpenAI-compatible chat model.

use async_openai::config::OpenAIConfig;
use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use thiserror::Error;

use crate::config::AssistantConfig;
use crate::error::AppError;

/// Returned when the model answers with nothing usable.
pub const EMPTY_REPLY_FALLBACK: &str = "ಕ್ಷಮಿಸಿ, ನಾನು ಅರ್ಥಮಾಡಿಕೊಳ್ಳಲಿಲ್ಲ";

const MAX_TOKENS: u32 = 150;
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("AI API key not configured")]
    NotConfigured,
    #[error(transparent)]
    Upstream(#[from] OpenAIError),
}

impl From<AssistantError> for AppError {
    fn from(err: AssistantError) -> Self {
        match err {
            AssistantError::NotConfigured => AppError::AssistantNotConfigured,
            AssistantError::Upstream(e) => AppError::Upstream(e.to_string()),
        }
    }
}

#[async_trait]
pub trait Assistant: Send + Sync {
    async fn reply(&self, input: &str, language: &str) -> Result<String, AssistantError>;
}

pub struct OpenAiAssistant {
    client: Option<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiAssistant {
    pub fn new(config: &AssistantConfig) -> Self {
        let client = config
            .api_key
            .as_deref()
            .map(|key| Client::with_config(OpenAIConfig::new().with_api_key(key)));
        Self {
            client,
            model: config.model.clone(),
        }
    }
}

fn reply_language(language: &str) -> &'static str {
    if language.eq_ignore_ascii_case("english") {
        "English"
    } else {
        "Kannada (Kannada script)"
    }
}

pub fn system_prompt(language: &str) -> String {
    format!(
        "You are a helpful farming assistant for Karnataka farmers. Respond in {}.
Help farmers with:
- Weather and climate advice
- Soil and crop information
- Farming best practices
- Pest control
- Irrigation tips
- General farming queries

Keep responses concise (2-3 sentences max) and practical. Use simple words that farmers can understand.

If the user asks about:
- Weather for a location: Say you're fetching weather info and suggest they check the weather widget
- Soil analysis: Direct them to use the soil analysis feature by uploading a photo
- Crop information: Direct them to the crop info page for detailed information
- AI chat: Direct them to the AI chat page for more detailed conversations

Always be friendly and helpful.",
        reply_language(language)
    )
}

#[async_trait]
impl Assistant for OpenAiAssistant {
    async fn reply(&self, input: &str, language: &str) -> Result<String, AssistantError> {
        let client = self.client.as_ref().ok_or(AssistantError::NotConfigured)?;

        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system_prompt(language))
                .build()?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(input)
                .build()?
                .into(),
        ];
        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages(messages)
            .max_tokens(MAX_TOKENS)
            .temperature(TEMPERATURE)
            .build()?;

        let response = client.chat().create(request).await?;
        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_owned())
            .filter(|content| !content.is_empty())
            .unwrap_or_else(|| EMPTY_REPLY_FALLBACK.to_owned());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_follows_requested_language() {
        assert!(system_prompt("english").contains("Respond in English."));
        assert!(system_prompt("kannada").contains("Respond in Kannada (Kannada script)."));
        assert!(system_prompt("").contains("Kannada"));
    }

    #[tokio::test]
    async fn unconfigured_assistant_refuses() {
        let assistant = OpenAiAssistant::new(&AssistantConfig {
            api_key: None,
            model: "gpt-3.5-turbo".into(),
        });
        let err = assistant.reply("ಮಳೆ ಯಾವಾಗ?", "kannada").await.expect_err("no key");
        assert!(matches!(err, AssistantError::NotConfigured));
    }
}
