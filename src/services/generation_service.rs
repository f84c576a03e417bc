use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::Rng;
use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::{
    config::Config,
    constants::prompts::{build_generation_prompt, QUESTION_GENERATOR_ROLE},
    errors::{AppError, AppResult},
};

/// A question as produced by the generator, with its options already
/// shuffled and the correct index tracking the right answer.
#[derive(Debug, Clone)]
pub struct GeneratedQuestion {
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_index: i32,
    pub explanation: String,
}

/// The question-generation collaborator. The prompting protocol behind it is
/// deliberately opaque to the rest of the system.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(
        &self,
        source_text: &str,
        category: &str,
        count: u8,
    ) -> AppResult<Vec<GeneratedQuestion>>;
}

/// Raw model output shape: the correct answer is always the first field, so
/// options are reshuffled before anything is persisted.
#[derive(Debug, Deserialize)]
struct RawGeneratedQuestion {
    #[serde(rename = "questionText")]
    question_text: String,
    #[serde(rename = "correctAnswer")]
    correct_answer: String,
    option2: String,
    option3: String,
    option4: String,
    #[serde(default)]
    explanation: String,
}

pub struct OpenAiQuestionGenerator {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiQuestionGenerator {
    pub fn new(config: &Config) -> Self {
        let openai_config =
            OpenAIConfig::new().with_api_key(config.openai_api_key.expose_secret());

        Self {
            client: Client::with_config(openai_config),
            model: config.generation_model.clone(),
        }
    }
}

#[async_trait]
impl QuestionGenerator for OpenAiQuestionGenerator {
    async fn generate(
        &self,
        source_text: &str,
        category: &str,
        count: u8,
    ) -> AppResult<Vec<GeneratedQuestion>> {
        let system_message = ChatCompletionRequestSystemMessageArgs::default()
            .content(QUESTION_GENERATOR_ROLE)
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build prompt: {}", e)))?;

        let user_message = ChatCompletionRequestUserMessageArgs::default()
            .content(build_generation_prompt(source_text, category, count))
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build prompt: {}", e)))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages([system_message.into(), user_message.into()])
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build request: {}", e)))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AppError::InternalError(format!("Question generation failed: {}", e)))?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| {
                AppError::InternalError("Question generation returned no content".to_string())
            })?;

        log::debug!("Generator returned {} bytes of content", content.len());

        parse_generated_questions(&content, &mut rand::thread_rng())
    }
}

/// Parses the model's JSON array (tolerating markdown code fences) and
/// shuffles each question's options so the correct answer is not always in
/// the same slot.
pub fn parse_generated_questions<R: Rng>(
    raw: &str,
    rng: &mut R,
) -> AppResult<Vec<GeneratedQuestion>> {
    let cleaned = raw.replace("```json", "").replace("```", "");
    let cleaned = cleaned.trim();

    let parsed: Vec<RawGeneratedQuestion> = serde_json::from_str(cleaned).map_err(|e| {
        AppError::InternalError(format!("Generated questions were not valid JSON: {}", e))
    })?;

    let questions = parsed
        .into_iter()
        .map(|raw| {
            let mut options = vec![
                raw.correct_answer.clone(),
                raw.option2,
                raw.option3,
                raw.option4,
            ];
            options.shuffle(rng);

            let correct_index = options
                .iter()
                .position(|option| *option == raw.correct_answer)
                .unwrap_or(0) as i32;

            GeneratedQuestion {
                question_text: raw.question_text,
                options,
                correct_index,
                explanation: raw.explanation,
            }
        })
        .collect();

    Ok(questions)
}
