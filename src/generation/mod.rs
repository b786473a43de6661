//! Draft generation through an external text-generation service.
//!
//! Generation never touches persisted data. The result is applied to an
//! in-memory [`Draft`] only when it succeeds, so a failure leaves the draft as
//! it was.

mod gemini;

pub use gemini::*;

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::Draft;

/// Produces draft text for a topic.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, topic: &str) -> Result<String, AppError>;
}

/// Build the instruction sent to the generation service.
pub fn build_prompt(topic: &str) -> String {
    format!(
        "Write a short, aesthetic blog post about \"{}\". \
         The style should be personal, reflective, and calm. \
         Use Markdown formatting. \
         Include a blockquote somewhere.",
        topic
    )
}

/// Observable state of a draft generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationState {
    Idle,
    InFlight { topic: String },
    Completed(Result<String, AppError>),
}

/// Drives a single editor's generation requests.
pub struct DraftAssistant {
    generator: Arc<dyn ContentGenerator>,
    state: GenerationState,
}

impl DraftAssistant {
    pub fn new(generator: Arc<dyn ContentGenerator>) -> Self {
        Self {
            generator,
            state: GenerationState::Idle,
        }
    }

    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    /// Whether a new request may be started.
    pub fn can_submit(&self) -> bool {
        !matches!(self.state, GenerationState::InFlight { .. })
    }

    /// Move to in-flight for `topic`, returning the trimmed topic.
    pub fn begin(&mut self, topic: &str) -> Result<String, AppError> {
        if !self.can_submit() {
            return Err(AppError::Validation(
                "A draft is already being generated".to_string(),
            ));
        }

        let topic = topic.trim();
        if topic.is_empty() {
            return Err(AppError::Validation("Topic is required".to_string()));
        }

        self.state = GenerationState::InFlight {
            topic: topic.to_string(),
        };
        Ok(topic.to_string())
    }

    /// Record the outcome of the in-flight request.
    pub fn finish(&mut self, result: Result<String, AppError>) {
        self.state = GenerationState::Completed(result);
    }

    /// Generate text for `topic` and append it to `draft` on success.
    pub async fn generate_into(&mut self, topic: &str, draft: &mut Draft) -> Result<(), AppError> {
        let topic = self.begin(topic)?;
        tracing::info!("Generating draft for topic {:?}", topic);

        let result = self.generator.generate(&topic).await;
        self.finish(result.clone());

        match result {
            Ok(text) => {
                draft.apply_generated(&topic, &text);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Draft generation failed: {}", e);
                Err(e)
            }
        }
    }
}
