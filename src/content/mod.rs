//! Sky content generation
//!
//! Builds the three prompts for a place and night and asks a generative text
//! provider for each. A failed prompt becomes an `Err` in its own field; the
//! other two are unaffected.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, instrument, warn};

use crate::Result;
use crate::models::{GeneratedText, GenerationFailure, SkyContent};

pub mod openai;

pub use openai::OpenAiCompletionClient;

/// A generative text provider
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Complete a prompt; the returned text is opaque display content
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// The three prompts asked for every report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkyPrompts {
    pub constellations: String,
    pub planets: String,
    pub events: String,
}

impl SkyPrompts {
    #[must_use]
    pub fn new(place_name: &str, date: NaiveDate) -> Self {
        let date_str = date.format("%Y-%m-%d");
        Self {
            constellations: format!(
                "Describe the constellations visible in {place_name} on {date_str}."
            ),
            planets: format!(
                "List the planets visible in {place_name} on {date_str} and provide brief details about them."
            ),
            events: format!(
                "Describe any upcoming celestial events visible in {place_name} around {date_str}."
            ),
        }
    }
}

/// Produces descriptive text through a [`TextProvider`]
#[derive(Clone)]
pub struct ContentGenerator {
    provider: Arc<dyn TextProvider>,
}

impl ContentGenerator {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self { provider }
    }

    /// Generate text for one prompt. Never propagates provider errors.
    #[instrument(skip(self))]
    pub async fn generate(&self, prompt: &str) -> GeneratedText {
        match self.provider.complete(prompt).await {
            Ok(text) => {
                debug!("Generated {} characters", text.len());
                Ok(text.trim().to_string())
            }
            Err(e) => {
                warn!("Text generation failed: {}", e);
                Err(GenerationFailure::new(e.to_string()))
            }
        }
    }

    /// Generate all three sky sections concurrently
    pub async fn generate_sky_content(&self, place_name: &str, date: NaiveDate) -> SkyContent {
        let prompts = SkyPrompts::new(place_name, date);

        let (constellations, planets, events) = tokio::join!(
            self.generate(&prompts.constellations),
            self.generate(&prompts.planets),
            self.generate(&prompts.events),
        );

        SkyContent {
            constellations,
            planets,
            events,
        }
    }
}
