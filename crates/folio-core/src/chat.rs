// Chat session with the digital twin - in-memory transcript, one request per question
use async_trait::async_trait;
use folio_api::{GeminiClient, GeminiTurn};
use tracing::{debug, warn};

use crate::{
    config::ChatConfig,
    models::{ChatMessage, Profile, Project, Role},
    persona, Error, Result,
};

/// Anything that can answer a message given the prior transcript
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn reply(
        &self,
        system_instruction: &str,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<String>;
}

#[async_trait]
impl ChatBackend for GeminiClient {
    async fn reply(
        &self,
        system_instruction: &str,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<String> {
        let turns: Vec<GeminiTurn> = history
            .iter()
            .map(|m| GeminiTurn {
                role: m.role.as_str().to_string(),
                text: m.text.clone(),
            })
            .collect();

        self.generate(system_instruction, &turns, message)
            .await
            .map_err(|e| Error::ApiError(e.to_string()))
    }
}

/// Build the Gemini client described by `config`
pub fn gemini_backend(config: &ChatConfig) -> Result<GeminiClient> {
    let key = config.usable_api_key().ok_or_else(|| {
        Error::ChatUnavailable("no Gemini API key configured (set GEMINI_API_KEY)".into())
    })?;

    let client = GeminiClient::new(key, config.model.clone())
        .map_err(|e| Error::ChatUnavailable(e.to_string()))?
        .with_base_url(config.api_url.clone())
        .with_temperature(config.temperature);
    Ok(client)
}

/// Stands in for Gemini when no client could be built; every reply fails
pub struct UnavailableBackend {
    reason: String,
}

impl UnavailableBackend {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl ChatBackend for UnavailableBackend {
    async fn reply(&self, _: &str, _: &[ChatMessage], _: &str) -> Result<String> {
        Err(Error::ChatUnavailable(self.reason.clone()))
    }
}

/// Gemini when a usable key is configured, otherwise [`UnavailableBackend`]
/// so the session answers with the canned connection-trouble reply.
pub fn backend_for(config: &ChatConfig) -> Box<dyn ChatBackend> {
    match gemini_backend(config) {
        Ok(client) => Box::new(client),
        Err(e) => {
            warn!("{}", e);
            Box::new(UnavailableBackend::new(e.to_string()))
        }
    }
}

/// Transcript of one conversation. Never persisted.
pub struct ChatSession {
    profile: Profile,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(profile: Profile) -> Self {
        let greeting = ChatMessage::new(Role::Model, persona::greeting(&profile));
        Self {
            profile,
            messages: vec![greeting],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Ask one question. Returns `None` for blank input.
    ///
    /// Backend errors are logged and answered with a canned reply; the
    /// transcript always gains both the question and the answer.
    pub async fn ask(
        &mut self,
        backend: &dyn ChatBackend,
        message: &str,
        projects: &[Project],
    ) -> Option<String> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }

        let instruction = persona::system_instruction(&self.profile, projects);
        debug!("Asking backend with {} prior messages", self.messages.len());

        let reply = match backend.reply(&instruction, &self.messages, message).await {
            Ok(text) if text.trim().is_empty() => persona::EMPTY_REPLY.to_string(),
            Ok(text) => text,
            Err(e) => {
                warn!("Chat backend error: {}", e);
                persona::unreachable_reply(&self.profile)
            }
        };

        self.messages.push(ChatMessage::new(Role::User, message));
        self.messages.push(ChatMessage::new(Role::Model, reply.clone()));
        Some(reply)
    }
}
