// src/services/conversation.rs
//
// Client-side conversation model: each event produces a new snapshot and,
// for a send, the request to dispatch to `/api/chat`.
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    message::{ChatReply, ChatRequest},
    services::profile::{Asset, ProfileField, UserProfile},
};

pub const GREETING: &str = "Hello! I'm InsureGuide AI. I can help simplify your policies, recommend coverage, or check for local risks like hail or floods. How can I help you today?";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
    #[serde(default)]
    pub is_error: bool,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            is_error: false,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            is_error: true,
        }
    }
}

/// Append-only message log.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    fn appended(&self, msg: ChatMessage) -> Self {
        let mut messages = self.messages.clone();
        messages.push(msg);
        Self { messages }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    EditField { field: ProfileField, value: String },
    ToggleAsset(Asset),
    SendMessage(String),
    ReplyReceived(ChatReply),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationState {
    pub profile: UserProfile,
    pub transcript: Transcript,
    pub is_loading: bool,
}

#[derive(Debug)]
pub struct Transition {
    pub state: ConversationState,
    /// Request to send, present only when a message was accepted.
    pub outbound: Option<ChatRequest>,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new(UserProfile::default())
    }
}

impl ConversationState {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            profile,
            transcript: Transcript::default().appended(ChatMessage::new(MessageRole::System, GREETING)),
            is_loading: false,
        }
    }

    pub fn can_send(&self, text: &str) -> bool {
        !self.is_loading && !text.trim().is_empty()
    }

    pub fn apply(&self, event: Event) -> Transition {
        match event {
            Event::EditField { field, value } => self.settled(ConversationState {
                profile: self.profile.with_field(field, &value),
                ..self.clone()
            }),

            Event::ToggleAsset(asset) => self.settled(ConversationState {
                profile: self.profile.with_asset_toggled(asset),
                ..self.clone()
            }),

            Event::SendMessage(text) => {
                if !self.can_send(&text) {
                    debug!(is_loading = self.is_loading, "Ignoring send");
                    return self.settled(self.clone());
                }

                let request = ChatRequest::new(text.clone(), self.profile.context());
                Transition {
                    state: ConversationState {
                        transcript: self
                            .transcript
                            .appended(ChatMessage::new(MessageRole::User, text)),
                        is_loading: true,
                        ..self.clone()
                    },
                    outbound: Some(request),
                }
            }

            Event::ReplyReceived(reply) => {
                let msg = match reply {
                    ChatReply::Reply { reply } => ChatMessage::new(MessageRole::Assistant, reply),
                    ChatReply::Error { error } => {
                        ChatMessage::error(format!(
                            "Connection Error: {error}. Is your backend server running on port 3000?"
                        ))
                    }
                };
                self.settled(ConversationState {
                    transcript: self.transcript.appended(msg),
                    is_loading: false,
                    ..self.clone()
                })
            }
        }
    }

    fn settled(&self, state: ConversationState) -> Transition {
        Transition {
            state,
            outbound: None,
        }
    }
}
