//! # Command Layer (Mutation Engine)
//!
//! This module is the **only writer** of a [`Sheet`](crate::model::Sheet). Each
//! submodule groups the state transitions for one concern, and every
//! transition is a plain function over `&mut Sheet`.
//!
//! ## Contract
//!
//! Commands are synchronous and total:
//! - They never return errors and never panic on bad targets.
//! - A referenced topic, subtopic or question that no longer exists turns the
//!   call into a no-op (it may have vanished between a UI event and its
//!   handling).
//! - They return `true` when the sheet changed and `false` for a no-op, so the
//!   API layer can skip persisting and log the skip.
//!
//! ## What Commands Do NOT Do
//!
//! - **Validation**: blank titles and tags are rejected at the API boundary.
//! - **I/O**: persistence is the API layer's job, after the command returns.
//! - **Clock access**: timer commands take `now` as an argument.
//!
//! ## Command Modules
//!
//! - [`topics`]: add / edit / delete / collapse topics
//! - [`subtopics`]: the same, scoped under a topic
//! - [`questions`]: add / edit / delete questions, favorites, notes
//! - [`tagging`]: add / remove tags on a question
//! - [`timer`]: start / stop / reset timers, completion toggle
//! - [`reorder`]: move entities within their parent at all three levels
//! - [`collapse`]: bulk collapse / expand
//! - [`lifecycle`]: seed, import, reset of the whole sheet

use serde::Serialize;

pub mod collapse;
pub mod lifecycle;
pub mod questions;
pub mod reorder;
pub mod subtopics;
pub mod tagging;
pub mod timer;
pub mod topics;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// Structured outcome of an API call, rendered by whichever UI is in front.
#[derive(Debug, Default)]
pub struct CmdResult {
    /// Whether the sheet changed (and was persisted).
    pub changed: bool,
    /// Id of an entity created by the call, if any.
    pub created_id: Option<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn changed(changed: bool) -> Self {
        Self {
            changed,
            ..Default::default()
        }
    }

    pub fn with_created_id(mut self, id: String) -> Self {
        self.created_id = Some(id);
        self
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }
}
