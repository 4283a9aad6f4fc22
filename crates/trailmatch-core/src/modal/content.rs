//! Overlay content descriptors.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

pub const DEFAULT_CLOSE_LABEL: &str = "Close";

/// The three notice flavours sharing one layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum ModalVariant {
    Error,
    Success,
    Info,
}

impl ModalVariant {
    pub fn default_title(self) -> &'static str {
        match self {
            ModalVariant::Error => "Error",
            ModalVariant::Success => "Success",
            ModalVariant::Info => "Info",
        }
    }
}

/// What the overlay renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModalContent {
    /// Error/success/info notice with a single close button.
    Notice {
        variant: ModalVariant,
        title: String,
        message: String,
        close_label: String,
    },
    /// Yes/No question.
    Confirmation { title: String, message: String },
    /// Arbitrary caller-supplied content.
    Custom { body: String },
}

impl ModalContent {
    pub fn notice(
        variant: ModalVariant,
        message: impl Into<String>,
        title: Option<&str>,
        close_label: Option<&str>,
    ) -> Self {
        ModalContent::Notice {
            variant,
            title: title.unwrap_or(variant.default_title()).to_string(),
            message: message.into(),
            close_label: close_label.unwrap_or(DEFAULT_CLOSE_LABEL).to_string(),
        }
    }

    pub fn confirmation(message: impl Into<String>, title: Option<&str>) -> Self {
        ModalContent::Confirmation {
            title: title.unwrap_or("Confirm").to_string(),
            message: message.into(),
        }
    }

    pub fn custom(body: impl Into<String>) -> Self {
        ModalContent::Custom { body: body.into() }
    }

    /// Every piece of text the overlay displays, in reading order.
    pub fn displayed_text(&self) -> Vec<&str> {
        match self {
            ModalContent::Notice {
                title,
                message,
                close_label,
                ..
            } => vec![title.as_str(), message.as_str(), close_label.as_str()],
            ModalContent::Confirmation { title, message } => {
                vec![title.as_str(), message.as_str(), "Yes", "No"]
            }
            ModalContent::Custom { body } => vec![body.as_str()],
        }
    }
}
