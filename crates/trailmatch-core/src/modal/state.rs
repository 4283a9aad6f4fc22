//! Modal state and pure transitions.

use serde::Serialize;

use super::content::ModalContent;

/// The provider's single piece of state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", content = "content")]
pub enum ModalState {
    #[default]
    Idle,
    Open(ModalContent),
    /// Content is gone; the exit overlay is still showing.
    Closing,
}

/// Render-facing view of the state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModalDescriptor {
    pub content: Option<ModalContent>,
    pub is_closing: bool,
}

impl ModalState {
    /// Open always wins, whatever was showing before.
    pub fn open(content: ModalContent) -> Self {
        ModalState::Open(content)
    }

    /// `Some(Closing)` from Open; `None` when there is nothing to close.
    pub fn close(&self) -> Option<Self> {
        match self {
            ModalState::Open(_) => Some(ModalState::Closing),
            ModalState::Idle | ModalState::Closing => None,
        }
    }

    /// `Some(Idle)` once the exit animation ends.
    pub fn finish_closing(&self) -> Option<Self> {
        match self {
            ModalState::Closing => Some(ModalState::Idle),
            _ => None,
        }
    }

    pub fn content(&self) -> Option<&ModalContent> {
        match self {
            ModalState::Open(content) => Some(content),
            _ => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ModalState::Open(_))
    }

    pub fn descriptor(&self) -> Option<ModalDescriptor> {
        match self {
            ModalState::Idle => None,
            ModalState::Open(content) => Some(ModalDescriptor {
                content: Some(content.clone()),
                is_closing: false,
            }),
            ModalState::Closing => Some(ModalDescriptor {
                content: None,
                is_closing: true,
            }),
        }
    }
}
