//! Modal overlay state machine.
//!
//! All transient overlays (errors, notices, confirmations, custom content)
//! go through one [`ModalProvider`] so that at most one is visible.
//!
//! ```text
//! Idle ──open──▶ Open ──close──▶ Closing ──750ms──▶ Idle
//!                 ▲  │                │
//!                 └──┘ open           └──open──▶ Open
//! navigation: any ──▶ Idle (no exit animation)
//! ```
//!
//! # Module Structure
//!
//! - `content`: What an overlay shows
//! - `state`: The tagged-union state and its pure transitions
//! - `provider`: The provider/handle pair, timer and event entry points

mod content;
mod provider;
mod state;

pub use content::{ModalContent, ModalVariant, DEFAULT_CLOSE_LABEL};
pub use provider::{
    CLOSE_ANIMATION_DELAY, CloseCallback, Confirmation, Key, ModalHandle, ModalProvider, Notice,
};
pub use state::{ModalDescriptor, ModalState};
