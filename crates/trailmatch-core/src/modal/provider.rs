//! Modal provider, handle and event entry points.
//!
//! The [`ModalProvider`] is created once at the composition root and owns
//! the state. Components receive cheap [`ModalHandle`] clones. A handle that
//! outlives its provider fails every call with
//! [`TrailmatchError::Internal`]: that is a wiring bug, not a runtime
//! condition.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::sync::{oneshot, watch};

use super::content::{ModalContent, ModalVariant};
use super::state::{ModalDescriptor, ModalState};
use crate::error::{Result, TrailmatchError};

/// How long the exit overlay stays up after `close_modal`.
pub const CLOSE_ANIMATION_DELAY: Duration = Duration::from_millis(750);

/// Runs once, after a notice's close button closes it.
pub type CloseCallback = Box<dyn FnOnce() + Send + 'static>;

/// Keyboard input routed to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Other(String),
}

/// Behaviour attached to the visible content but not part of what renders.
#[derive(Default)]
struct Attachments {
    on_close: Option<CloseCallback>,
    confirmation: Option<oneshot::Sender<bool>>,
}

impl Attachments {
    /// Settles a pending confirmation as declined. The close callback is
    /// dropped without running.
    fn dismiss(self) {
        if let Some(sender) = self.confirmation {
            let _ = sender.send(false);
        }
    }
}

struct Inner {
    state: ModalState,
    /// Bumped on every state change; a close timer only fires for the
    /// generation it was armed in.
    generation: u64,
    attachments: Attachments,
}

struct Shared {
    inner: Mutex<Inner>,
    notifier: watch::Sender<ModalState>,
    close_delay: Duration,
}

impl Shared {
    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|e| TrailmatchError::internal(format!("Failed to lock modal state: {}", e)))
    }

    fn set(&self, inner: &mut Inner, state: ModalState) {
        inner.generation += 1;
        inner.state = state.clone();
        self.notifier.send_replace(state);
    }

    fn finish_closing(&self, generation: u64) {
        let mut inner = match self.lock() {
            Ok(inner) => inner,
            Err(e) => {
                tracing::error!("[Modal] {}", e);
                return;
            }
        };
        if inner.generation != generation {
            tracing::debug!("[Modal] Ignoring stale close timer (generation {})", generation);
            return;
        }
        if let Some(next) = inner.state.finish_closing() {
            self.set(&mut inner, next);
        }
    }
}

/// Owner of the single modal slot.
pub struct ModalProvider {
    shared: Arc<Shared>,
}

impl Default for ModalProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalProvider {
    pub fn new() -> Self {
        Self::with_close_delay(CLOSE_ANIMATION_DELAY)
    }

    pub fn with_close_delay(close_delay: Duration) -> Self {
        let (notifier, _) = watch::channel(ModalState::Idle);
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    state: ModalState::Idle,
                    generation: 0,
                    attachments: Attachments::default(),
                }),
                notifier,
                close_delay,
            }),
        }
    }

    pub fn handle(&self) -> ModalHandle {
        ModalHandle {
            shared: Arc::downgrade(&self.shared),
        }
    }

    /// Receives every state change, for renderers.
    pub fn subscribe(&self) -> watch::Receiver<ModalState> {
        self.shared.notifier.subscribe()
    }

    pub fn state(&self) -> ModalState {
        self.shared.notifier.borrow().clone()
    }

    pub fn snapshot(&self) -> Option<ModalDescriptor> {
        self.state().descriptor()
    }

    /// The document-level escape listener exists only while content is open.
    pub fn escape_listener_active(&self) -> bool {
        self.state().is_open()
    }
}

/// A notice to show through [`ModalHandle::show`].
pub struct Notice {
    variant: ModalVariant,
    message: String,
    title: Option<String>,
    close_label: Option<String>,
    on_close: Option<CloseCallback>,
}

impl Notice {
    pub fn new(variant: ModalVariant, message: impl Into<String>) -> Self {
        Self {
            variant,
            message: message.into(),
            title: None,
            close_label: None,
            on_close: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ModalVariant::Error, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ModalVariant::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ModalVariant::Info, message)
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn close_label(mut self, label: impl Into<String>) -> Self {
        self.close_label = Some(label.into());
        self
    }

    /// Runs after the close button closes the modal.
    pub fn on_close(mut self, callback: impl FnOnce() + Send + 'static) -> Self {
        self.on_close = Some(Box::new(callback));
        self
    }
}

/// Answer to a confirmation modal.
///
/// Resolves exactly once: `true` for Yes, `false` for No, and `false` when
/// the modal goes away any other way (escape, navigation, replacement, or
/// the provider being dropped).
#[must_use = "a confirmation does nothing unless awaited"]
pub struct Confirmation {
    receiver: oneshot::Receiver<bool>,
}

impl Future for Confirmation {
    type Output = bool;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<bool> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|answer| answer.unwrap_or(false))
    }
}

/// Cloneable access to a [`ModalProvider`].
#[derive(Clone)]
pub struct ModalHandle {
    shared: Weak<Shared>,
}

impl ModalHandle {
    fn shared(&self) -> Result<Arc<Shared>> {
        self.shared.upgrade().ok_or_else(|| {
            TrailmatchError::internal("modal handle used outside of its ModalProvider")
        })
    }

    /// Replaces whatever is showing. The replaced content's close callback
    /// does not run.
    pub fn open_modal(&self, content: ModalContent) -> Result<()> {
        self.open_with(content, Attachments::default())
    }

    fn open_with(&self, content: ModalContent, attachments: Attachments) -> Result<()> {
        let shared = self.shared()?;
        let replaced = {
            let mut inner = shared.lock()?;
            let replaced = std::mem::replace(&mut inner.attachments, attachments);
            shared.set(&mut inner, ModalState::open(content));
            replaced
        };
        replaced.dismiss();
        Ok(())
    }

    /// Open → Closing, then Idle after the exit animation. A no-op unless
    /// content is open.
    pub fn close_modal(&self) -> Result<()> {
        self.close_detached()?.dismiss();
        Ok(())
    }

    fn close_detached(&self) -> Result<Attachments> {
        let shared = self.shared()?;
        let (generation, detached) = {
            let mut inner = shared.lock()?;
            let Some(next) = inner.state.close() else {
                return Ok(Attachments::default());
            };
            let detached = std::mem::take(&mut inner.attachments);
            shared.set(&mut inner, next);
            (inner.generation, detached)
        };
        Self::schedule_idle(&shared, generation);
        Ok(detached)
    }

    fn schedule_idle(shared: &Arc<Shared>, generation: u64) {
        let weak = Arc::downgrade(shared);
        let delay = shared.close_delay;
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(async move {
                    tokio::time::sleep(delay).await;
                    if let Some(shared) = weak.upgrade() {
                        shared.finish_closing(generation);
                    }
                });
            }
            Err(_) => {
                tracing::debug!("[Modal] No runtime for close timer, closing immediately");
                shared.finish_closing(generation);
            }
        }
    }

    pub fn show(&self, notice: Notice) -> Result<()> {
        let content = ModalContent::notice(
            notice.variant,
            notice.message,
            notice.title.as_deref(),
            notice.close_label.as_deref(),
        );
        let attachments = Attachments {
            on_close: notice.on_close,
            confirmation: None,
        };
        self.open_with(content, attachments)
    }

    /// Error notice. `on_close` runs after the close button closes it;
    /// `close_label` overrides "Close".
    pub fn show_error_modal(
        &self,
        message: impl Into<String>,
        title: Option<&str>,
        on_close: Option<CloseCallback>,
        close_label: Option<&str>,
    ) -> Result<()> {
        self.show(customize(Notice::error(message), title, on_close, close_label))
    }

    pub fn show_success_modal(
        &self,
        message: impl Into<String>,
        title: Option<&str>,
        on_close: Option<CloseCallback>,
        close_label: Option<&str>,
    ) -> Result<()> {
        self.show(customize(Notice::success(message), title, on_close, close_label))
    }

    pub fn show_info_modal(
        &self,
        message: impl Into<String>,
        title: Option<&str>,
        on_close: Option<CloseCallback>,
        close_label: Option<&str>,
    ) -> Result<()> {
        self.show(customize(Notice::info(message), title, on_close, close_label))
    }

    /// Shows a Yes/No question and returns the pending answer.
    pub fn show_confirmation_modal(
        &self,
        message: impl Into<String>,
        title: Option<&str>,
    ) -> Result<Confirmation> {
        let (sender, receiver) = oneshot::channel();
        let attachments = Attachments {
            on_close: None,
            confirmation: Some(sender),
        };
        self.open_with(ModalContent::confirmation(message, title), attachments)?;
        Ok(Confirmation { receiver })
    }

    /// The notice's close button: close, then the caller's callback.
    pub fn press_close(&self) -> Result<()> {
        let detached = self.close_detached()?;
        if let Some(sender) = detached.confirmation {
            let _ = sender.send(false);
        }
        if let Some(on_close) = detached.on_close {
            on_close();
        }
        Ok(())
    }

    /// The confirmation's Yes (`true`) or No (`false`) button.
    pub fn respond(&self, answer: bool) -> Result<()> {
        let shared = self.shared()?;
        let sender = {
            let mut inner = shared.lock()?;
            if !matches!(inner.state.content(), Some(ModalContent::Confirmation { .. })) {
                return Ok(());
            }
            inner.attachments.confirmation.take()
        };
        if let Some(sender) = sender {
            let _ = sender.send(answer);
        }
        self.close_modal()
    }

    /// Escape closes open content like the cancel path does.
    pub fn handle_key(&self, key: &Key) -> Result<()> {
        if *key != Key::Escape {
            return Ok(());
        }
        let shared = self.shared()?;
        let is_open = shared.lock()?.state.is_open();
        if is_open {
            tracing::debug!("[Modal] Escape pressed, closing");
            self.close_modal()?;
        }
        Ok(())
    }

    /// Page navigation started: drop straight to Idle with no exit animation.
    pub fn handle_navigation(&self) -> Result<()> {
        let shared = self.shared()?;
        let detached = {
            let mut inner = shared.lock()?;
            let detached = std::mem::take(&mut inner.attachments);
            if inner.state != ModalState::Idle {
                shared.set(&mut inner, ModalState::Idle);
            }
            detached
        };
        detached.dismiss();
        Ok(())
    }
}

fn customize(
    mut notice: Notice,
    title: Option<&str>,
    on_close: Option<CloseCallback>,
    close_label: Option<&str>,
) -> Notice {
    if let Some(title) = title {
        notice = notice.title(title);
    }
    if let Some(label) = close_label {
        notice = notice.close_label(label);
    }
    if on_close.is_some() {
        notice.on_close = on_close;
    }
    notice
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn open_content(provider: &ModalProvider) -> ModalContent {
        provider
            .state()
            .content()
            .cloned()
            .expect("modal should be open")
    }

    #[tokio::test]
    async fn test_variants_render_message_title_and_label() {
        let provider = ModalProvider::new();
        let modal = provider.handle();

        for variant in [ModalVariant::Error, ModalVariant::Success, ModalVariant::Info] {
            modal
                .show(Notice::new(variant, "Something happened").title("Heads up"))
                .unwrap();
            let content = open_content(&provider);
            let text = content.displayed_text();
            assert!(text.contains(&"Something happened"));
            assert!(text.contains(&"Heads up"));
            assert!(text.contains(&"Close"));
        }

        modal
            .show(Notice::error("Upload failed").close_label("Dismiss"))
            .unwrap();
        let content = open_content(&provider);
        assert!(content.displayed_text().contains(&"Dismiss"));
        assert!(content.displayed_text().contains(&"Error"));
    }

    #[tokio::test]
    async fn test_confirmation_yes_and_no() {
        let provider = ModalProvider::new();
        let modal = provider.handle();

        let answer = modal
            .show_confirmation_modal("Delete your profile?", None)
            .unwrap();
        modal.respond(true).unwrap();
        assert!(answer.await);
        assert_eq!(provider.state(), ModalState::Closing);

        let answer = modal
            .show_confirmation_modal("Delete your profile?", Some("Careful"))
            .unwrap();
        modal.respond(false).unwrap();
        assert!(!answer.await);
    }

    #[tokio::test]
    async fn test_confirmation_resolves_once() {
        let provider = ModalProvider::new();
        let modal = provider.handle();

        let answer = modal.show_confirmation_modal("Sure?", None).unwrap();
        modal.respond(true).unwrap();
        // The second click lands on a closing modal and changes nothing.
        modal.respond(false).unwrap();
        assert!(answer.await);
    }

    #[tokio::test]
    async fn test_escape_declines_confirmation() {
        let provider = ModalProvider::new();
        let modal = provider.handle();

        let answer = modal.show_confirmation_modal("Leave chat?", None).unwrap();
        assert!(provider.escape_listener_active());
        modal.handle_key(&Key::Escape).unwrap();
        assert!(!answer.await);
        assert!(!provider.escape_listener_active());
    }

    #[tokio::test]
    async fn test_other_keys_are_ignored() {
        let provider = ModalProvider::new();
        let modal = provider.handle();

        modal.show_info_modal("Saved drafts", None, None, None).unwrap();
        modal.handle_key(&Key::Enter).unwrap();
        modal.handle_key(&Key::Other("a".to_string())).unwrap();
        assert!(provider.state().is_open());
    }

    #[tokio::test]
    async fn test_open_replaces_without_close_callback() {
        let provider = ModalProvider::new();
        let modal = provider.handle();
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        modal
            .show(Notice::info("first").on_close(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }))
            .unwrap();
        modal.open_modal(ModalContent::custom("second")).unwrap();

        assert_eq!(open_content(&provider), ModalContent::custom("second"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_close_button_runs_callback_after_closing() {
        let provider = ModalProvider::new();
        let modal = provider.handle();
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        modal
            .show(Notice::success("Profile saved").on_close(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }))
            .unwrap();
        modal.press_close().unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.state(), ModalState::Closing);
    }

    #[tokio::test]
    async fn test_helper_passes_label_and_callback() {
        let provider = ModalProvider::new();
        let modal = provider.handle();
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        modal
            .show_success_modal(
                "Match saved",
                None,
                Some(Box::new(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                })),
                Some("Great"),
            )
            .unwrap();
        let content = open_content(&provider);
        let text = content.displayed_text();
        assert!(text.contains(&"Success"));
        assert!(text.contains(&"Great"));

        modal.press_close().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_waits_for_exit_animation() {
        let provider = ModalProvider::new();
        let modal = provider.handle();

        modal.show_error_modal("Network error", None, None, None).unwrap();
        modal.close_modal().unwrap();

        let descriptor = provider.snapshot().unwrap();
        assert!(descriptor.is_closing);
        assert!(descriptor.content.is_none());

        tokio::time::sleep(Duration::from_millis(700)).await;
        assert_eq!(provider.state(), ModalState::Closing);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(provider.state(), ModalState::Idle);
        assert!(provider.snapshot().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_during_closing_is_noop() {
        let provider = ModalProvider::new();
        let modal = provider.handle();
        let mut changes = provider.subscribe();

        modal.show_info_modal("Bye", None, None, None).unwrap();
        modal.close_modal().unwrap();
        changes.borrow_and_update();

        modal.close_modal().unwrap();
        assert!(!changes.has_changed().unwrap());
        assert_eq!(provider.state(), ModalState::Closing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_timer_does_not_touch_new_content() {
        let provider = ModalProvider::new();
        let modal = provider.handle();

        modal.show_info_modal("first", None, None, None).unwrap();
        modal.close_modal().unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;
        modal.show_info_modal("second", None, None, None).unwrap();

        tokio::time::sleep(Duration::from_millis(800)).await;
        let descriptor = provider.snapshot().unwrap();
        assert!(!descriptor.is_closing);
        assert!(descriptor.content.is_some());
    }

    #[tokio::test]
    async fn test_navigation_resets_immediately() {
        let provider = ModalProvider::new();
        let modal = provider.handle();

        let answer = modal.show_confirmation_modal("Discard changes?", None).unwrap();
        modal.handle_navigation().unwrap();

        assert_eq!(provider.state(), ModalState::Idle);
        assert!(!answer.await);
    }

    #[test]
    fn test_close_without_runtime_goes_idle() {
        let provider = ModalProvider::new();
        let modal = provider.handle();

        modal.show_info_modal("offline", None, None, None).unwrap();
        modal.close_modal().unwrap();
        assert_eq!(provider.state(), ModalState::Idle);
    }

    #[test]
    fn test_handle_outside_provider_fails() {
        let modal = ModalProvider::new().handle();
        let err = modal.show_error_modal("lost", None, None, None).unwrap_err();
        assert!(matches!(err, TrailmatchError::Internal(_)));
    }
}
