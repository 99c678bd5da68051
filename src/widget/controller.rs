//! The chat widget controller.
//!
//! [`ChatWidget`] owns the conversation state (busy flag, pending contact
//! details, the question waiting on contact capture) and drives an injected
//! [`ChatView`] and [`ChatBackend`]. A submission goes:
//!
//! 1. append the user's message, lock the input, show the typing placeholder
//! 2. post `{question, user_info?}` to the backend
//! 3. drop the placeholder, then render the reply by its status:
//!    `success` answers, `user_info_required` opens the contact form,
//!    anything else is an error message
//! 4. unlock the input
//!
//! Submitting the contact form stores the details and re-runs the flow with
//! the remembered question.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{info, warn};

use super::contact::{ContactError, ContactForm, ContactInfo};
use super::health::{HealthMonitor, probe_health};
use super::message::Message;
use super::status::StatusUpdate;
use super::view::ChatView;
use crate::api::{ChatBackend, ChatExchange, ChatRequest, ReplyStatus};
use crate::config::WidgetSettings;

/// Shown when the request never produced a usable reply.
pub const CONNECTION_FAILURE_TEXT: &str =
    "Connection error. Please check your internet connection and try again.";

/// Shown for a failed reply that carries no error text of its own.
pub const GENERIC_ERROR_TEXT: &str = "Sorry, something went wrong.";

/// Used when a `user_info_required` reply has no prompt.
pub const DEFAULT_CONTACT_PROMPT: &str = "Could you please provide your name and email?";

/// Which branch a submission took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Empty question, or another submission was in flight.
    Ignored,
    Answered,
    ContactRequested,
    Failed,
}

#[derive(Debug, Default)]
struct WidgetState {
    busy: bool,
    pending_contact: Option<ContactInfo>,
    /// Set exactly while the contact form is open.
    pending_question: Option<String>,
}

/// Chat controller over a backend `B` and a view `V`.
///
/// All methods take `&self`; share the widget behind an `Arc` to drive it
/// from several tasks. The state lock is never held across an `.await`.
#[derive(Debug)]
pub struct ChatWidget<B: ?Sized, V: ?Sized> {
    backend: Arc<B>,
    view: Arc<V>,
    settings: WidgetSettings,
    state: Mutex<WidgetState>,
}

impl<B, V> ChatWidget<B, V>
where
    B: ChatBackend + ?Sized,
    V: ChatView + ?Sized,
{
    pub fn new(backend: Arc<B>, view: Arc<V>, settings: WidgetSettings) -> Self {
        Self {
            backend,
            view,
            settings,
            state: Mutex::new(WidgetState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, WidgetState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn view(&self) -> &Arc<V> {
        &self.view
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    pub fn settings(&self) -> &WidgetSettings {
        &self.settings
    }

    pub fn is_busy(&self) -> bool {
        self.state().busy
    }

    /// Contact details that will ride along with the next question.
    pub fn pending_contact(&self) -> Option<ContactInfo> {
        self.state().pending_contact.clone()
    }

    /// The question waiting on contact capture, if the form is open.
    pub fn pending_question(&self) -> Option<String> {
        self.state().pending_question.clone()
    }

    pub fn contact_form_open(&self) -> bool {
        self.state().pending_question.is_some()
    }

    /// Greet, focus the input, and probe health once.
    pub async fn start(&self) -> StatusUpdate {
        self.append(&Message::bot(self.settings.greeting_text()));
        self.view.focus_input();
        self.check_health().await
    }

    pub async fn check_health(&self) -> StatusUpdate {
        probe_health(&*self.backend, &*self.view).await
    }

    /// The host lost connectivity. No request is made.
    pub fn went_offline(&self) {
        info!(name: "connectivity.offline", "Connectivity lost");
        self.view.set_connectivity_status(&StatusUpdate::offline());
    }

    /// The host regained connectivity; re-probe the backend.
    pub async fn came_online(&self) -> StatusUpdate {
        info!(name: "connectivity.online", "Connectivity restored");
        self.check_health().await
    }

    fn append(&self, message: &Message) {
        self.view.append_message(message);
        self.view.scroll_to_bottom();
    }

    /// Send a question and render the reply.
    pub async fn submit(&self, question: &str) -> SubmitOutcome {
        let question = question.trim();
        if question.is_empty() {
            return SubmitOutcome::Ignored;
        }

        let user_info = {
            let mut state = self.state();
            if state.busy {
                return SubmitOutcome::Ignored;
            }
            state.busy = true;
            state.pending_contact.clone()
        };
        self.submit_locked(question, user_info).await
    }

    /// Steps after the busy flag is claimed. The caller must have set `busy`
    /// in the same lock section that read `user_info`.
    async fn submit_locked(&self, question: &str, user_info: Option<ContactInfo>) -> SubmitOutcome {
        let busy = BusyGuard { widget: self };

        self.append(&Message::user(question));
        self.view.clear_input();
        self.view.set_busy(true);
        self.view.show_typing();
        self.view.scroll_to_bottom();

        info!(
            name: "chat.request.sent",
            question_len = question.len(),
            with_contact = user_info.is_some(),
            "Sending question"
        );
        let request = ChatRequest {
            question: question.to_string(),
            user_info,
        };
        let result = self.backend.chat(&request).await;

        self.view.hide_typing();

        let outcome = match result {
            Ok(exchange) => self.render_reply(question, exchange),
            Err(e) => {
                warn!(name: "chat.request.failed", error = %e, "Chat request failed");
                self.append(&Message::bot_error(CONNECTION_FAILURE_TEXT));
                self.view
                    .set_connectivity_status(&StatusUpdate::connection_error());
                SubmitOutcome::Failed
            }
        };

        drop(busy);
        self.view.focus_input();

        info!(name: "chat.request.completed", outcome = ?outcome, "Question handled");
        outcome
    }

    fn render_reply(&self, question: &str, exchange: ChatExchange) -> SubmitOutcome {
        let http_ok = exchange.is_http_success();
        let ChatExchange {
            http_status,
            reason,
            reply,
        } = exchange;

        match (http_ok, reply.status, reply.answer) {
            (true, ReplyStatus::Success, Some(answer)) => {
                self.append(&Message::bot(answer));
                self.state().pending_contact = None;
                SubmitOutcome::Answered
            }
            (true, ReplyStatus::UserInfoRequired, answer) => {
                let prompt = answer.unwrap_or_else(|| DEFAULT_CONTACT_PROMPT.to_string());
                self.append(&Message::bot(prompt));
                self.open_contact_form(question);
                SubmitOutcome::ContactRequested
            }
            _ => {
                let text = reply
                    .error
                    .filter(|e| !e.trim().is_empty())
                    .or_else(|| {
                        (!http_ok).then(|| format!("Error {http_status}: {reason}").trim().to_string())
                    })
                    .unwrap_or_else(|| GENERIC_ERROR_TEXT.to_string());
                warn!(
                    name: "chat.reply.error",
                    http_status,
                    error_text = %text,
                    "Backend reported an error"
                );
                self.append(&Message::bot_error(text));
                SubmitOutcome::Failed
            }
        }
    }

    fn open_contact_form(&self, question: &str) {
        let replaced = self
            .state()
            .pending_question
            .replace(question.to_string())
            .is_some();
        if replaced {
            self.view.remove_contact_form();
        }
        self.view.show_contact_form();
        self.view.scroll_to_bottom();
        self.view.focus_contact_form();
        info!(name: "contact.form.opened", "Contact details requested");
    }

    /// Validate the contact form and, if valid, resend the remembered question.
    ///
    /// Validation failures are shown through the view and leave the form open.
    pub async fn submit_contact(&self, form: &ContactForm) -> Result<SubmitOutcome, ContactError> {
        // Claim `busy` together with the question so no other submission can
        // consume the stored details first.
        let (question, info) = {
            let mut state = self.state();
            if state.busy {
                return Ok(SubmitOutcome::Ignored);
            }
            let Some(question) = state.pending_question.clone() else {
                return Err(ContactError::NoFormOpen);
            };
            match form.validate() {
                Ok(info) => {
                    state.busy = true;
                    state.pending_contact = Some(info.clone());
                    state.pending_question = None;
                    (question, info)
                }
                Err(e) => {
                    drop(state);
                    warn!(name: "contact.form.invalid", reason = %e, "Contact form rejected");
                    self.view.show_validation_error(&e.to_string());
                    return Err(e);
                }
            }
        };

        self.view.remove_contact_form();
        info!(name: "contact.form.captured", "Contact details captured, resending question");

        Ok(self.submit_locked(&question, Some(info)).await)
    }

    /// Close the contact form without storing anything. Returns whether a
    /// form was open.
    pub fn cancel_contact(&self) -> bool {
        let was_open = self.state().pending_question.take().is_some();
        if was_open {
            self.view.remove_contact_form();
            info!(name: "contact.form.cancelled", "Contact form cancelled");
        }
        was_open
    }

    fn release(&self) {
        self.state().busy = false;
        self.view.hide_typing();
        self.view.set_busy(false);
    }
}

impl<B, V> ChatWidget<B, V>
where
    B: ChatBackend + ?Sized + 'static,
    V: ChatView + ?Sized + 'static,
{
    /// Start the periodic health probe configured in the settings.
    pub fn spawn_health_monitor(&self) -> Option<HealthMonitor> {
        self.settings.health_interval().map(|interval| {
            HealthMonitor::spawn(Arc::clone(&self.backend), Arc::clone(&self.view), interval)
        })
    }
}

/// Re-enables input when a submission ends, including when its future is
/// dropped mid-request.
struct BusyGuard<'a, B, V>
where
    B: ChatBackend + ?Sized,
    V: ChatView + ?Sized,
{
    widget: &'a ChatWidget<B, V>,
}

impl<B, V> Drop for BusyGuard<'_, B, V>
where
    B: ChatBackend + ?Sized,
    V: ChatView + ?Sized,
{
    fn drop(&mut self) {
        self.widget.release();
    }
}
