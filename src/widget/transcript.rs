//! Headless HTML view model.
//!
//! [`HtmlTranscript`] keeps the transcript, indicator and input state in
//! memory and renders them to HTML on demand. It is the view used by tests
//! and by anything that wants the widget's markup without a document.

use std::sync::{Mutex, MutexGuard, PoisonError};

use super::format::{render_contact_form, render_message, render_typing_placeholder};
use super::message::Message;
use super::status::{ConnectivityStatus, StatusUpdate};
use super::view::ChatView;

/// One transcript row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEntry {
    Message(Message),
    Typing,
    ContactForm,
}

/// Which control currently has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    None,
    Input,
    ContactName,
}

#[derive(Debug, Default)]
struct TranscriptState {
    entries: Vec<TranscriptEntry>,
    status: Option<StatusUpdate>,
    indicator_classes: Vec<&'static str>,
    notices: Vec<String>,
    busy: bool,
    input: String,
    focus: Focus,
    scrolls: usize,
}

/// In-memory [`ChatView`] that renders HTML.
#[derive(Debug, Default)]
pub struct HtmlTranscript {
    state: Mutex<TranscriptState>,
}

impl HtmlTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, TranscriptState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// All rows in display order.
    pub fn entries(&self) -> Vec<TranscriptEntry> {
        self.state().entries.clone()
    }

    /// Only the chat messages, in display order.
    pub fn messages(&self) -> Vec<Message> {
        self.state()
            .entries
            .iter()
            .filter_map(|entry| match entry {
                TranscriptEntry::Message(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn typing_count(&self) -> usize {
        self.count(&TranscriptEntry::Typing)
    }

    pub fn contact_form_count(&self) -> usize {
        self.count(&TranscriptEntry::ContactForm)
    }

    pub fn contact_form_visible(&self) -> bool {
        self.contact_form_count() > 0
    }

    fn count(&self, wanted: &TranscriptEntry) -> usize {
        self.state().entries.iter().filter(|e| *e == wanted).count()
    }

    /// Validation notices shown outside the transcript, oldest first.
    pub fn notices(&self) -> Vec<String> {
        self.state().notices.clone()
    }

    pub fn status(&self) -> Option<StatusUpdate> {
        self.state().status.clone()
    }

    /// Marker classes currently applied to the status indicator.
    pub fn indicator_classes(&self) -> Vec<&'static str> {
        self.state().indicator_classes.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.state().busy
    }

    /// Current input field contents.
    pub fn input(&self) -> String {
        self.state().input.clone()
    }

    /// Simulate typing into the input field.
    pub fn set_input(&self, text: impl Into<String>) {
        self.state().input = text.into();
    }

    /// The send control is usable only when idle with something typed.
    pub fn send_enabled(&self) -> bool {
        let state = self.state();
        !state.busy && !state.input.trim().is_empty()
    }

    pub fn focus(&self) -> Focus {
        self.state().focus
    }

    /// Number of scroll-to-bottom requests received so far.
    pub fn scroll_count(&self) -> usize {
        self.state().scrolls
    }

    /// Render the transcript container.
    pub fn to_html(&self) -> String {
        let state = self.state();
        let mut html = String::from(r#"<div id="chat-messages">"#);
        for entry in &state.entries {
            match entry {
                TranscriptEntry::Message(message) => html.push_str(&render_message(message)),
                TranscriptEntry::Typing => html.push_str(render_typing_placeholder()),
                TranscriptEntry::ContactForm => html.push_str(render_contact_form()),
            }
        }
        html.push_str("</div>");
        html
    }
}

impl ChatView for HtmlTranscript {
    fn append_message(&self, message: &Message) {
        self.state()
            .entries
            .push(TranscriptEntry::Message(message.clone()));
    }

    fn show_typing(&self) {
        let mut state = self.state();
        if !state.entries.contains(&TranscriptEntry::Typing) {
            state.entries.push(TranscriptEntry::Typing);
        }
    }

    fn hide_typing(&self) {
        self.state()
            .entries
            .retain(|entry| *entry != TranscriptEntry::Typing);
    }

    fn show_contact_form(&self) {
        let mut state = self.state();
        state
            .entries
            .retain(|entry| *entry != TranscriptEntry::ContactForm);
        state.entries.push(TranscriptEntry::ContactForm);
    }

    fn remove_contact_form(&self) {
        self.state()
            .entries
            .retain(|entry| *entry != TranscriptEntry::ContactForm);
    }

    fn show_validation_error(&self, message: &str) {
        self.state().notices.push(message.to_string());
    }

    fn set_connectivity_status(&self, update: &StatusUpdate) {
        let mut state = self.state();
        state
            .indicator_classes
            .retain(|class| !ConnectivityStatus::ALL_CLASSES.contains(class));
        state.indicator_classes.push(update.status.css_class());
        state.status = Some(update.clone());
    }

    fn set_busy(&self, busy: bool) {
        self.state().busy = busy;
    }

    fn clear_input(&self) {
        self.state().input.clear();
    }

    fn focus_input(&self) {
        self.state().focus = Focus::Input;
    }

    fn focus_contact_form(&self) {
        self.state().focus = Focus::ContactName;
    }

    fn scroll_to_bottom(&self) {
        self.state().scrolls += 1;
    }
}
