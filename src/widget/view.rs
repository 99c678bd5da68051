//! View-model seam between the controller and whatever draws the widget.

use super::message::Message;
use super::status::StatusUpdate;

/// Display operations the [`ChatWidget`](super::ChatWidget) drives.
///
/// Methods take `&self` so the same view can be shared between the
/// controller and the background health monitor; implementations use
/// interior mutability. None of them may fail: a view that cannot draw
/// simply drops the update.
pub trait ChatView: Send + Sync {
    /// Append an immutable message to the transcript.
    fn append_message(&self, message: &Message);

    /// Show the "assistant is composing" placeholder. Called at most once
    /// before a matching [`hide_typing`](Self::hide_typing).
    fn show_typing(&self);

    /// Remove the placeholder if present.
    fn hide_typing(&self);

    /// Append the contact-capture form as its own transcript entry.
    fn show_contact_form(&self);

    /// Remove the contact-capture form if present.
    fn remove_contact_form(&self);

    /// Surface a contact form validation problem without touching the transcript.
    fn show_validation_error(&self, message: &str);

    /// Replace the connectivity indicator state and text.
    fn set_connectivity_status(&self, update: &StatusUpdate);

    /// Enable or disable the input field and send control.
    fn set_busy(&self, busy: bool);

    fn clear_input(&self);

    fn focus_input(&self);

    /// Move focus to the first field of the contact form.
    fn focus_contact_form(&self) {}

    /// Bring the newest transcript entry into view.
    fn scroll_to_bottom(&self);
}
