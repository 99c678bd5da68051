//! Line-oriented terminal front-end.
//!
//! [`TerminalView`] prints the transcript to any writer; [`run`] reads lines
//! and feeds them to a [`ChatWidget`]. Pressing Enter submits the line.
//! Lines starting with `/` are commands:
//!
//! - `/online`, `/offline`: simulate connectivity events
//! - `/health`: probe the backend now
//! - `/cancel`: abandon an open contact form
//! - `/quit`: exit

use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::debug;

use crate::api::ChatBackend;
use crate::widget::contact::ContactForm;
use crate::widget::controller::ChatWidget;
use crate::widget::message::{Message, Sender};
use crate::widget::status::StatusUpdate;
use crate::widget::view::ChatView;

struct TerminalState {
    out: Box<dyn Write + Send>,
    busy: bool,
}

/// [`ChatView`] writing plain text lines.
pub struct TerminalView {
    state: Mutex<TerminalState>,
}

impl std::fmt::Debug for TerminalView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalView")
            .field("busy", &self.state().busy)
            .finish()
    }
}

impl TerminalView {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            state: Mutex::new(TerminalState { out, busy: false }),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    fn state(&self) -> MutexGuard<'_, TerminalState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // A view cannot fail; a closed terminal just loses output.
    fn line(&self, text: &str) {
        let _ = writeln!(self.state().out, "{text}");
    }

    /// Print a prompt without a newline.
    pub fn prompt(&self, text: &str) {
        let mut state = self.state();
        let _ = write!(state.out, "{text}");
        let _ = state.out.flush();
    }

    pub fn is_busy(&self) -> bool {
        self.state().busy
    }
}

impl ChatView for TerminalView {
    fn append_message(&self, message: &Message) {
        let who = match message.sender {
            Sender::User => "You",
            Sender::Bot => "Assistant",
        };
        let flag = if message.is_error { "! " } else { "" };
        self.line(&format!("[{}] {flag}{who}: {}", message.timestamp, message.text));
    }

    fn show_typing(&self) {
        self.line("Assistant is typing...");
    }

    fn hide_typing(&self) {}

    fn show_contact_form(&self) {
        self.line("Please provide your contact information (/cancel to skip).");
    }

    fn remove_contact_form(&self) {}

    fn show_validation_error(&self, message: &str) {
        self.line(&format!("! {message}"));
    }

    fn set_connectivity_status(&self, update: &StatusUpdate) {
        self.line(&format!("[status] {}", update.label));
    }

    fn set_busy(&self, busy: bool) {
        self.state().busy = busy;
    }

    fn clear_input(&self) {}

    fn focus_input(&self) {}

    fn scroll_to_bottom(&self) {
        let _ = self.state().out.flush();
    }
}

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ask(String),
    Online,
    Offline,
    Health,
    Cancel,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "/quit" | "/exit" => Self::Quit,
            "/online" => Self::Online,
            "/offline" => Self::Offline,
            "/health" => Self::Health,
            "/cancel" => Self::Cancel,
            _ => Self::Ask(line.to_string()),
        }
    }
}

enum FormInput {
    Submitted(ContactForm),
    Cancelled,
    Quit,
    Eof,
}

async fn read_field<R>(lines: &mut Lines<R>, view: &TerminalView, label: &str) -> io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    view.prompt(label);
    lines.next_line().await
}

async fn read_contact_form<R>(lines: &mut Lines<R>, view: &TerminalView) -> io::Result<FormInput>
where
    R: AsyncBufRead + Unpin,
{
    let mut values = Vec::with_capacity(4);
    for label in [
        "Your Name *: ",
        "Your Email *: ",
        "Company (optional): ",
        "Your Role (optional): ",
    ] {
        let Some(value) = read_field(lines, view, label).await? else {
            return Ok(FormInput::Eof);
        };
        match Command::parse(&value) {
            Command::Cancel => return Ok(FormInput::Cancelled),
            Command::Quit => return Ok(FormInput::Quit),
            _ => values.push(value),
        }
    }

    let mut values = values.into_iter();
    let mut next = || values.next().unwrap_or_default();
    Ok(FormInput::Submitted(
        ContactForm::new(next(), next())
            .with_company(next())
            .with_role(next()),
    ))
}

/// Drive `widget` from `input` until `/quit` or end of input.
pub async fn run<B, R>(widget: &ChatWidget<B, TerminalView>, input: R) -> io::Result<()>
where
    B: ChatBackend + ?Sized,
    R: AsyncBufRead + Unpin,
{
    let view = widget.view();
    let mut lines = input.lines();

    loop {
        if widget.contact_form_open() {
            match read_contact_form(&mut lines, view).await? {
                FormInput::Submitted(form) => {
                    // Rejections are already shown by the view; the form stays open.
                    if let Err(e) = widget.submit_contact(&form).await {
                        debug!(name: "terminal.contact.rejected", reason = %e, "Contact form rejected");
                    }
                }
                FormInput::Cancelled => {
                    widget.cancel_contact();
                }
                FormInput::Quit | FormInput::Eof => break,
            }
            continue;
        }

        view.prompt("> ");
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match Command::parse(&line) {
            Command::Quit => break,
            Command::Online => {
                widget.came_online().await;
            }
            Command::Offline => widget.went_offline(),
            Command::Health => {
                widget.check_health().await;
            }
            Command::Cancel => {
                widget.cancel_contact();
            }
            Command::Ask(question) => {
                widget.submit(&question).await;
            }
        }
    }

    Ok(())
}
