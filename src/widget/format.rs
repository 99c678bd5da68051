//! HTML rendering for transcript entries.
//!
//! User text is escaped and nothing else. Bot text is escaped first and only
//! then run through a small markdown-like pass, so angle brackets in the
//! original text can never turn into the tags the pass injects.

use std::sync::LazyLock;

use regex::Regex;

use super::message::{Message, Sender};

static BOLD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*(.*?)\*\*").unwrap_or_else(|e| panic!("invalid bold regex: {e}"))
});

static ITALIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*(.*?)\*").unwrap_or_else(|e| panic!("invalid italic regex: {e}"))
});

/// Emoji shortcuts the backend uses, mapped to icon markup.
const ICON_REPLACEMENTS: &[(&str, &str)] = &[
    ("\u{1F4E7}", r#"<i class="fas fa-envelope text-primary"></i>"#),
    ("\u{1F7E2}", r#"<i class="fas fa-circle text-success"></i>"#),
];

/// Escape text for display with no markup interpretation.
///
/// Quotes are encoded too, so the result is also safe inside an attribute.
pub fn escape_html(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).into_owned()
}

/// Escape, then apply line breaks, `**bold**`, `*italic*` and icon shortcuts.
pub fn format_bot_message(content: &str) -> String {
    let html = escape_html(content)
        .replace("\n\n", "<br><br>")
        .replace('\n', "<br>");
    let html = BOLD.replace_all(&html, "<strong>$1</strong>");
    let mut html = ITALIC.replace_all(&html, "<em>$1</em>").into_owned();

    for (emoji, icon) in ICON_REPLACEMENTS {
        if html.contains(emoji) {
            html = html.replace(emoji, icon);
        }
    }
    html
}

/// Render a complete message container.
pub fn render_message(message: &Message) -> String {
    match message.sender {
        Sender::User => format!(
            r#"<div class="message user-message"><div class="message-bubble user-bubble">{}</div><div class="message-time">{}</div></div>"#,
            escape_html(&message.text),
            message.timestamp
        ),
        Sender::Bot => {
            let (icon, bubble) = if message.is_error {
                (
                    "fa-exclamation-triangle text-warning",
                    "message-bubble bot-bubble error-message",
                )
            } else {
                ("fa-robot", "message-bubble bot-bubble")
            };
            format!(
                r#"<div class="message bot-message"><div class="bot-avatar"><i class="fas {icon}"></i></div><div class="{bubble}">{}</div><div class="message-time">{}</div></div>"#,
                format_bot_message(&message.text),
                message.timestamp
            )
        }
    }
}

/// Markup for the "assistant is composing" placeholder.
pub fn render_typing_placeholder() -> &'static str {
    r#"<div class="message bot-message" id="typing-indicator-message"><div class="bot-avatar"><i class="fas fa-robot"></i></div><div class="typing-indicator"><span></span><span></span><span></span></div></div>"#
}

/// Markup for the contact-capture form entry.
pub fn render_contact_form() -> &'static str {
    concat!(
        r#"<div class="message bot-message" id="contact-form-message">"#,
        r#"<div class="bot-avatar"><i class="fas fa-user-plus"></i></div>"#,
        r#"<div class="message-bubble"><p class="mb-3">Please provide your contact information:</p>"#,
        r#"<form id="contact-info-form">"#,
        r#"<input type="text" id="contact-name" placeholder="Your Name *" required>"#,
        r#"<input type="email" id="contact-email" placeholder="Your Email *" required>"#,
        r#"<input type="text" id="contact-company" placeholder="Company (optional)">"#,
        r#"<input type="text" id="contact-role" placeholder="Your Role (optional)">"#,
        r#"<button type="submit">Send Inquiry</button>"#,
        r#"</form></div></div>"#,
    )
}
