//! The chat widget: controller, view seam and rendering.
//!
//! # Structure
//!
//! - [`controller`]: [`ChatWidget`], the submit and contact-capture flow
//! - [`view`]: [`ChatView`], the display operations the controller drives
//! - [`transcript`]: [`HtmlTranscript`], an in-memory HTML view
//! - [`format`]: escaping and the restricted markdown pass for bot text
//! - [`contact`]: contact form validation
//! - [`status`]: connectivity status and health classification
//! - [`health`]: one-shot probe and the periodic [`HealthMonitor`]

pub mod contact;
pub mod controller;
pub mod format;
pub mod health;
pub mod message;
pub mod status;
pub mod transcript;
pub mod view;

pub use contact::{ContactError, ContactForm, ContactInfo};
pub use controller::{ChatWidget, SubmitOutcome};
pub use health::HealthMonitor;
pub use message::{Message, Sender};
pub use status::{ConnectivityStatus, StatusUpdate};
pub use transcript::HtmlTranscript;
pub use view::ChatView;
