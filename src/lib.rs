//! Chat widget
//!
//! A chat client that relays a visitor's questions to an assistant backend
//! and, when the backend asks for it, captures contact details and resends
//! the question with them attached.
//!
//! # Architecture
//!
//! - **Controller**: [`ChatWidget`] runs the submit flow and the contact
//!   capture sub-flow against injected collaborators
//! - **View**: [`ChatView`] abstracts the display; [`HtmlTranscript`] renders
//!   HTML headlessly and [`terminal::TerminalView`] drives a console
//! - **Backend**: [`ChatBackend`] abstracts `/health` and `/chat`;
//!   [`HttpBackend`] is the `reqwest` implementation
//!
//! # Modules
//!
//! - [`api`]: wire types and the backend client
//! - [`config`]: CLI and layered configuration
//! - [`widget`]: controller, view seam, rendering, health monitoring
//! - [`terminal`]: line-oriented front-end used by the binary

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod config;
pub mod error;
pub mod terminal;
pub mod widget;

pub use api::{ChatBackend, HttpBackend};
pub use error::ClientError;
pub use widget::{ChatView, ChatWidget, HtmlTranscript};
