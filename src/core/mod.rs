//! Core types and functionality for wsview.
//!
//! Currently this is the home of the error layer; see [`error`].

pub mod error;

pub use error::{ErrorContext, WsviewError, user_friendly_error};
