//! Core domain layer. No external I/O dependencies.
//!
//! Entities, rule tables and errors live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod policy;

pub use entities::{BrowserName, Session, Speaker, WebBrowser};
pub use errors::{DomainError, RegistrationError};
pub use policy::{FeeTier, RegistrationPolicy};
