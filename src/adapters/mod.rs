//! Infrastructure adapters. Implement outbound ports.
//!
//! Speaker persistence backends. Map errors to DomainError.

pub mod persistence;
