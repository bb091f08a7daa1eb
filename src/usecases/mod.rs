//! Application use cases. Orchestrate domain rules via ports.

pub mod registration_service;

pub use registration_service::RegistrationService;
