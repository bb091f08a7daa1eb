//! Port traits. API boundaries for the hexagon.
//!
//! - Inbound: Called by the host binary into the application
//! - Outbound: Called by the application into infrastructure

pub mod inbound;
pub mod outbound;

pub use inbound::RegisterSpeaker;
pub use outbound::SpeakerRepoPort;
