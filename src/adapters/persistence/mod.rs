//! Implementations of SpeakerRepoPort.

pub mod fs_repo;
pub mod memory_repo;
pub mod sqlite_repo;

pub use fs_repo::JsonlSpeakerRepo;
pub use memory_repo::InMemorySpeakerRepo;
pub use sqlite_repo::SqliteSpeakerRepo;
