#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{
    ClientSettingsRepository, InMemoryRepository, SessionRepository, Storage, StorageError,
    StoredSession,
};
