//! Infrastructure layer - persistence and file storage

pub mod files;
pub mod storage;

pub use files::FsBlobStore;
