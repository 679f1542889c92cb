//! Storage, codecs, config loading and the HTTP credential client.

pub mod codec;
pub mod config_service;
pub mod dto;
pub mod http_verifier;
pub mod paths;
pub mod storage;

pub use crate::codec::StoreCodec;
pub use crate::config_service::ConfigService;
pub use crate::http_verifier::HttpCredentialVerifier;
pub use crate::paths::LancenotasPaths;
pub use crate::storage::{FileKeyValueStore, InMemoryKeyValueStore};
