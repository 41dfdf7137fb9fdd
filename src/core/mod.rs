// src/core/mod.rs
//! Transport, storage and configuration shared by both views

pub mod config_manager;
pub mod result_store;
pub mod service_client;

pub use config_manager::{ConfigManager, ConfigOverrides};
pub use result_store::{
    FileStore, MemoryStore, ResultStore, StoreError, StoredResult, RESULT_KEY,
};
pub use service_client::{RewriteTransport, ServiceClient, TransportError};
