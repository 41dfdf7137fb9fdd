//! Client for a CV rewrite service: uploads a CV with a job description and
//! shows the rewritten lines next to the originals.

pub mod cli;
pub mod core;
pub mod render;
pub mod types;
pub mod utils;
pub mod views;

pub use crate::core::{ConfigManager, ResultStore, RewriteTransport, ServiceClient, TransportError};
pub use crate::types::{CvUpload, RewriteResult};
