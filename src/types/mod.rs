// src/types/mod.rs
pub mod response;
pub mod upload;

pub use response::{InvalidResult, RewriteResult};
pub use upload::CvUpload;
