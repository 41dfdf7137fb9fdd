use anyhow::{Context, Result};
use std::path::Path;

use crate::utils::content_type_for;

/// A CV file selected for upload: its name and raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CvUpload {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl CvUpload {
    pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content,
        }
    }

    /// Read a CV from disk, keeping only the final path component as its name
    pub async fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .with_context(|| format!("Invalid CV file name: {}", path.display()))?;

        let content = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(Self { file_name, content })
    }

    pub fn content_type(&self) -> &'static str {
        content_type_for(&self.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{DOCX_CONTENT_TYPE, PDF_CONTENT_TYPE};

    #[tokio::test]
    async fn test_from_path_reads_name_and_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.pdf");
        tokio::fs::write(&path, b"%PDF-1.7").await.unwrap();

        let upload = CvUpload::from_path(&path).await.unwrap();
        assert_eq!(upload.file_name, "resume.pdf");
        assert_eq!(upload.content, b"%PDF-1.7");
        assert_eq!(upload.content_type(), PDF_CONTENT_TYPE);
    }

    #[tokio::test]
    async fn test_from_path_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CvUpload::from_path(&dir.path().join("gone.docx"))
            .await
            .is_err());
    }

    #[test]
    fn test_content_type_uses_extension() {
        let upload = CvUpload::new("Resume.DOCX", vec![]);
        assert_eq!(upload.content_type(), DOCX_CONTENT_TYPE);
    }
}
