// src/utils.rs
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Validate file extension against allowed types
pub fn validate_file_extension(filename: &str, allowed: &[&str]) -> Result<()> {
    let ext = get_file_extension(filename)
        .ok_or_else(|| anyhow::anyhow!("File has no extension: {}", filename))?;

    if !allowed.contains(&ext.as_str()) {
        anyhow::bail!(
            "Unsupported file extension: {}. Allowed: {:?}",
            ext,
            allowed
        );
    }

    Ok(())
}

/// Content type sent with an uploaded CV, derived from its name only
pub fn content_type_for(filename: &str) -> &'static str {
    match get_file_extension(filename).as_deref() {
        Some("pdf") => PDF_CONTENT_TYPE,
        Some("docx") => DOCX_CONTENT_TYPE,
        _ => FALLBACK_CONTENT_TYPE,
    }
}

/// Resolve a possibly relative path against the current directory
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        Ok(current_dir.join(path))
    }
}

pub async fn read_file_safe(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_file_extension() {
        assert_eq!(get_file_extension("resume.pdf"), Some("pdf".to_string()));
        assert_eq!(
            get_file_extension("resume.DOCX"),
            Some("docx".to_string())
        );
        assert_eq!(get_file_extension("noext"), None);
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("cv.pdf", &["pdf", "docx"]).is_ok());
        assert!(validate_file_extension("cv.Docx", &["pdf", "docx"]).is_ok());
        assert!(validate_file_extension("cv.txt", &["pdf", "docx"]).is_err());
        assert!(validate_file_extension("noext", &["pdf"]).is_err());
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("resume.pdf"), PDF_CONTENT_TYPE);
        assert_eq!(content_type_for("resume.DOCX"), DOCX_CONTENT_TYPE);
        assert_eq!(content_type_for("resume"), FALLBACK_CONTENT_TYPE);
    }

    #[test]
    fn test_resolve_path_keeps_absolute() {
        let abs = std::env::temp_dir().join("state");
        assert_eq!(resolve_path(&abs).unwrap(), abs);
        assert!(resolve_path(Path::new("state")).unwrap().is_absolute());
    }
}
