use std::fs;
use std::path::{Path, PathBuf};

use crate::editing::Document;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("File is not valid UTF-8: {0}")]
    InvalidUtf8(PathBuf),
}

/// Read a Gemtext file and classify it
pub fn read_document(path: &Path) -> Result<Document, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let bytes = fs::read(path)?;
    Document::from_bytes(&bytes).map_err(|_| IoError::InvalidUtf8(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SpanKind;
    use tempfile::TempDir;

    #[test]
    fn reads_and_classifies() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.gmi");
        fs::write(&path, "# Home\n=> about.gmi About\n").unwrap();

        let doc = read_document(&path).unwrap();
        assert_eq!(doc.store().iter(SpanKind::Heading).count(), 1);
        assert_eq!(doc.store().iter(SpanKind::Link).count(), 1);
    }

    #[test]
    fn missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.gmi");
        assert!(matches!(read_document(&path), Err(IoError::NotFound(p)) if p == path));
    }

    #[test]
    fn invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.gmi");
        fs::write(&path, [0xc3, 0x28]).unwrap();
        assert!(matches!(read_document(&path), Err(IoError::InvalidUtf8(_))));
    }
}
