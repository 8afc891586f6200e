//! Loading claim evidence from disk

use std::path::Path;

use thiserror::Error;
use tokio::fs;
use unifind_domain::request::FilePart;

/// Largest evidence file accepted, in bytes.
pub const MAX_EVIDENCE_BYTES: u64 = 10 * 1024 * 1024;

/// Problems reading an evidence file.
#[derive(Debug, Error)]
pub enum EvidenceError {
    /// The file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// Offending path
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The file is larger than [`MAX_EVIDENCE_BYTES`].
    #[error("{path} is {size} bytes, the limit is {MAX_EVIDENCE_BYTES}")]
    TooLarge {
        /// Offending path
        path: String,
        /// Actual size
        size: u64,
    },
}

/// Reads `path` into a file part, guessing its MIME type from the extension.
///
/// # Errors
///
/// Returns `EvidenceError` if the file is unreadable or too large.
pub async fn load_evidence(path: &Path) -> Result<FilePart, EvidenceError> {
    let display = path.display().to_string();
    let io_error = |source| EvidenceError::Io {
        path: display.clone(),
        source,
    };

    let size = fs::metadata(path).await.map_err(io_error)?.len();
    if size > MAX_EVIDENCE_BYTES {
        return Err(EvidenceError::TooLarge {
            path: path.display().to_string(),
            size,
        });
    }
    let bytes = fs::read(path).await.map_err(io_error)?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("evidence")
        .to_string();
    let content_type = mime_guess::from_path(path).first_or(mime::APPLICATION_OCTET_STREAM);

    Ok(FilePart::new(file_name, content_type.essence_str(), bytes))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_guesses_mime_from_extension() {
        let dir = TempDir::new().unwrap();
        let jpg = dir.path().join("recibo.jpg");
        std::fs::write(&jpg, [0xFF, 0xD8, 0xFF]).unwrap();
        let unknown = dir.path().join("notas.zzz");
        std::fs::write(&unknown, b"x").unwrap();

        let part = load_evidence(&jpg).await.unwrap();
        assert_eq!(part.file_name, "recibo.jpg");
        assert_eq!(part.content_type, "image/jpeg");
        assert_eq!(part.bytes, vec![0xFF, 0xD8, 0xFF]);

        let part = load_evidence(&unknown).await.unwrap();
        assert_eq!(part.content_type, "application/octet-stream");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            load_evidence(&dir.path().join("nada.png")).await,
            Err(EvidenceError::Io { .. })
        ));
    }
}
