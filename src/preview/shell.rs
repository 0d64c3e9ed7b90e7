//! HTML shell loading
//!
//! The shell is the pre-built empty document carrying the meta tags the
//! rewriter fills in. It is read from disk on every invocation and never
//! cached across requests.

use std::path::Path;

use crate::types::{LintelError, Result};

/// Read the HTML shell from disk
pub async fn load_shell(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| LintelError::Shell(format!("failed to read {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_shell_reads_file() {
        let path = std::env::temp_dir().join("lintel_shell_test.html");
        std::fs::write(&path, "<html><head></head></html>").unwrap();

        let shell = tokio_test::block_on(load_shell(&path)).unwrap();
        assert_eq!(shell, "<html><head></head></html>");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_shell_missing_file_is_shell_error() {
        let path = std::env::temp_dir().join("lintel_shell_does_not_exist.html");
        let err = tokio_test::block_on(load_shell(&path)).unwrap_err();
        assert!(matches!(err, LintelError::Shell(_)));
    }
}
