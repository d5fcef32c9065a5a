//! Loading documents for the tree-based strategies

use std::path::Path;

use roster_traits::{Error, Result};

/// Read a whole document as UTF-8 text.
///
/// An unopenable file is an `Io` error; bytes that are not UTF-8 make the
/// document malformed.
pub(crate) fn read_document(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    String::from_utf8(bytes).map_err(|e| Error::malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn invalid_utf8_is_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"<U><Student><Name>\xff</Name></Student></U>").unwrap();
        let err = read_document(file.path()).unwrap_err();
        assert!(matches!(err, Error::MalformedDocument(_)));
    }

    #[test]
    fn missing_file_is_io() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_document(&dir.path().join("absent.xml")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
