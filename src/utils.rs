use std::{fs, io, path::Path};

use crate::error::{IOError, MarkupError, Result};

fn io_error(err: io::Error, path: &Path, fallback: fn(String) -> IOError) -> MarkupError {
    let target = path.display().to_string();
    let kind = match err.kind() {
        io::ErrorKind::NotFound => IOError::FileNotFound(target),
        io::ErrorKind::PermissionDenied => IOError::PermissionDenied(target),
        _ => fallback(target),
    };
    MarkupError::from(kind).with_source(err)
}

pub fn read_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| io_error(e, path, IOError::ReadError))
}

pub fn write_file(path: impl AsRef<Path>, content: &[u8]) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, content).map_err(|e| io_error(e, path, IOError::WriteError))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MarkupErrorKind;

    #[test]
    fn test_missing_file() {
        let err = read_file("definitely/not/here.zm").unwrap_err();
        assert!(matches!(
            err.kind(),
            MarkupErrorKind::IO(IOError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_write_then_read() {
        let path = std::env::temp_dir().join("zmarkup_utils_roundtrip.txt");
        write_file(&path, b"<p/>").unwrap();
        assert_eq!(read_file(&path).unwrap(), "<p/>");
        let _ = fs::remove_file(path);
    }
}
