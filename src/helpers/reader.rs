use crate::spreadsheet::SpreadsheetError;
use std::fs::File;
use std::io::BufReader;
use std::io::Cursor;
use std::io::Read;
use std::io::Seek;
use std::path::Path;

/// A unified reader over a local file or an in-memory copy of a spreadsheet
pub(crate) enum UnifiedReader {
    /// Local file reader
    Local(BufReader<File>),
    /// In-memory buffer, e.g. an uploaded document
    Memory(Cursor<Vec<u8>>),
}

impl UnifiedReader {
    /// Opens a local file, reporting any failure as a missing source
    ///
    /// # Arguments
    /// * `path` - Path to the file
    ///
    /// # Returns
    /// * `Result<UnifiedReader, SpreadsheetError>` - Reader for the file content
    pub(crate) fn open(path: &Path) -> Result<UnifiedReader, SpreadsheetError> {
        match File::open(path) {
            Ok(file) => Ok(UnifiedReader::Local(BufReader::new(file))),
            Err(error) => {
                tracing::debug!(path = %path.display(), %error, "open source failed");
                Err(SpreadsheetError::SourceNotFound(path.display().to_string()))
            }
        }
    }

    /// Wraps bytes that are already in memory
    pub(crate) fn from_bytes(bytes: Vec<u8>) -> UnifiedReader {
        UnifiedReader::Memory(Cursor::new(bytes))
    }
}

impl Read for UnifiedReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            UnifiedReader::Local(reader) => reader.read(buf),
            UnifiedReader::Memory(reader) => reader.read(buf),
        }
    }
}

impl Seek for UnifiedReader {
    fn seek(&mut self, pos: std::io::SeekFrom) -> std::io::Result<u64> {
        match self {
            UnifiedReader::Local(reader) => reader.seek(pos),
            UnifiedReader::Memory(reader) => reader.seek(pos),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_local_file() {
        // Cargo.toml always exists at the crate root during tests
        let result = UnifiedReader::open(Path::new("Cargo.toml"));
        assert!(result.is_ok(), "Failed to open local file: {:?}", result.err());

        let result = UnifiedReader::open(Path::new("non_existent_file.xlsx"));
        match result {
            Err(SpreadsheetError::SourceNotFound(name)) => assert_eq!(name, "non_existent_file.xlsx"),
            _ => panic!("Should fail to open non-existent file"),
        }
    }

    #[test]
    fn test_read_memory() {
        let mut reader = UnifiedReader::from_bytes(b"sheet".to_vec());
        let mut text = String::new();
        reader.read_to_string(&mut text).unwrap();
        assert_eq!(text, "sheet");

        reader.seek(std::io::SeekFrom::Start(2)).unwrap();
        text.clear();
        reader.read_to_string(&mut text).unwrap();
        assert_eq!(text, "eet");
    }
}
