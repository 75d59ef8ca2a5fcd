//! Archive bundling.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use pkn_common::error::{PknError, PknResult};

/// One file inside an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ArchiveEntry {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Bundles named files into a single archive blob.
pub trait ArchiveBuilder: Send + Sync {
    /// Entries are written in the order given.
    fn build(&self, entries: &[ArchiveEntry]) -> PknResult<Vec<u8>>;
}

/// Zip archives with deflate compression.
#[derive(Debug, Clone, Copy)]
pub struct ZipArchiveBuilder {
    compression: CompressionMethod,
}

impl Default for ZipArchiveBuilder {
    fn default() -> Self {
        Self {
            compression: CompressionMethod::Deflated,
        }
    }
}

impl ZipArchiveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store entries without compression.
    pub fn stored() -> Self {
        Self {
            compression: CompressionMethod::Stored,
        }
    }
}

impl ArchiveBuilder for ZipArchiveBuilder {
    fn build(&self, entries: &[ArchiveEntry]) -> PknResult<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(self.compression);

        for entry in entries {
            writer
                .start_file(entry.name.as_str(), options)
                .map_err(|e| PknError::archive(format!("Failed to add {}: {e}", entry.name)))?;
            writer.write_all(&entry.bytes)?;
        }

        let cursor = writer
            .finish()
            .map_err(|e| PknError::archive(format!("Failed to finish archive: {e}")))?;
        Ok(cursor.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_entries_keep_order_and_content() {
        let entries = vec![
            ArchiveEntry::new("b.png", vec![1, 2, 3]),
            ArchiveEntry::new("a.png", vec![4, 5]),
        ];
        let bytes = ZipArchiveBuilder::new().build(&entries).unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);
        let mut first = archive.by_index(0).unwrap();
        assert_eq!(first.name(), "b.png");
        let mut content = Vec::new();
        first.read_to_end(&mut content).unwrap();
        assert_eq!(content, vec![1, 2, 3]);
        drop(first);
        assert_eq!(archive.by_index(1).unwrap().name(), "a.png");
    }

    #[test]
    fn test_empty_archive_is_valid() {
        let bytes = ZipArchiveBuilder::stored().build(&[]).unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 0);
    }
}
