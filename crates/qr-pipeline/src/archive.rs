//! ZIP archive assembly.

use std::collections::BTreeMap;
use std::io::{Cursor, Write};

use chrono::{DateTime, Utc};
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::PipelineError;

/// Subfolder inside the archive holding every image.
pub const ARCHIVE_FOLDER: &str = "qr-codes";

/// Accumulates named PNG blobs and packs them into one ZIP at the end.
///
/// Entries are keyed by name; inserting a duplicate name overwrites the
/// previous blob. Nothing is written until [`finalize`](Self::finalize).
#[derive(Debug, Default)]
pub struct ArchiveBuilder {
    entries: BTreeMap<String, Vec<u8>>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an image under `name` (folder prefix is applied at write time).
    pub fn insert(&mut self, name: String, data: Vec<u8>) {
        self.entries.insert(name, data);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write all entries into a deflate-compressed ZIP and return its bytes.
    pub fn finalize(self) -> Result<Vec<u8>, PipelineError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for (name, data) in &self.entries {
            writer.start_file(format!("{ARCHIVE_FOLDER}/{name}"), options.clone())?;
            writer.write_all(data)?;
        }

        let cursor = writer.finish()?;
        Ok(cursor.into_inner())
    }
}

/// Download file name for an archive finalized at `now`.
///
/// Seconds-precision UTC timestamp with colons flattened to hyphens so the
/// name is valid on every filesystem.
pub fn archive_file_name(now: DateTime<Utc>) -> String {
    format!("QRMaker-{}.zip", now.format("%Y-%m-%dT%H-%M-%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn finalize_writes_entries_under_the_archive_folder() {
        let mut builder = ArchiveBuilder::new();
        builder.insert("AB00.png".into(), vec![1, 2, 3]);
        builder.insert("AB01.png".into(), vec![4, 5, 6]);
        let bytes = builder.finalize().unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);
        assert!(archive.by_name("qr-codes/AB00.png").is_ok());
        assert!(archive.by_name("qr-codes/AB01.png").is_ok());
    }

    #[test]
    fn duplicate_names_overwrite() {
        use std::io::Read;

        let mut builder = ArchiveBuilder::new();
        builder.insert("AB00.png".into(), vec![1]);
        builder.insert("AB00.png".into(), vec![2]);
        assert_eq!(builder.len(), 1);

        let bytes = builder.finalize().unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut content = Vec::new();
        archive
            .by_name("qr-codes/AB00.png")
            .unwrap()
            .read_to_end(&mut content)
            .unwrap();
        assert_eq!(content, vec![2]);
    }

    #[test]
    fn empty_builder_finalizes_to_a_valid_archive() {
        let bytes = ArchiveBuilder::new().finalize().unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 0);
    }

    #[test]
    fn archive_file_name_flattens_colons() {
        let ts = Utc.with_ymd_and_hms(2026, 8, 7, 12, 34, 56).unwrap();
        assert_eq!(archive_file_name(ts), "QRMaker-2026-08-07T12-34-56.zip");
    }
}
