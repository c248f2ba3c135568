use bytes::Bytes;
use std::collections::HashSet;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::errors::GenError;
use crate::wire::{ArtifactNames, ArtifactSet};

pub const MIME_TYPE: &str = "application/zip";

/// A finished download: immutable bytes plus the name to offer them under.
#[derive(Debug, Clone)]
pub struct PackagedArchive {
    pub file_name: String,
    pub bytes: Bytes,
}

impl PackagedArchive {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn mime_type(&self) -> &'static str {
        MIME_TYPE
    }
}

/// Write `(file name, content)` pairs into an in-memory ZIP.
pub fn build(entries: &[(&str, &str)]) -> Result<Bytes, GenError> {
    let mut seen = HashSet::new();
    for (name, _) in entries {
        if name.trim().is_empty() {
            return Err(GenError::Archive("entry name must not be empty".into()));
        }
        if !seen.insert(*name) {
            return Err(GenError::Archive(format!("duplicate entry name: {name}")));
        }
    }

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        zip.start_file(*name, options)?;
        zip.write_all(content.as_bytes())
            .map_err(|e| GenError::Archive(format!("writing {name}: {e}")))?;
    }
    let cursor = zip.finish()?;
    Ok(Bytes::from(cursor.into_inner()))
}

pub fn package(set: &ArtifactSet, names: &ArtifactNames, file_name: &str) -> Result<PackagedArchive, GenError> {
    let bytes = build(&set.entries(names))?;
    tracing::info!(file = file_name, bytes = bytes.len(), "archive built");
    Ok(PackagedArchive {
        file_name: file_name.to_string(),
        bytes,
    })
}
