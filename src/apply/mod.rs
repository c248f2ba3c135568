use anyhow::Result;
use fs_err as fs;
use portfolio_gen::archive::PackagedArchive;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, Clone)]
pub struct WriteSummary {
    pub path: PathBuf,
    pub bytes: u64,
    pub replaced: bool,
}

/// Write the archive to `path` through a temp file in the same directory, so
/// a crash never leaves a half-written ZIP behind.
pub fn write_archive(path: &Path, archive: &PackagedArchive) -> Result<WriteSummary> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;

    let replaced = path.exists();
    let mut tmp = NamedTempFile::new_in(&parent)?;
    tmp.write_all(&archive.bytes)?;
    tmp.flush()?;
    tmp.persist(path)?;

    tracing::info!(path = %path.display(), bytes = archive.len(), "archive written");
    Ok(WriteSummary {
        path: path.to_path_buf(),
        bytes: archive.len() as u64,
        replaced,
    })
}
