use crate::error::NoteError;
use crate::{MarkdownProcessing, MarkdownProcessor};
use anyhow::{Context, Result};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Lists the regular files directly inside `dir`, sorted by file name.
/// Subdirectories (the media tree included) are not candidates.
pub fn find_candidate_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut candidates = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        match entry {
            Ok(entry) if entry.file_type().is_file() => candidates.push(entry.into_path()),
            Ok(_) => {}
            Err(err) if err.depth() == 0 => {
                return Err(err)
                    .with_context(|| format!("failed to list '{}'", dir.display()));
            }
            Err(err) => warn!("Ignoring unreadable entry: {}", err),
        }
    }

    Ok(candidates)
}

impl MarkdownProcessing for MarkdownProcessor {
    fn read_note(&self, file_path: &Path) -> Result<String, NoteError> {
        let bytes = fs::read(file_path).map_err(|source| NoteError::Read {
            path: file_path.to_path_buf(),
            source,
        })?;
        String::from_utf8(bytes).map_err(|source| NoteError::Encoding {
            path: file_path.to_path_buf(),
            source,
        })
    }

    fn write_note(&self, file_name: &str, text: &str) -> Result<PathBuf, NoteError> {
        let path = self.output_path.join(file_name);
        fs::write(&path, text).map_err(|source| NoteError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}
