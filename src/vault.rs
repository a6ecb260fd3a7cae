use anyhow::{bail, Context, Result};
use dialoguer::Confirm;
use log::{debug, error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Config;
use crate::filename::parse_filename;
use crate::markdown::find_candidate_files;
use crate::note::{convert_note, ConvertedNote, Outcome, SkipReason};
use crate::report::Report;
use crate::{MarkdownProcessing, MarkdownProcessor};

fn absolute(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => {
            absolute(parent).join(name)
        }
        _ => std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()),
    }
}

fn check_output_location(input: &Path, output: &Path, media_dir: &str) -> Result<()> {
    let input = absolute(input);
    let output = absolute(output);
    if input.starts_with(&output) {
        bail!(
            "output directory '{}' contains the input directory; refusing to clear it",
            output.display()
        );
    }
    if output.starts_with(input.join(media_dir)) {
        bail!(
            "output directory '{}' lies inside the media directory being copied",
            output.display()
        );
    }
    Ok(())
}

fn has_contents(dir: &Path) -> bool {
    fs::read_dir(dir)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}

// Deletes everything inside `output`.
pub fn prepare_output_dir(output: &Path) -> Result<()> {
    match fs::metadata(output) {
        Ok(metadata) if metadata.is_dir() => {
            for entry in fs::read_dir(output)
                .with_context(|| format!("failed to list '{}'", output.display()))?
            {
                let entry = entry?;
                let path = entry.path();
                let removed = if entry.file_type()?.is_dir() {
                    fs::remove_dir_all(&path)
                } else {
                    fs::remove_file(&path)
                };
                removed.with_context(|| format!("failed to remove '{}'", path.display()))?;
            }
            Ok(())
        }
        Ok(_) => bail!(
            "output path '{}' exists and is not a directory",
            output.display()
        ),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => fs::create_dir_all(output)
            .with_context(|| format!("failed to create '{}'", output.display())),
        Err(err) => {
            Err(err).with_context(|| format!("failed to inspect '{}'", output.display()))
        }
    }
}

/// Copies `src` into `dst` recursively, skipping symlinks. Returns the
/// number of files copied.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<usize> {
    fs::create_dir_all(dst).with_context(|| format!("failed to create '{}'", dst.display()))?;
    let mut copied = 0;

    for entry in WalkDir::new(src).min_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to walk '{}'", src.display()))?;
        let file_type = entry.file_type();
        if file_type.is_symlink() {
            warn!("Skipping symlink during copy: {}", entry.path().display());
            continue;
        }
        let target = dst.join(entry.path().strip_prefix(src)?);
        if file_type.is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("failed to create '{}'", target.display()))?;
        } else {
            fs::copy(entry.path(), &target).with_context(|| {
                format!(
                    "failed to copy '{}' to '{}'",
                    entry.path().display(),
                    target.display()
                )
            })?;
            copied += 1;
        }
    }

    Ok(copied)
}

pub fn process_candidate(processor: &MarkdownProcessor, path: &Path) -> Outcome {
    let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
        return Outcome::Skipped(SkipReason::UnreadableName);
    };
    let Some(name) = parse_filename(file_name) else {
        return Outcome::Skipped(SkipReason::NamePattern);
    };
    debug!("Matched {} as id {}", file_name, name.id);

    let written = processor
        .read_note(path)
        .and_then(|content| convert_note(&name, &content))
        .and_then(|text| processor.write_note(file_name, &text));

    match written {
        Ok(output_path) => Outcome::Converted(ConvertedNote {
            id: name.id,
            output_path,
        }),
        Err(err) => Outcome::Failed(err),
    }
}

/// Converts every note into the output directory and copies the media tree.
///
/// DESTRUCTIVE: everything already in the output directory is deleted first.
pub fn convert_archive(config: &Config, processor: &MarkdownProcessor) -> Result<Report> {
    let input = &processor.input_path;
    let output = &processor.output_path;

    if !input.is_dir() {
        bail!("input directory '{}' does not exist", input.display());
    }
    check_output_location(input, output, &config.media_dir)?;
    let candidates = find_candidate_files(input)?;

    if config.confirm_clear && has_contents(output) {
        let proceed = Confirm::new()
            .with_prompt(format!("Delete everything in '{}'?", output.display()))
            .default(false)
            .interact()?;
        if !proceed {
            bail!("aborted; '{}' left untouched", output.display());
        }
    }

    info!("Clearing output directory {}", output.display());
    prepare_output_dir(output)?;

    info!("Found {} candidate files", candidates.len());
    let mut report = Report::default();
    for path in &candidates {
        let file = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let outcome = process_candidate(processor, path);
        match &outcome {
            Outcome::Converted(note) => {
                info!("Converted: {}", file);
                debug!("Wrote id {} to {}", note.id, note.output_path.display());
            }
            Outcome::Skipped(reason) => warn!("Skipped: {} ({})", file, reason),
            Outcome::Failed(err) => error!("Failed: {}: {}", path.display(), err),
        }
        report.record(&file, &outcome);
    }

    let media = input.join(&config.media_dir);
    if media.is_dir() {
        let target = output.join(&config.media_dir);
        info!("Copying {} to {}", media.display(), target.display());
        report.media_files = copy_dir_recursive(&media, &target)?;
    }

    Ok(report)
}
