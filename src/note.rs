//! Conversion of one archive note into its Obsidian form.

use std::fmt;
use std::path::PathBuf;

use crate::backlinks::strip_backlinks;
use crate::error::NoteError;
use crate::filename::NoteName;
use crate::frontmatter::{self, NoteMetadata};
use crate::header::{extract_header, NoteHeader};
use crate::keywords::parse_keywords;

/// Why a candidate file was passed over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The file name is not valid UTF-8.
    UnreadableName,
    /// The file name does not match `<ID> <Title>.md`.
    NamePattern,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnreadableName => write!(f, "file name is not valid UTF-8"),
            SkipReason::NamePattern => write!(f, "name does not match '<ID> <Title>.md'"),
        }
    }
}

#[derive(Debug)]
pub struct ConvertedNote {
    pub id: String,
    pub output_path: PathBuf,
}

/// Result of handling one candidate file.
#[derive(Debug)]
pub enum Outcome {
    Converted(ConvertedNote),
    Skipped(SkipReason),
    Failed(NoteError),
}

/// Builds the frontmatter record. The file name's identifier is always the
/// `id` and the only alias; the header title wins over the file name title
/// unless it is empty.
pub fn collect_metadata(name: &NoteName, header: &NoteHeader) -> NoteMetadata {
    let title = header
        .title
        .as_deref()
        .filter(|title| !title.is_empty())
        .unwrap_or(&name.title)
        .to_string();
    let date = header.date.clone().filter(|date| !date.is_empty());
    let tags = header
        .keywords
        .as_deref()
        .map(parse_keywords)
        .unwrap_or_default();

    NoteMetadata {
        id: name.id.clone(),
        title,
        date,
        tags,
        aliases: vec![name.id.clone()],
    }
}

/// Rewrites the text of a note named `name` into Obsidian form.
pub fn convert_note(name: &NoteName, content: &str) -> Result<String, NoteError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let (header, body) = extract_header(content);
    let metadata = collect_metadata(name, &header);
    let body = strip_backlinks(body);
    frontmatter::render(&metadata, &body)
}
