use once_cell::sync::Lazy;
use regex::Regex;

static NOTE_FILE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+) (.+)\.md$").expect("note file name pattern is valid"));

/// Identifier and title carried by a `<ID> <Title>.md` file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteName {
    pub id: String,
    pub title: String,
}

/// Splits a note file name into its identifier and title.
///
/// Returns `None` when the name has no leading digit run, no single space
/// after it, no `.md` suffix, or an empty title. Callers treat that as a skip,
/// not an error.
pub fn parse_filename(file_name: &str) -> Option<NoteName> {
    let captures = NOTE_FILE_NAME.captures(file_name)?;
    Some(NoteName {
        id: captures[1].to_string(),
        title: captures[2].to_string(),
    })
}
