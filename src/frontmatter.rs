//! Obsidian YAML frontmatter for converted notes.

use serde_yaml::Value;

use crate::error::NoteError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteMetadata {
    pub id: String,
    pub title: String,
    pub date: Option<String>,
    pub tags: Vec<String>,
    pub aliases: Vec<String>,
}

// YAML 1.1 readers (Obsidian plugins among them) still treat these as booleans.
const YAML11_BOOLEANS: &[&str] = &["y", "n", "yes", "no", "on", "off"];

fn is_printable(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{7e}' | '\u{85}'
        | '\u{a0}'..='\u{d7ff}' | '\u{e000}'..='\u{fffd}' | '\u{10000}'..='\u{10ffff}')
}

// Characters that must be written as escapes inside a double-quoted scalar.
fn needs_escape(c: char) -> bool {
    c.is_control() || !is_printable(c) || matches!(c, '\u{2028}' | '\u{2029}' | '\u{feff}')
}

fn is_plain_safe(value: &str) -> bool {
    if value.is_empty() || value != value.trim() {
        return false;
    }
    if value.chars().any(|c| c == '"' || c == '\'' || needs_escape(c)) {
        return false;
    }
    if YAML11_BOOLEANS
        .iter()
        .any(|word| value.eq_ignore_ascii_case(word))
    {
        return false;
    }
    matches!(serde_yaml::from_str::<Value>(value), Ok(Value::String(parsed)) if parsed == value)
}

fn double_quoted(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if needs_escape(c) => quoted.push_str(&format!("\\u{:04X}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Formats a text value as a YAML scalar, quoting it only when needed.
pub fn yaml_scalar(value: &str) -> String {
    if is_plain_safe(value) {
        value.to_string()
    } else {
        double_quoted(value)
    }
}

// The id stays bare while YAML reads it back as the same number.
fn id_scalar(id: &str) -> String {
    match serde_yaml::from_str::<Value>(id) {
        Ok(Value::Number(number)) if number.to_string() == id => id.to_string(),
        _ => yaml_scalar(id),
    }
}

fn render_fields(metadata: &NoteMetadata) -> String {
    let mut yaml = String::new();
    yaml.push_str(&format!("id: {}\n", id_scalar(&metadata.id)));
    yaml.push_str(&format!("title: {}\n", yaml_scalar(&metadata.title)));
    if let Some(date) = &metadata.date {
        yaml.push_str(&format!("date: {}\n", yaml_scalar(date)));
    }
    if !metadata.tags.is_empty() {
        yaml.push_str("tags:\n");
        for tag in &metadata.tags {
            yaml.push_str(&format!("- {}\n", yaml_scalar(tag)));
        }
    }
    yaml.push_str("aliases:\n");
    for alias in &metadata.aliases {
        yaml.push_str(&format!("- {}\n", yaml_scalar(alias)));
    }
    yaml
}

fn invalid(field: &str, found: Option<&Value>) -> NoteError {
    NoteError::InvalidFrontmatter(format!("`{field}` reads back as {found:?}"))
}

fn as_strings(value: Option<&Value>) -> Option<Vec<&str>> {
    match value {
        None => Some(Vec::new()),
        Some(Value::Sequence(items)) => items.iter().map(Value::as_str).collect(),
        Some(_) => None,
    }
}

fn check_round_trip(yaml: &str, metadata: &NoteMetadata) -> Result<(), NoteError> {
    let parsed: Value = serde_yaml::from_str(yaml)?;
    if !parsed.is_mapping() {
        return Err(NoteError::InvalidFrontmatter(
            "frontmatter is not a mapping".to_string(),
        ));
    }

    let id = parsed.get("id");
    let id_matches = match id {
        Some(Value::Number(number)) => number.to_string() == metadata.id,
        Some(Value::String(text)) => *text == metadata.id,
        _ => false,
    };
    if !id_matches {
        return Err(invalid("id", id));
    }

    let title = parsed.get("title");
    if title.and_then(Value::as_str) != Some(metadata.title.as_str()) {
        return Err(invalid("title", title));
    }

    let date = parsed.get("date");
    if date.and_then(Value::as_str) != metadata.date.as_deref()
        || (metadata.date.is_none() && date.is_some())
    {
        return Err(invalid("date", date));
    }

    let tags = parsed.get("tags");
    let expected_tags: Vec<&str> = metadata.tags.iter().map(String::as_str).collect();
    if as_strings(tags).as_ref() != Some(&expected_tags) {
        return Err(invalid("tags", tags));
    }

    let aliases = parsed.get("aliases");
    let expected_aliases: Vec<&str> = metadata.aliases.iter().map(String::as_str).collect();
    if aliases.is_none() || as_strings(aliases).as_ref() != Some(&expected_aliases) {
        return Err(invalid("aliases", aliases));
    }
    Ok(())
}

/// Renders the frontmatter block, one blank line, then `body` unchanged.
/// Fails with [`NoteError::InvalidFrontmatter`] if the block does not read
/// back to `metadata`.
pub fn render(metadata: &NoteMetadata, body: &str) -> Result<String, NoteError> {
    let fields = render_fields(metadata);
    check_round_trip(&fields, metadata)?;
    Ok(format!("---\n{fields}---\n\n{body}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(title: &str) -> NoteMetadata {
        NoteMetadata {
            id: "202504211559".to_string(),
            title: title.to_string(),
            date: Some("2025-04-21T15:59".to_string()),
            tags: vec!["productivity".to_string(), "communication".to_string()],
            aliases: vec!["202504211559".to_string()],
        }
    }

    fn header_of(rendered: &str) -> Value {
        let rest = rendered.strip_prefix("---\n").unwrap();
        let end = rest.find("\n---\n").unwrap();
        serde_yaml::from_str(&rest[..end]).unwrap()
    }

    #[test]
    fn renders_fields_in_order() {
        let rendered = render(&metadata("Ask first and summarize last"), "Body\n").unwrap();
        assert_eq!(
            rendered,
            "---\n\
             id: 202504211559\n\
             title: Ask first and summarize last\n\
             date: 2025-04-21T15:59\n\
             tags:\n\
             - productivity\n\
             - communication\n\
             aliases:\n\
             - \"202504211559\"\n\
             ---\n\
             \n\
             Body\n"
        );
    }

    #[test]
    fn omits_missing_date_and_empty_tags() {
        let mut meta = metadata("Plain");
        meta.date = None;
        meta.tags.clear();
        let rendered = render(&meta, "").unwrap();
        assert_eq!(
            rendered,
            "---\nid: 202504211559\ntitle: Plain\naliases:\n- \"202504211559\"\n---\n\n"
        );
    }

    #[test]
    fn body_is_appended_verbatim() {
        let body = "  indented\r\n\n\ntrailing   \n\n";
        let rendered = render(&metadata("T"), body).unwrap();
        assert!(rendered.ends_with(&format!("---\n\n{body}")));
    }

    #[test]
    fn quotes_titles_that_would_break_yaml() {
        for title in [
            "Ratio: 3 to 2",
            "Ends with colon:",
            "\"Quoted\" title",
            "It's mine",
            "# not a comment",
            "C# is fine but this # is not",
            "- dash",
            "[bracketed]",
            "{braced}",
            "&anchor",
            "*alias",
            "!tag",
            "|",
            ">",
            "%directive",
            "@mention",
            "`tick",
            "---",
            "...",
            "true",
            "No",
            "null",
            "~",
            "2024",
            "3.14",
            "0x1F",
            ".inf",
            " leading",
            "trailing ",
            "back\\slash: x",
            "tab\there",
        ] {
            let rendered = render(&metadata(title), "").unwrap();
            let header = header_of(&rendered);
            assert_eq!(
                header.get("title").and_then(Value::as_str),
                Some(title),
                "title {title:?} rendered as {rendered}"
            );
        }
    }

    #[test]
    fn plain_titles_stay_unquoted() {
        for title in ["Ask first and summarize last", "key:value", "C# basics", "a, b and c"] {
            let rendered = render(&metadata(title), "").unwrap();
            assert!(
                rendered.contains(&format!("\ntitle: {title}\n")),
                "{title:?} was quoted: {rendered}"
            );
        }
    }

    #[test]
    fn empty_title_is_quoted() {
        let rendered = render(&metadata(""), "").unwrap();
        assert!(rendered.contains("\ntitle: \"\"\n"));
        assert_eq!(header_of(&rendered).get("title").and_then(Value::as_str), Some(""));
    }

    #[test]
    fn dates_with_colon_space_are_quoted() {
        let mut meta = metadata("T");
        meta.date = Some("Monday: 9am".to_string());
        let rendered = render(&meta, "").unwrap();
        assert!(rendered.contains("\ndate: \"Monday: 9am\"\n"));
    }

    #[test]
    fn tags_are_quoted_when_needed() {
        let mut meta = metadata("T");
        meta.tags = vec!["#heading".to_string(), "2024".to_string(), "plain".to_string()];
        let rendered = render(&meta, "").unwrap();
        let header = header_of(&rendered);
        let tags: Vec<&str> = header
            .get("tags")
            .and_then(Value::as_sequence)
            .unwrap()
            .iter()
            .map(|tag| tag.as_str().unwrap())
            .collect();
        assert_eq!(tags, vec!["#heading", "2024", "plain"]);
        assert!(rendered.contains("\n- plain\n"));
    }

    #[test]
    fn control_characters_are_escaped() {
        assert_eq!(yaml_scalar("a\u{7}b"), "\"a\\u0007b\"");
        assert_eq!(yaml_scalar("say \"hi\""), "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn line_separators_and_noncharacters_are_escaped() {
        assert_eq!(yaml_scalar("a\u{2028}b"), "\"a\\u2028b\"");
        assert_eq!(yaml_scalar("a\u{2029}b"), "\"a\\u2029b\"");
        assert_eq!(yaml_scalar("\u{feff}x"), "\"\\uFEFFx\"");
        assert_eq!(yaml_scalar("x\u{fffe}"), "\"x\\uFFFE\"");

        for title in ["a\u{2028}b", "a\u{2029}b", "x\u{fffe}", "x\u{ffff}", "\u{feff}x"] {
            let rendered = render(&metadata(title), "").unwrap();
            assert_eq!(
                header_of(&rendered).get("title").and_then(Value::as_str),
                Some(title)
            );
        }
    }

    #[test]
    fn aliases_read_back_as_strings() {
        let rendered = render(&metadata("T"), "").unwrap();
        let header = header_of(&rendered);
        let aliases = header.get("aliases").and_then(Value::as_sequence).unwrap();
        assert_eq!(aliases, &vec![Value::String("202504211559".to_string())]);
        assert_eq!(header.get("id").and_then(Value::as_u64), Some(202504211559));
    }

    #[test]
    fn oversized_id_is_quoted() {
        let id = "9".repeat(40);
        let mut meta = metadata("T");
        meta.id = id.clone();
        meta.aliases = vec![id.clone()];
        let rendered = render(&meta, "").unwrap();
        assert!(rendered.contains(&format!("\nid: \"{id}\"\n")));
        let header = header_of(&rendered);
        assert_eq!(header.get("id").and_then(Value::as_str), Some(id.as_str()));
    }

    #[test]
    fn id_with_leading_zeros_keeps_its_digits() {
        let mut meta = metadata("T");
        meta.id = "0012".to_string();
        meta.aliases = vec!["0012".to_string()];
        let rendered = render(&meta, "").unwrap();
        let header = header_of(&rendered);
        let id = header.get("id").unwrap();
        assert!(
            id.as_str() == Some("0012")
                || id.as_u64().map(|n| n.to_string()).as_deref() == Some("0012")
        );
    }

    #[test]
    fn wrong_alias_fails_the_read_back() {
        let meta = metadata("T");
        let yaml = "id: 202504211559\ntitle: T\ndate: 2025-04-21T15:59\ntags:\n- productivity\n- communication\naliases:\n- \"1\"\n";
        assert!(matches!(
            check_round_trip(yaml, &meta),
            Err(NoteError::InvalidFrontmatter(_))
        ));
    }
}
