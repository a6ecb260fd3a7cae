/// Converts a `Keywords:` value such as `#productivity #communication` into
/// bare tags. Order and duplicates are preserved; a lone `#` yields nothing.
pub fn parse_keywords(value: &str) -> Vec<String> {
    value
        .split_whitespace()
        .map(|token| token.strip_prefix('#').unwrap_or(token))
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
