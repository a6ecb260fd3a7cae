use once_cell::sync::Lazy;
use regex::Regex;

static BACKLINK_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Backlinks:[\s,]*\[\[[^\[\]]+\]\](?:[\s,]*\[\[[^\[\]]+\]\])*[\s,]*$")
        .expect("backlink line pattern is valid")
});

/// Whether `line` (without its terminator) is a `Backlinks: [[...]]` line.
pub fn is_backlink_line(line: &str) -> bool {
    BACKLINK_LINE.is_match(line)
}

/// Removes every backlink line from `body`, terminator included. Other
/// lines, wiki links elsewhere in the text among them, are left as they are.
pub fn strip_backlinks(body: &str) -> String {
    body.split_inclusive('\n')
        .filter(|line| !is_backlink_line(line.trim_end_matches(['\n', '\r'])))
        .collect()
}
