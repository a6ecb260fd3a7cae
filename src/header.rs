// Raw values; empty ones are treated as absent later.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NoteHeader {
    pub title: Option<String>,
    pub date: Option<String>,
    pub keywords: Option<String>,
}

enum Field {
    Title,
    Date,
    Keywords,
}

fn split_field(line: &str) -> Option<(Field, &str)> {
    if let Some(value) = line.strip_prefix("Title:") {
        Some((Field::Title, value))
    } else if let Some(value) = line.strip_prefix("Date:") {
        Some((Field::Date, value))
    } else {
        line.strip_prefix("Keywords:")
            .map(|value| (Field::Keywords, value))
    }
}

impl NoteHeader {
    fn record(&mut self, field: Field, value: &str) {
        let slot = match field {
            Field::Title => &mut self.title,
            Field::Date => &mut self.date,
            Field::Keywords => &mut self.keywords,
        };
        if slot.is_none() {
            *slot = Some(value.trim().to_string());
        }
    }
}

/// Splits note text into its leading `Title:`/`Date:`/`Keywords:` fields and
/// the body. The first occurrence of a field wins.
pub fn extract_header(text: &str) -> (NoteHeader, &str) {
    let mut header = NoteHeader::default();
    let mut consumed = 0;
    let mut seen_field = false;

    for line in text.split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);
        if content.trim().is_empty() {
            if seen_field {
                consumed += line.len();
            }
            break;
        }
        let Some((field, value)) = split_field(content) else {
            break;
        };
        header.record(field, value);
        seen_field = true;
        consumed += line.len();
    }

    (header, &text[consumed..])
}
