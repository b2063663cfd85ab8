//! Splitting documents into statements, tag fields and transaction blocks

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::NarrativeBlock;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^:([0-9]{2}[A-Z]?):(.*)$").unwrap());

/// One `:tag:value` field, continuation lines included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagField {
    pub tag: String,
    pub value: String,
}

impl TagField {
    /// Value lines, trailing whitespace preserved
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.value.split('\n')
    }
}

fn source_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Split a document into statement segments
///
/// A line holding only `delimiter` closes a statement, as does a second
/// `:20:` field. Segments without any tag line are dropped.
pub fn split_statements(text: &str, delimiter: char) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut has_reference = false;

    let mut delimiter_buf = [0u8; 4];
    let delimiter: &str = delimiter.encode_utf8(&mut delimiter_buf);

    for line in source_lines(text) {
        if line.trim() == delimiter {
            push_segment(&mut segments, &mut current);
            has_reference = false;
            continue;
        }

        if line.starts_with(":20:") {
            if has_reference {
                push_segment(&mut segments, &mut current);
            }
            has_reference = true;
        }

        current.push(line);
    }
    push_segment(&mut segments, &mut current);

    segments
}

fn push_segment(segments: &mut Vec<String>, current: &mut Vec<&str>) {
    if current.iter().any(|line| TAG_RE.is_match(line)) {
        segments.push(current.join("\n"));
    }
    current.clear();
}

/// Tokenize a statement segment into tag fields
///
/// Lines before the first tag (bank header lines) are skipped.
pub fn tag_fields(segment: &str) -> Vec<TagField> {
    let mut fields: Vec<TagField> = Vec::new();

    for line in source_lines(segment) {
        if let Some(caps) = TAG_RE.captures(line) {
            fields.push(TagField {
                tag: caps[1].to_string(),
                value: caps[2].to_string(),
            });
        } else if let Some(field) = fields.last_mut() {
            field.value.push('\n');
            field.value.push_str(line);
        }
    }

    fields
}

/// Pair every `:61:` field with the `:86:` field directly following it
pub fn narrative_blocks(fields: &[TagField]) -> Vec<NarrativeBlock> {
    let mut blocks: Vec<NarrativeBlock> = Vec::new();
    let mut previous: Option<&str> = None;

    for field in fields {
        match field.tag.as_str() {
            "61" => blocks.push(NarrativeBlock::new(field.value.clone(), Vec::new())),
            "86" if previous == Some("61") => {
                if let Some(block) = blocks.last_mut() {
                    if !field.value.trim().is_empty() {
                        block.free_text = field.lines().map(str::to_string).collect();
                    }
                }
            }
            _ => {}
        }
        previous = Some(field.tag.as_str());
    }

    blocks
}

/// First field value for any of `tags`, in priority order
pub fn field_value<'a>(fields: &'a [TagField], tags: &[&str]) -> Option<&'a str> {
    tags.iter().find_map(|tag| {
        fields
            .iter()
            .find(|field| field.tag == *tag)
            .map(|field| field.value.trim())
    })
}
