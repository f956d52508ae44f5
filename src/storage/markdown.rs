use crate::error::{ParaError, Result};
use serde_yaml::{Mapping, Value};

const FRONTMATTER_DELIMITER: &str = "---";
const TAGS_KEY: &str = "tags";

/// Split a note into its raw YAML block and the body that follows the
/// closing delimiter. Returns `None` when the note has no front matter.
///
/// The body is returned untouched, including its leading newline if any.
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let first_end = content.find('\n')?;
    if content[..first_end].trim_end() != FRONTMATTER_DELIMITER {
        return None;
    }

    let yaml_start = first_end + 1;
    let mut pos = yaml_start;
    loop {
        let line_end = content[pos..].find('\n').map(|i| pos + i);
        let line = &content[pos..line_end.unwrap_or(content.len())];
        if line.trim_end() == FRONTMATTER_DELIMITER {
            let body_start = line_end.map(|e| e + 1).unwrap_or(content.len());
            return Some((&content[yaml_start..pos], &content[body_start..]));
        }
        pos = line_end? + 1;
    }
}

/// The key-value metadata block at the top of a note.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    data: Mapping,
}

impl Frontmatter {
    /// Parse a note into its metadata and body. A note without front matter
    /// yields an empty document and the whole content as body.
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let Some((yaml, body)) = split_frontmatter(content) else {
            return Ok((Self::default(), content));
        };
        if yaml.trim().is_empty() {
            return Ok((Self::default(), body));
        }
        let data = match serde_yaml::from_str::<Value>(yaml)? {
            Value::Mapping(map) => map,
            Value::Null => Mapping::new(),
            other => {
                return Err(ParaError::Parse(format!(
                    "Front matter is not a key-value block: {:?}",
                    other
                )));
            }
        };
        Ok((Self { data }, body))
    }

    /// Render this block in front of `body`. An empty block over a note that
    /// had none leaves the note as plain body.
    pub fn render(&self, body: &str) -> Result<String> {
        if self.data.is_empty() {
            return Ok(body.to_string());
        }
        let yaml = serde_yaml::to_string(&self.data)?;

        let mut output = String::with_capacity(yaml.len() + body.len() + 8);
        output.push_str(FRONTMATTER_DELIMITER);
        output.push('\n');
        output.push_str(&yaml);
        if !yaml.ends_with('\n') {
            output.push('\n');
        }
        output.push_str(FRONTMATTER_DELIMITER);
        output.push('\n');
        output.push_str(body);
        Ok(output)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn insert(&mut self, key: &str, value: Value) {
        self.data.insert(Value::String(key.to_string()), value);
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.insert(key, Value::Bool(value));
    }

    /// Tags from either a YAML list or a comma/space separated string,
    /// without any leading `#`.
    pub fn tags(&self) -> Vec<String> {
        match self.get(TAGS_KEY) {
            Some(Value::Sequence(seq)) => seq.iter().filter_map(tag_value).collect(),
            Some(Value::String(s)) => split_tag_string(s),
            _ => Vec::new(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags().iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Add a tag unless it is already present. Returns whether it was added.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = normalize_tag(tag);
        if tag.is_empty() || self.has_tag(&tag) {
            return false;
        }
        let mut seq: Vec<Value> = self.tags().into_iter().map(Value::String).collect();
        seq.push(Value::String(tag));
        self.insert(TAGS_KEY, Value::Sequence(seq));
        true
    }
}

fn normalize_tag(tag: &str) -> String {
    tag.trim().trim_start_matches('#').to_string()
}

fn tag_value(value: &Value) -> Option<String> {
    let raw = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let tag = normalize_tag(&raw);
    (!tag.is_empty()).then_some(tag)
}

fn split_tag_string(s: &str) -> Vec<String> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .map(normalize_tag)
        .filter(|t| !t.is_empty())
        .collect()
}
