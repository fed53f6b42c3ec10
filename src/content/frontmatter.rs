//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::Serialize;
use serde_yaml::Value;
use thiserror::Error;

const DELIMITER: &str = "---";

/// Reasons a front-matter block is rejected
#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("front matter opened with `---` but never closed")]
    Unterminated,

    #[error("front matter is not a key/value mapping")]
    NotAMapping,

    #[error("invalid YAML front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Front-matter data from a post, in source key order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FrontMatter {
    data: IndexMap<String, Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, body)
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let mut lines = content.split_inclusive('\n');
        let opening = match lines.next() {
            Some(line) if is_delimiter(line) => line,
            // No front-matter found
            _ => return Ok((FrontMatter::default(), content)),
        };

        let yaml_start = opening.len();
        let mut offset = yaml_start;
        for line in lines {
            if is_delimiter(line) {
                let yaml = &content[yaml_start..offset];
                let body = &content[offset + line.len()..];
                return Ok((Self::parse_yaml(yaml)?, body));
            }
            offset += line.len();
        }

        Err(FrontMatterError::Unterminated)
    }

    fn parse_yaml(yaml: &str) -> Result<Self, FrontMatterError> {
        if yaml.trim().is_empty() {
            return Ok(FrontMatter::default());
        }

        match serde_yaml::from_str::<Value>(yaml)? {
            Value::Null => Ok(FrontMatter::default()),
            Value::Mapping(mapping) => {
                let mut data = IndexMap::with_capacity(mapping.len());
                for (key, value) in mapping {
                    let key = match key {
                        Value::String(s) => s,
                        Value::Number(n) => n.to_string(),
                        Value::Bool(b) => b.to_string(),
                        _ => return Err(FrontMatterError::NotAMapping),
                    };
                    data.insert(key, value);
                }
                Ok(Self { data })
            }
            _ => Err(FrontMatterError::NotAMapping),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Get a string-valued key
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Whether a front-matter value counts as set. Null, `false`, zero and the
/// empty string do not.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Tagged(tagged) => is_truthy(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => true,
    }
}

/// Render a scalar value as text, used for string comparison of dates
pub fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => value_as_text(&tagged.value),
        _ => None,
    }
}

/// Parse a front-matter date as a calendar date and time. Month and day may
/// be written without zero padding.
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // RFC 3339 / ISO 8601 with offset, compared in UTC
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_utc())
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}
