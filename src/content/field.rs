//! Field projection and projected records
//!
//! Callers name the fields they want exposed; a record only ever carries
//! those fields. Field names are validated when the projection is built.

use indexmap::{IndexMap, IndexSet};
use serde::{Serialize, Serializer};
use serde_yaml::Value;
use std::fmt;
use std::str::FromStr;

use super::error::{ContentError, Result};
use super::frontmatter::is_truthy;
use super::{FrontMatter, PostId};

/// A field that can be requested from a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// Synthetic: `category/slug`
    Slug,
    /// Synthetic: raw body after the front matter
    Content,
    Title,
    Date,
    Description,
    Image,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Slug,
        Field::Content,
        Field::Title,
        Field::Date,
        Field::Description,
        Field::Image,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::Slug => "slug",
            Field::Content => "content",
            Field::Title => "title",
            Field::Date => "date",
            Field::Description => "description",
            Field::Image => "image",
        }
    }
}

impl FromStr for Field {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self> {
        Field::ALL
            .into_iter()
            .find(|f| f.name() == s.trim())
            .ok_or_else(|| ContentError::UnknownField(s.to_string()))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// An ordered set of requested fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    fields: IndexSet<Field>,
}

impl Projection {
    pub fn new<I: IntoIterator<Item = Field>>(fields: I) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }

    /// Build a projection from field names, rejecting unknown names
    pub fn parse<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fields = names
            .into_iter()
            .map(|name| name.as_ref().parse::<Field>())
            .collect::<Result<IndexSet<_>>>()?;
        Ok(Self { fields })
    }

    /// Every known field
    pub fn all() -> Self {
        Self::new(Field::ALL)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.fields.contains(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = Field> + '_ {
        self.fields.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Project a post onto the requested fields
    pub fn apply(&self, id: &PostId, front_matter: &FrontMatter, body: &str) -> ContentRecord {
        let mut fields = IndexMap::with_capacity(self.fields.len());

        for field in self.iter() {
            match field {
                Field::Slug => {
                    fields.insert(field, Value::String(id.to_string()));
                }
                Field::Content => {
                    fields.insert(field, Value::String(body.to_string()));
                }
                _ => {
                    if let Some(value) = front_matter.get(field.name()).filter(|v| is_truthy(v)) {
                        fields.insert(field, value.clone());
                    }
                }
            }
        }

        ContentRecord { fields }
    }
}

impl FromStr for Projection {
    type Err = ContentError;

    /// Parse a comma-separated list such as `slug,date,title`
    fn from_str(s: &str) -> Result<Self> {
        Projection::parse(s.split(',').filter(|name| !name.trim().is_empty()))
    }
}

/// A post projected onto a caller-selected set of fields
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ContentRecord {
    fields: IndexMap<Field, Value>,
}

impl ContentRecord {
    pub fn get(&self, field: Field) -> Option<&Value> {
        self.fields.get(&field)
    }

    pub fn get_str(&self, field: Field) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.fields.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn slug(&self) -> Option<&str> {
        self.get_str(Field::Slug)
    }

    pub fn title(&self) -> Option<&str> {
        self.get_str(Field::Title)
    }

    pub fn date(&self) -> Option<&str> {
        self.get_str(Field::Date)
    }

    pub fn description(&self) -> Option<&str> {
        self.get_str(Field::Description)
    }

    pub fn content(&self) -> Option<&str> {
        self.get_str(Field::Content)
    }
}
