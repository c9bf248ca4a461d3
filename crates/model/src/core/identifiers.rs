use crate::core::errors::ModelError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr, sync::Arc};

/// Qualified property name: a category plus a leaf name.
///
/// The textual form is `category/name`. Categories may nest (`metrics/cpu`),
/// so parsing splits on the last `/`. A bare name lives in the empty category.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyId {
    category: Arc<str>,
    name: Arc<str>,
}

impl PropertyId {
    pub fn new(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            category: Arc::from(category.into()),
            name: Arc::from(name.into()),
        }
    }

    /// Id naming a whole category rather than a single property.
    pub fn category_only(category: impl Into<String>) -> Self {
        Self::new(category, "")
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_category(&self) -> bool {
        self.name.is_empty()
    }

    /// Full path of the id, i.e. the category joined with the name.
    pub fn path(&self) -> String {
        self.to_string()
    }

    /// True if this id lives in `category` or in one of its sub-categories.
    pub fn is_in_category(&self, category: &str) -> bool {
        if category.is_empty() {
            return true;
        }
        let own = self.category();
        own == category
            || (own.len() > category.len()
                && own.starts_with(category)
                && own.as_bytes()[category.len()] == b'/')
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.category.is_empty(), self.name.is_empty()) {
            (true, _) => write!(f, "{}", self.name),
            (false, true) => write!(f, "{}", self.category),
            (false, false) => write!(f, "{}/{}", self.category, self.name),
        }
    }
}

impl FromStr for PropertyId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (category, name) = match s.rfind('/') {
            Some(pos) => (&s[..pos], &s[pos + 1..]),
            None => ("", s),
        };
        if name.is_empty() {
            return Err(ModelError::InvalidPropertyId(s.to_string()));
        }
        Ok(Self::new(category, name))
    }
}

impl Serialize for PropertyId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PropertyId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Identity of a resource: its type name plus the values of its key properties.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceKey(Arc<str>);

impl ResourceKey {
    pub fn new(id: impl Into<String>) -> Self {
        Self(Arc::from(id.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ResourceKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ResourceKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
