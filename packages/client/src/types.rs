//! Core data types shared by the XML mapper and the resource entities.

use std::fmt;

/// Operation requested from the API.
///
/// Combined with a resource name it forms the request's `method` attribute
/// (e.g., `category.create`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Create,
    Update,
    Get,
    Delete,
    List,
}

impl Verb {
    /// Every verb, in the order the API documents them.
    pub const ALL: [Verb; 5] = [
        Verb::Create,
        Verb::Update,
        Verb::Get,
        Verb::Delete,
        Verb::List,
    ];

    /// Wire name used in the `method` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Create => "create",
            Verb::Update => "update",
            Verb::Get => "get",
            Verb::Delete => "delete",
            Verb::List => "list",
        }
    }

    /// Upper-case label used in service error messages.
    pub fn label(self) -> &'static str {
        match self {
            Verb::Create => "CREATE",
            Verb::Update => "UPDATE",
            Verb::Get => "GET",
            Verb::Delete => "DELETE",
            Verb::List => "LIST",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered mapping from field name to string value.
///
/// Setting an existing field replaces its value in place, so the original
/// insertion position is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    entries: Vec<(String, String)>,
}

impl FieldSet {
    /// An empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `name`, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set `name`, keeping its position when already present.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Remove `name`, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Whether `name` is present, even with an empty value.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for FieldSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = FieldSet::new();
        for (name, value) in iter {
            fields.set(name, value);
        }
        fields
    }
}

/// State of one remote record: its identifier plus its data fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub id: Option<String>,
    pub fields: FieldSet,
}

impl Record {
    /// A record carrying only an identifier.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            fields: FieldSet::new(),
        }
    }

    /// Overlay `other` onto this record.
    ///
    /// Fields present in `other` overwrite; fields only present here are kept.
    pub fn merge(&mut self, other: Record) {
        if other.id.is_some() {
            self.id = other.id;
        }
        for (name, value) in other.fields.entries {
            self.fields.set(name, value);
        }
    }
}

/// Options accepted by list operations.
///
/// Carries no parameters yet; listing always returns the server's default
/// result set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct ListOptions {}
