//! Resource schema descriptors.
//!
//! A descriptor names the XML elements of one resource kind and lists its
//! declared fields in wire order. The mapper loops over it in both
//! directions; fields outside the declared list are still carried, after the
//! declared ones.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{FreshBooksError, Result};
use crate::types::{FieldSet, Verb};

/// An XML name without a namespace prefix (NCName).
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ELEMENT_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}_][\p{L}\p{M}\p{N}._\x{B7}-]*$").expect("valid regex")
});

/// Static description of one API resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceSchema {
    /// Element name of a single record (e.g., `category`).
    pub element: &'static str,
    /// Plural name, used in list error messages.
    pub plural: &'static str,
    /// Element carrying the record identifier (e.g., `category_id`).
    pub id_element: &'static str,
    /// Declared data fields, in the order they are written.
    pub fields: &'static [&'static str],
}

/// Schema of the FreshBooks `category` resource.
pub const CATEGORY: ResourceSchema = ResourceSchema {
    element: "category",
    plural: "categories",
    id_element: "category_id",
    fields: &["name", "tax1", "tax2", "parent_id", "updated"],
};

impl ResourceSchema {
    /// Value of the request's `method` attribute for `verb`.
    ///
    /// # Examples
    /// ```
    /// use freshbooks_client::schema::CATEGORY;
    /// use freshbooks_client::types::Verb;
    ///
    /// assert_eq!(CATEGORY.method(Verb::Create), "category.create");
    /// ```
    pub fn method(&self, verb: Verb) -> String {
        format!("{}.{}", self.element, verb.as_str())
    }

    /// Resource name as it appears in service error messages.
    ///
    /// List failures name the plural (`CATEGORIES`), all others the singular.
    pub fn error_name(&self, verb: Verb) -> String {
        match verb {
            Verb::List => self.plural.to_uppercase(),
            _ => self.element.to_uppercase(),
        }
    }

    /// Whether `name` is one of the declared data fields.
    pub fn is_declared(&self, name: &str) -> bool {
        self.fields.contains(&name)
    }

    /// Check that `name` can be written as a data field element.
    ///
    /// # Errors
    /// `InvalidField` when `name` is not an XML name without prefix, or when
    /// it is the identifier element, which only the record id may fill.
    ///
    /// # Examples
    /// ```
    /// use freshbooks_client::schema::CATEGORY;
    ///
    /// assert!(CATEGORY.check_field_name("colour").is_ok());
    /// assert!(CATEGORY.check_field_name("bad name").is_err());
    /// assert!(CATEGORY.check_field_name("category_id").is_err());
    /// ```
    pub fn check_field_name(&self, name: &str) -> Result<()> {
        let reason = if name == self.id_element {
            "reserved for the record identifier"
        } else if !ELEMENT_NAME_PATTERN.is_match(name) {
            "not a valid XML element name"
        } else {
            return Ok(());
        };
        Err(FreshBooksError::InvalidField {
            name: name.to_string(),
            reason,
        })
    }

    /// Fields of `fields` in write order: declared ones in schema order, then
    /// the rest in insertion order.
    pub fn ordered<'a>(&self, fields: &'a FieldSet) -> Vec<(&'a str, &'a str)> {
        let declared = self
            .fields
            .iter()
            .filter_map(|name| fields.iter().find(|(key, _)| key == name));
        let extra = fields.iter().filter(|(key, _)| !self.is_declared(key));
        declared.chain(extra).collect()
    }
}
