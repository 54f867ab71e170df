//! The `category` resource.
//!
//! Every operation follows the same pipeline: build a request document from
//! the entity, send it through the owning [`FreshBooks`] client, check the
//! response status, then map the reply back onto the entity. `create` and
//! `update` finish with a `get`, because mutation replies carry at most the
//! identifier and never the stored record.
//!
//! Transport errors are returned untouched and leave the entity as it was.

use roxmltree::Document;
use tracing::debug;

use crate::client::FreshBooks;
use crate::error::{FreshBooksError, Result};
use crate::schema::{ResourceSchema, CATEGORY};
use crate::types::{FieldSet, ListOptions, Record, Verb};
use crate::xml::{
    build_request, check_status, find_fragment, find_fragments, read_fragment, read_identifier,
    Response,
};

/// One expense category.
///
/// Data lives in an open field set: declared fields have typed accessors,
/// anything else the server sends is reachable through [`Category::field`].
#[derive(Debug, Clone)]
pub struct Category {
    client: FreshBooks,
    record: Record,
}

impl Category {
    pub const SCHEMA: &'static ResourceSchema = &CATEGORY;

    /// An empty category bound to `client`.
    ///
    /// Usually obtained through [`FreshBooks::category`].
    pub fn new(client: FreshBooks) -> Self {
        Self {
            client,
            record: Record::default(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.record.id.as_deref()
    }

    pub fn set_id(&mut self, id: impl Into<String>) -> &mut Self {
        self.record.id = Some(id.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.field("name")
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.set_field("name", name)
    }

    pub fn tax1(&self) -> Option<&str> {
        self.field("tax1")
    }

    pub fn set_tax1(&mut self, tax_id: impl Into<String>) -> &mut Self {
        self.set_field("tax1", tax_id)
    }

    pub fn tax2(&self) -> Option<&str> {
        self.field("tax2")
    }

    pub fn set_tax2(&mut self, tax_id: impl Into<String>) -> &mut Self {
        self.set_field("tax2", tax_id)
    }

    pub fn parent_id(&self) -> Option<&str> {
        self.field("parent_id")
    }

    pub fn set_parent_id(&mut self, parent_id: impl Into<String>) -> &mut Self {
        self.set_field("parent_id", parent_id)
    }

    /// Server-maintained modification timestamp.
    pub fn updated(&self) -> Option<&str> {
        self.field("updated")
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.record.fields.get(name)
    }

    /// Set any field, declared or not.
    ///
    /// Names are checked when a request is built: the identifier element and
    /// names that are not XML names make `create` and `update` fail with
    /// `InvalidField`. Use [`Category::set_id`] for the identifier.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.record.fields.set(name, value);
        self
    }

    pub fn fields(&self) -> &FieldSet {
        &self.record.fields
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Create the category remotely, then reload it by its new identifier.
    #[tracing::instrument(skip(self))]
    pub async fn create(&mut self) -> Result<&Self> {
        let response = self.round_trip(Verb::Create, &self.record).await?;
        let id = {
            let doc = self.checked_document(&response, Verb::Create)?;
            read_identifier(&doc, self.client.namespace(), Self::SCHEMA)?
        };
        debug!(id = %id, "category created");

        // The record exists remotely from here on, even if the reload fails.
        self.record.id = Some(id.clone());
        self.get(id).await
    }

    /// Send the current fields, then reload the category.
    ///
    /// Fields set locally stay as they are if the update fails.
    #[tracing::instrument(skip(self), fields(id = ?self.record.id))]
    pub async fn update(&mut self) -> Result<&Self> {
        let id = self.require_id(Verb::Update)?;
        let response = self.round_trip(Verb::Update, &self.record).await?;
        self.checked_document(&response, Verb::Update)?;
        self.get(id).await
    }

    /// Load the category `id` into this entity.
    ///
    /// Fields from the reply overwrite local ones; fields absent from the
    /// reply are kept.
    #[tracing::instrument(skip(self, id))]
    pub async fn get(&mut self, id: impl Into<String>) -> Result<&Self> {
        let wanted = Record::with_id(id);
        let response = self.round_trip(Verb::Get, &wanted).await?;

        let mut fetched = {
            let doc = self.checked_document(&response, Verb::Get)?;
            let fragment = find_fragment(&doc, self.client.namespace(), Self::SCHEMA)
                .ok_or_else(|| FreshBooksError::MissingElement {
                    element: Self::SCHEMA.element.to_string(),
                    context: format!("{} reply", Self::SCHEMA.method(Verb::Get)),
                })?;
            read_fragment(fragment, Self::SCHEMA)
        };
        if fetched.id.is_none() {
            fetched.id = wanted.id;
        }

        debug!(id = ?fetched.id, fields = fetched.fields.len(), "category loaded");
        self.record.merge(fetched);
        Ok(&*self)
    }

    /// Delete the category remotely.
    ///
    /// The local entity is left untouched and becomes stale.
    #[tracing::instrument(skip(self), fields(id = ?self.record.id))]
    pub async fn delete(&self) -> Result<&Self> {
        self.require_id(Verb::Delete)?;
        let response = self.round_trip(Verb::Delete, &self.record).await?;
        self.checked_document(&response, Verb::Delete)?;
        debug!("category deleted");
        Ok(self)
    }

    /// List categories, in the order the server returns them.
    ///
    /// Each result is a fresh entity built through the owning client.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, options: &ListOptions) -> Result<Vec<Category>> {
        let response = self.round_trip(Verb::List, &Record::default()).await?;
        let doc = self.checked_document(&response, Verb::List)?;

        let categories: Vec<Category> = find_fragments(&doc, self.client.namespace(), Self::SCHEMA)
            .map(|fragment| {
                let mut category = self.client.category();
                category.record = read_fragment(fragment, Self::SCHEMA);
                category
            })
            .collect();

        debug!(count = categories.len(), "categories listed");
        Ok(categories)
    }

    /// Build and send one request.
    async fn round_trip(&self, verb: Verb, record: &Record) -> Result<Response> {
        let request = build_request(Self::SCHEMA, verb, record)?;
        self.client.send(&request).await
    }

    /// Parse `response` and check its status. Each reply is read through
    /// this once.
    fn checked_document<'r>(&self, response: &'r Response, verb: Verb) -> Result<Document<'r>> {
        let doc = response.document()?;
        check_status(&doc, self.client.namespace(), Self::SCHEMA, verb)?;
        Ok(doc)
    }

    fn require_id(&self, verb: Verb) -> Result<String> {
        self.record
            .id
            .clone()
            .ok_or_else(|| FreshBooksError::MissingIdentifier {
                verb,
                resource: Self::SCHEMA.element.to_string(),
            })
    }
}
