//! Request document construction (record → XML).

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::{FreshBooksError, Result};
use crate::schema::ResourceSchema;
use crate::types::{Record, Verb};

/// A serialized API request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: String,
    body: String,
}

impl Request {
    /// Value of the root `method` attribute (e.g., `category.get`).
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Full XML document text.
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Build the request document for `verb` from `record`.
///
/// - `create`/`update`: a resource container with the identifier (if set)
///   followed by every present field. Empty values produce empty elements.
/// - `get`/`delete`: the identifier element only.
/// - `list`: no body.
///
/// The record is not modified.
///
/// # Errors
/// - `MissingIdentifier` when `get` or `delete` is built for a record without
///   an identifier.
/// - `InvalidField` when `create` or `update` carries a field whose name is
///   not an XML name, or which is named like the identifier element.
///
/// # Examples
/// ```
/// use freshbooks_client::schema::CATEGORY;
/// use freshbooks_client::types::{Record, Verb};
/// use freshbooks_client::xml::build_request;
///
/// let request = build_request(&CATEGORY, Verb::Get, &Record::with_id("12")).unwrap();
/// assert!(request.body().contains("<category_id>12</category_id>"));
/// ```
pub fn build_request(schema: &ResourceSchema, verb: Verb, record: &Record) -> Result<Request> {
    let method = schema.method(verb);
    let mut writer = Writer::new(Vec::new());

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    let mut root = BytesStart::new("request");
    root.push_attribute(("method", method.as_str()));
    writer.write_event(Event::Start(root))?;

    match verb {
        Verb::Create | Verb::Update => {
            let fields = schema.ordered(&record.fields);
            for (name, _) in &fields {
                schema.check_field_name(name)?;
            }

            writer.write_event(Event::Start(BytesStart::new(schema.element)))?;
            if let Some(id) = &record.id {
                write_text_element(&mut writer, schema.id_element, id)?;
            }
            for (name, value) in fields {
                write_text_element(&mut writer, name, value)?;
            }
            writer.write_event(Event::End(BytesEnd::new(schema.element)))?;
        }
        Verb::Get | Verb::Delete => {
            let id = record
                .id
                .as_deref()
                .ok_or_else(|| FreshBooksError::MissingIdentifier {
                    verb,
                    resource: schema.element.to_string(),
                })?;
            write_text_element(&mut writer, schema.id_element, id)?;
        }
        Verb::List => {}
    }

    writer.write_event(Event::End(BytesEnd::new("request")))?;

    let body = String::from_utf8(writer.into_inner())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    tracing::trace!(method = %method, body = %body, "built request");
    Ok(Request { method, body })
}

/// Write `<name>value</name>`, escaping the value.
fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, value: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
