//! Response document interpretation (XML → record).

use roxmltree::{Document, Node};

use crate::error::{FreshBooksError, Result};
use crate::schema::ResourceSchema;
use crate::types::{Record, Verb};
use crate::xml::utils::{element_children, find_child, get_tag_name, is_api_element, text_content};

/// Status value of a successful response.
const STATUS_OK: &str = "ok";

/// A well-formed API response body.
///
/// Construction validates the text, so holding a `Response` means the body
/// is known to be well-formed XML. The DOM borrows from the body, so it is
/// not kept: [`Response::document`] parses again on each call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    body: String,
}

impl Response {
    /// Wrap a response body, rejecting malformed XML.
    pub fn parse(body: impl Into<String>) -> Result<Self> {
        let body = body.into();
        Document::parse(&body)?;
        Ok(Self { body })
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parse the body into a DOM. Callers parse once and pass the document on.
    pub fn document(&self) -> Result<Document<'_>> {
        Ok(Document::parse(&self.body)?)
    }
}

/// Verify the response's `status` attribute.
///
/// # Errors
/// - `Service` when status is not `ok`; the message is the text of the
///   `error` element (empty when absent).
/// - `MissingElement` when the root is not a `response` element or has no
///   `status` attribute.
pub fn check_status(
    doc: &Document<'_>,
    ns: &str,
    schema: &ResourceSchema,
    verb: Verb,
) -> Result<()> {
    let root = doc.root_element();
    if !is_api_element(root, ns, "response") {
        return Err(FreshBooksError::MissingElement {
            element: "response".to_string(),
            context: format!("{} reply (found <{}>)", schema.method(verb), get_tag_name(root)),
        });
    }

    let status = root
        .attribute("status")
        .ok_or_else(|| FreshBooksError::MissingElement {
            element: "response/@status".to_string(),
            context: format!("{} reply", schema.method(verb)),
        })?;

    if status == STATUS_OK {
        return Ok(());
    }

    let message = find_child(root, ns, "error")
        .map(text_content)
        .unwrap_or_default();
    tracing::warn!(
        method = %schema.method(verb),
        status,
        error = %message,
        "service rejected request"
    );

    Err(FreshBooksError::Service {
        verb,
        resource: schema.error_name(verb),
        message,
    })
}

/// Extract the identifier a `create` response assigns.
pub fn read_identifier(doc: &Document<'_>, ns: &str, schema: &ResourceSchema) -> Result<String> {
    find_child(doc.root_element(), ns, schema.id_element)
        .map(text_content)
        .ok_or_else(|| FreshBooksError::MissingElement {
            element: schema.id_element.to_string(),
            context: format!("{} reply", schema.method(Verb::Create)),
        })
}

/// First record fragment anywhere in the document.
pub fn find_fragment<'a, 'input>(
    doc: &'a Document<'input>,
    ns: &str,
    schema: &ResourceSchema,
) -> Option<Node<'a, 'input>> {
    doc.descendants()
        .find(|n| is_api_element(*n, ns, schema.element))
}

/// All record fragments in document order.
pub fn find_fragments<'a, 'input>(
    doc: &'a Document<'input>,
    ns: &'a str,
    schema: &'a ResourceSchema,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    doc.descendants()
        .filter(move |n| is_api_element(*n, ns, schema.element))
}

/// Read one record fragment.
///
/// Every child element becomes a field named by its local tag name, valued
/// with its untrimmed text. Non-element children are skipped. The identifier
/// element sets `id` instead of a field. Elements the schema does not declare
/// are kept like any other.
pub fn read_fragment(fragment: Node<'_, '_>, schema: &ResourceSchema) -> Record {
    let mut record = Record::default();
    for child in element_children(fragment) {
        let name = get_tag_name(child);
        let value = text_content(child);
        if name == schema.id_element {
            record.id = Some(value);
        } else {
            record.fields.set(name, value);
        }
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::API_NAMESPACE;
    use crate::schema::CATEGORY;
    use crate::xml::request::build_request;
    use pretty_assertions::assert_eq;

    fn parse(xml: &str) -> Document<'_> {
        Document::parse(xml).unwrap()
    }

    #[test]
    fn test_response_parse_rejects_malformed_xml() {
        let err = Response::parse("<response status=\"ok\">").unwrap_err();
        assert!(matches!(err, FreshBooksError::XmlParse(_)));
    }

    #[test]
    fn test_check_status_ok() {
        let doc = parse(r#"<response xmlns="http://www.freshbooks.com/api/" status="ok"/>"#);
        assert!(check_status(&doc, API_NAMESPACE, &CATEGORY, Verb::Get).is_ok());
    }

    #[test]
    fn test_check_status_fail_carries_service_text() {
        let doc = parse(
            r#"<response xmlns="http://www.freshbooks.com/api/" status="fail">
                 <error>Category not found.</error>
                 <code>40010</code>
               </response>"#,
        );
        let err = check_status(&doc, API_NAMESPACE, &CATEGORY, Verb::Get).unwrap_err();
        assert_eq!(err.to_string(), "CANNOT GET CATEGORY: Category not found.");
    }

    #[test]
    fn test_check_status_fail_without_error_element() {
        let doc = parse(r#"<response status="fail"/>"#);
        let err = check_status(&doc, API_NAMESPACE, &CATEGORY, Verb::List).unwrap_err();
        assert_eq!(err.to_string(), "CANNOT LIST CATEGORIES: ");
    }

    #[test]
    fn test_check_status_requires_response_root() {
        let doc = parse(r#"<html status="ok"/>"#);
        let err = check_status(&doc, API_NAMESPACE, &CATEGORY, Verb::Get).unwrap_err();
        assert!(matches!(err, FreshBooksError::MissingElement { .. }));
    }

    #[test]
    fn test_check_status_requires_status_attribute() {
        let doc = parse(r#"<response/>"#);
        let err = check_status(&doc, API_NAMESPACE, &CATEGORY, Verb::Get).unwrap_err();
        assert!(matches!(
            err,
            FreshBooksError::MissingElement { ref element, .. } if element == "response/@status"
        ));
    }

    #[test]
    fn test_read_identifier() {
        let doc = parse(
            r#"<response xmlns="http://www.freshbooks.com/api/" status="ok">
                 <category_id>42</category_id>
               </response>"#,
        );
        assert_eq!(read_identifier(&doc, API_NAMESPACE, &CATEGORY).unwrap(), "42");
    }

    #[test]
    fn test_read_fragment_open_mapping() {
        let doc = parse(
            r#"<response xmlns="http://www.freshbooks.com/api/" status="ok">
                 <category>
                   <category_id>3</category_id>
                   <name>Travel</name>
                   <tax1/>
                   <mystery>value</mystery>
                 </category>
               </response>"#,
        );
        let fragment = find_fragment(&doc, API_NAMESPACE, &CATEGORY).unwrap();
        let record = read_fragment(fragment, &CATEGORY);

        assert_eq!(record.id.as_deref(), Some("3"));
        let fields: Vec<_> = record.fields.iter().collect();
        assert_eq!(
            fields,
            vec![("name", "Travel"), ("tax1", ""), ("mystery", "value")]
        );
    }

    #[test]
    fn test_find_fragments_in_document_order() {
        let doc = parse(
            r#"<response xmlns="http://www.freshbooks.com/api/" status="ok">
                 <categories page="1" per_page="25" pages="1" total="2">
                   <category><category_id>1</category_id></category>
                   <category><category_id>2</category_id></category>
                 </categories>
               </response>"#,
        );
        let ids: Vec<_> = find_fragments(&doc, API_NAMESPACE, &CATEGORY)
            .map(|n| read_fragment(n, &CATEGORY).id.unwrap_or_default())
            .collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_request_fields_survive_round_trip() {
        let mut original = Record::with_id("5");
        original.fields.set("name", " Food & <Drink> ");
        original.fields.set("tax2", "");
        original.fields.set("note", "it's \"quoted\"");

        // Reuse the create request's <category> element as a reply fragment.
        let request = build_request(&CATEGORY, Verb::Create, &original).unwrap();
        let doc = parse(request.body());
        let fragment = find_fragment(&doc, API_NAMESPACE, &CATEGORY).unwrap();

        assert_eq!(read_fragment(fragment, &CATEGORY), original);
    }
}
