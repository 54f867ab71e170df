//! XML utility functions for navigating and extracting data from DOM trees.

use roxmltree::Node;

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use freshbooks_client::xml::get_tag_name;
///
/// let xml = r#"<response xmlns="http://www.freshbooks.com/api/"><category/></response>"#;
/// let doc = Document::parse(xml).unwrap();
/// let category = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(category), "category");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Check whether `node` is the API element `name`.
///
/// The element must either live in namespace `ns` or carry no namespace at
/// all; elements from any other namespace do not match.
pub fn is_api_element(node: Node<'_, '_>, ns: &str, name: &str) -> bool {
    node.is_element()
        && get_tag_name(node) == name
        && node.tag_name().namespace().is_none_or(|uri| uri == ns)
}

/// Find the first child API element with the given name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use freshbooks_client::xml::find_child;
///
/// let xml = r#"<response><error>Not found</error></response>"#;
/// let doc = Document::parse(xml).unwrap();
/// let root = doc.root_element();
///
/// assert!(find_child(root, "http://www.freshbooks.com/api/", "error").is_some());
/// assert!(find_child(root, "http://www.freshbooks.com/api/", "category").is_none());
/// ```
pub fn find_child<'a, 'input>(
    node: Node<'a, 'input>,
    ns: &str,
    name: &str,
) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| is_api_element(*child, ns, name))
}

/// Concatenated text of a node, untrimmed.
///
/// Entity references are already resolved by the parser, so the result is
/// the literal value the server sent. Returns an empty string for nodes with
/// no text.
pub fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// Get all element children of a node.
///
/// Excludes text nodes, comments and processing instructions.
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}
