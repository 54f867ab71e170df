//! XML mapping between resource records and API documents.
//!
//! - [`request`]: builds request documents from records
//! - [`response`]: interprets response documents and reads record fragments
//! - [`utils`]: DOM navigation helpers

pub mod request;
pub mod response;
pub mod utils;

pub use request::{build_request, Request};
pub use response::{
    check_status, find_fragment, find_fragments, read_fragment, read_identifier, Response,
};
pub use utils::{element_children, find_child, get_tag_name, is_api_element, text_content};
