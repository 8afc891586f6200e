//! Outgoing API request types

mod body;
mod header;
mod method;
mod spec;

pub use body::{FilePart, FormPart, JSON_CONTENT_TYPE, MultipartForm, RequestBody};
pub use header::{AUTHORIZATION, Header, Headers};
pub use method::HttpMethod;
pub use spec::ApiRequest;
