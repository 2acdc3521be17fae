//! Client-create request types

mod field;
mod prepared;
mod template;

pub use field::ClientField;
pub use prepared::PreparedRequest;
pub use template::{
    ClientCreateRequest, ClientDetails, ClientValues, DEFAULT_AUTH_CONTEXT_REF,
    DEFAULT_CLIENT_AUTH_METHOD, DEFAULT_CLIENT_ID, DEFAULT_CLIENT_NAME, DEFAULT_GRANT_TYPE,
    DEFAULT_LOGO_URI, DEFAULT_RELYING_PARTY_ID, DEFAULT_REQUEST_TIME, DEFAULT_USER_CLAIM,
};
