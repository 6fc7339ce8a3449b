//! Agmon Protocol - Wire contract for the language server status API
//!
//! This crate describes the single RPC the monitor speaks: the
//! Connect-style `GetUserStatus` call on the local Antigravity
//! language server. Request constants and body types live in
//! [`message`]; the tolerant response decode lives in [`parse`].

pub mod message;
pub mod parse;

pub use message::{
    status_url, RequestMetadata, StatusRequest, CONNECT_PROTOCOL_HEADER, CONNECT_PROTOCOL_VERSION,
    CSRF_TOKEN_HEADER, STATUS_ENDPOINT_PATH,
};
pub use parse::RawStatusResponse;
