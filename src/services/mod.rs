//! Collaborator services
//!
//! The schemas never call these; callers use them to supply the `links`
//! passed to `build_response` and attached to collections.

pub mod link_service;

pub use link_service::LinkService;
