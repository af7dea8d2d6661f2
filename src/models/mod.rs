//! Domain models
//!
//! Types shared by the schemas: the role enumeration, navigation links and
//! the persisted user record that outbound representations are built from.

pub mod link;
pub mod role;
pub mod user;

pub use link::*;
pub use role::*;
pub use user::*;
