//! Shared types used across all modules.
//!
//! Request values (paging, new users, credentials), response payloads,
//! and the role set. Other modules import from here rather than reaching
//! into each other's internals.

pub mod authority;
pub mod query;
pub mod user;

pub use authority::{Authority, AuthoritySet};
pub use query::PageableQuery;
pub use user::{AuthToken, Credentials, NewUser, User, UserList, UserPage};
