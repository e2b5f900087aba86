//! Domain building blocks shared by the database, mail and API crates.
//!
//! Nothing in here talks to PostgreSQL or SMTP. The only I/O lives in
//! [`blob_store`], which owns the upload directory on the local filesystem.

pub mod blob_store;
pub mod config;
pub mod error;
pub mod media;
pub mod types;
pub mod validation;
