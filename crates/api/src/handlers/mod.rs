//! Request handlers.
//!
//! [`entity`] is written once against `EntityRepo` and serves all seven
//! content tables; the other modules cover the few routes that do not fit
//! that shape.

pub mod carousel;
pub mod email;
pub mod entity;
pub mod files;
