//! blog core: the post record and the error surface shared by the storage,
//! service, and HTTP layers.
//!
//! This crate carries no transport or runtime dependencies so the record and
//! error types can be reused by the server, tests, and tooling alike.
//!
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths surface as `BlogError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod post;

/// Shared result type.
pub use error::{BlogError, Result};
pub use post::{Post, PostId};
