//! Top-level facade crate for the blog service.
//!
//! Re-exports core types and the server library so users can depend on a single crate.

pub mod core {
    pub use blog_core::*;
}

pub mod server {
    pub use blog_server::*;
}
