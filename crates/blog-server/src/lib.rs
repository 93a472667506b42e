//! blog server library entry.
//!
//! Wires storage, service, HTTP, config, and metrics into the blog-post CRUD
//! service. Consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod http;
pub mod obs;
pub mod ops;
pub mod router;
pub mod service;
pub mod storage;
