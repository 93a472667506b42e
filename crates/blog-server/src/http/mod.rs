//! Public HTTP API.
//!
//! - `handlers`: post CRUD endpoints.
//! - `middleware`: trailing-slash normalization, request timeout, request
//!   logging + latency metrics.

pub mod handlers;
pub mod middleware;
