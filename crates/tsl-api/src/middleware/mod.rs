//! # Middleware
//!
//! Tower middleware layered around the status routes.

pub mod metrics;
