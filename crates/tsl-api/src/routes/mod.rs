//! # Route Modules
//!
//! - `status_list`: `/ui/status-list` and `/ui/status-list/aggregation`.

pub mod status_list;
