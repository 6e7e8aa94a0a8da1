//! HTTP handlers for all web routes.

pub mod api;
pub mod details;
pub mod igv;
pub mod network;
