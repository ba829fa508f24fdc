//! pulsetop: a terminal dashboard that polls a remote status service over
//! HTTP and blends in best-effort local host metrics.

pub mod api;
pub mod app;
pub mod probe;
pub mod profiles;
pub mod refresh;
pub mod store;
pub mod types;
pub mod ui;
