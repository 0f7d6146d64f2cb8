pub mod api;
pub mod cache;
pub mod category;
pub mod config;
pub mod error;
pub mod extract;
pub mod format;
pub mod intake;
pub mod locate;
pub mod payload;
pub mod policy;
pub mod ranked;
pub mod session;
// cmd and reports belong to the binary (main.rs).
