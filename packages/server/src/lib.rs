// PM Insights - API server
//
// Backend for the product-management insights application: document
// uploads, LLM-backed insight extraction, and dashboard listings over a
// PostgreSQL store.

pub mod config;
pub mod kernel;
pub mod server;

pub use config::*;
