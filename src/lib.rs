// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod config;
pub mod document;
pub mod error;
pub mod headings;
pub mod nav;
pub mod runtime;
pub mod tracker;
