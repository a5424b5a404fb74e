// handlers/mod.rs - route handlers grouped by concern
pub mod integration; // GHL integration lifecycle
pub mod system;      // service info and health
