// Declare all modules
pub mod certs;
pub mod config;
pub mod email;
pub mod reminder;
pub mod scheduler;
pub mod utils;

// No re-exports here as they're handled in lib.rs
