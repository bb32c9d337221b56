pub mod config;
pub mod debounce;
pub mod types;
