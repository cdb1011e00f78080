pub mod changes;
pub mod config;
pub mod tool;
