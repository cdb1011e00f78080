pub mod aggregate;
pub mod enrich;
pub mod production_changes;
pub mod render;
