pub mod change;
pub mod commit;
pub mod repository;
pub mod summary;
pub mod ticket;
