pub mod registry;
pub mod traits;

// Price source implementations
pub mod static_table;
