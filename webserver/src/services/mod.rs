//! Service implementations
//!
//! Real implementations of the order store trait

pub mod file_store;
pub mod memory_store;

// Re-export service implementations
pub use file_store::JsonFileOrderStore;
pub use memory_store::InMemoryOrderStore;

#[cfg(test)]
mod tests;
