//! Adapters - in-memory implementations of the collaborator ports

pub mod fixture;
pub mod in_memory;

pub use fixture::Fixture;
pub use in_memory::{InMemoryDocumentStore, InMemoryUserStore};
