//! # CLM Variables
//!
//! Per end-user variable lookup for the automated dialogue engine.
//!
//! - `DocumentStore` - port to the hierarchical document database
//! - `VariableStore` - projects the `variables` bag out of end-user documents

pub mod document_store;
pub mod variable_store;

pub use document_store::{DocPath, DocumentStore};
pub use variable_store::{EndUserVariables, VariableBag, VariableStore, VARIABLES_FIELD};
