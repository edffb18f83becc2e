//! # CLM Directory
//!
//! Organization user rosters with lookup and filtering by id.
//!
//! - `Roster` - immutable snapshot of one organization's users
//! - `UserDirectory` - refresh-and-swap holder of the current roster
//! - `RosterSource` - port for loading rosters

pub mod error;
pub mod roster;
pub mod user_directory;

pub use error::DirectoryError;
pub use roster::Roster;
pub use user_directory::{RosterSource, UserDirectory};
