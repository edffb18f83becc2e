//! CLI Commands

pub mod roles;
pub mod users;
pub mod vars;

pub use roles::RolesCommand;
pub use users::UsersCommand;
pub use vars::VarsCommand;
