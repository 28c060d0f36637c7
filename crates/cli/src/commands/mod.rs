//! CLI Commands

pub mod check;
pub mod init;
pub mod permission;
pub mod role;
pub mod validate;

pub use check::CheckCommand;
pub use init::InitCommand;
pub use permission::PermissionCommand;
pub use role::RoleCommand;
pub use validate::ValidateCommand;
