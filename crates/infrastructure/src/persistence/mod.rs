//! Persistence implementations for the `.apiforge` workspace directory.
//!
//! ```text
//! workspace/
//!   .apiforge/
//!     workspace.json   schemas, groups and environments
//!     secrets.json     secret values (keep out of version control)
//!     settings.json    generator settings
//! ```

mod env_secrets;
mod file_system;
mod secrets_repository;
mod settings_repository;
mod workspace_repository;

use std::path::{Path, PathBuf};

use apiforge_application::ports::FileSystemError;

pub use env_secrets::{EnvSecretsRepository, FallbackSecretsRepository, SECRET_ENV_PREFIX};
pub use file_system::TokioFileSystem;
pub use secrets_repository::FileSecretsRepository;
pub use settings_repository::{SettingsError, SettingsRepository};
pub use workspace_repository::FileWorkspaceRepository;

/// Directory holding all workspace state.
pub const APIFORGE_DIR: &str = ".apiforge";

/// Path of a file inside the workspace state directory.
pub(crate) fn state_file(workspace: &Path, name: &str) -> PathBuf {
    workspace.join(APIFORGE_DIR).join(name)
}

/// Converts `FileSystemError` to `std::io::Error` for the port error types.
pub(crate) fn to_io_error(e: FileSystemError) -> std::io::Error {
    match e {
        FileSystemError::Io(io_err) => io_err,
        FileSystemError::NotFound(path) => {
            std::io::Error::new(std::io::ErrorKind::NotFound, path.display().to_string())
        }
        FileSystemError::PermissionDenied(path) => std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            path.display().to_string(),
        ),
    }
}
