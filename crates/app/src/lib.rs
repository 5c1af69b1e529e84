//! apiforge - command wiring
//!
//! Resolves one OpenAPI operation against one workspace environment and
//! renders it in the requested target.

use std::path::{Path, PathBuf};

use apiforge_application::{ApplicationError, PrepareRequest};
use apiforge_domain::{CodeSnippet, RenderTarget, RequestBuilder};
use apiforge_infrastructure::{
    EnvSecretsRepository, FallbackSecretsRepository, FileSecretsRepository,
    FileWorkspaceRepository, ImportError, OpenApiImporter, SettingsError, SettingsRepository,
    TokioFileSystem, generate_code,
};
use clap::{Parser, ValueEnum};

/// Environment variable naming the workspace directory.
pub const WORKSPACE_ENV: &str = "APIFORGE_WORKSPACE";

/// Errors surfaced by the command.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The API description could not be imported.
    #[error(transparent)]
    Import(#[from] ImportError),

    /// The workspace settings could not be read.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// The operation is not in the API description.
    #[error("operation not found: {0}")]
    UnknownOperation(String),

    /// Environment resolution failed.
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

/// Output format accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TargetArg {
    /// cURL command line
    Curl,
    /// HTTP notebook block
    Http,
    /// Python with requests
    #[value(alias = "py")]
    Python,
    /// JavaScript with fetch
    #[value(alias = "js", alias = "fetch")]
    Javascript,
    /// PowerShell with Invoke-RestMethod
    #[value(alias = "ps", alias = "pwsh")]
    Powershell,
    /// Ansible uri task
    Ansible,
}

impl From<TargetArg> for RenderTarget {
    fn from(target: TargetArg) -> Self {
        match target {
            TargetArg::Curl => Self::Curl,
            TargetArg::Http => Self::HttpFile,
            TargetArg::Python => Self::Python,
            TargetArg::Javascript => Self::JavaScript,
            TargetArg::Powershell => Self::PowerShell,
            TargetArg::Ansible => Self::Ansible,
        }
    }
}

/// Generate a ready-to-run request for one OpenAPI operation.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "apiforge", version)]
pub struct Invocation {
    /// OpenAPI 3 or Swagger 2 document, JSON or YAML.
    #[arg(value_name = "OPENAPI_FILE")]
    pub document: PathBuf,

    /// operationId or "METHOD /path".
    #[arg(value_name = "OPERATION")]
    pub operation: String,

    /// Environment id in the workspace.
    #[arg(value_name = "ENVIRONMENT_ID")]
    pub environment_id: String,

    /// Render target; the workspace settings default when absent.
    #[arg(value_enum, value_name = "TARGET")]
    pub target: Option<TargetArg>,

    /// Workspace root holding `.apiforge/`.
    #[arg(short, long, env = WORKSPACE_ENV, default_value = ".")]
    pub workspace: PathBuf,
}

/// Runs one invocation and returns the rendered snippet.
///
/// Secrets come from `.apiforge/secrets.json`, then from
/// `APIFORGE_SECRET_*` variables.
///
/// # Errors
///
/// Returns an error if the document, settings or environment cannot be
/// loaded, or the operation does not exist.
pub async fn run(invocation: &Invocation) -> Result<CodeSnippet, AppError> {
    run_with_env(invocation, EnvSecretsRepository::from_process()).await
}

/// Same as [`run`] with an explicit environment-variable secret source.
///
/// # Errors
///
/// See [`run`].
pub async fn run_with_env(
    invocation: &Invocation,
    env_secrets: EnvSecretsRepository,
) -> Result<CodeSnippet, AppError> {
    let workspace: &Path = &invocation.workspace;
    let settings = SettingsRepository::new().load(workspace).await?;

    let document = OpenApiImporter::new().load(&invocation.document).await?;
    let endpoint = document
        .find(&invocation.operation)
        .ok_or_else(|| AppError::UnknownOperation(invocation.operation.clone()))?;

    let fs = TokioFileSystem::new();
    let prepare = PrepareRequest::new(
        FileWorkspaceRepository::new(fs),
        FallbackSecretsRepository::new(FileSecretsRepository::new(fs), env_secrets),
        RequestBuilder::new(settings.auth_resolver()),
    );
    let prepared = prepare
        .execute(workspace, endpoint, &invocation.environment_id)
        .await?;

    let options = settings.codegen_options(invocation.target.map(RenderTarget::from));
    tracing::debug!(target_format = options.target.key(), "rendering request");
    Ok(generate_code(endpoint, &prepared.descriptor, &options))
}
