//! Prepare request use case

use std::path::Path;

use apiforge_domain::{Endpoint, RequestBuilder, RequestDescriptor};

use crate::error::ApplicationResult;
use crate::ports::{SecretsRepository, WorkspaceRepository};

use super::resolve_environment::{ResolveEnvironment, ResolvedTarget};

/// A request descriptor together with the target it was built for.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    /// The resolved environment and schema.
    pub target: ResolvedTarget,
    /// The built request.
    pub descriptor: RequestDescriptor,
}

/// Resolves an environment and builds the request for one endpoint.
pub struct PrepareRequest<W, S> {
    resolve: ResolveEnvironment<W, S>,
    builder: RequestBuilder,
}

impl<W: WorkspaceRepository, S: SecretsRepository> PrepareRequest<W, S> {
    /// Creates a new `PrepareRequest` use case.
    pub const fn new(workspaces: W, secrets: S, builder: RequestBuilder) -> Self {
        Self {
            resolve: ResolveEnvironment::new(workspaces, secrets),
            builder,
        }
    }

    /// Executes the use case.
    ///
    /// # Errors
    /// Returns an error if the environment cannot be resolved.
    pub async fn execute(
        &self,
        workspace: &Path,
        endpoint: &Endpoint,
        environment_id: &str,
    ) -> ApplicationResult<PreparedRequest> {
        let target = self.resolve.execute(workspace, environment_id).await?;
        let descriptor = self
            .builder
            .build(endpoint, &target.environment, target.schema.as_ref());

        tracing::info!(
            endpoint = %endpoint.label(),
            environment = %target.environment.name,
            "prepared request"
        );

        Ok(PreparedRequest { target, descriptor })
    }
}
