use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::role_assignment::RoleAssignment;

/// Boundary to the role-assignment service: resolves the role assignments an
/// actor currently holds. Implementations must tolerate unknown actors by
/// returning an empty list rather than an error.
#[async_trait]
pub trait RoleAssignmentProvider: Send + Sync {
    /// All role assignments held by the actor.
    async fn assignments_for(&self, actor_id: Uuid) -> Result<Vec<RoleAssignment>, AppError>;

    /// Total number of assignments the provider currently knows about.
    async fn assignment_count(&self) -> Result<usize, AppError>;
}

/// Role assignments held in memory, keyed by actor. Backs local deployments
/// and tests; production deployments swap in a client for the remote
/// role-assignment service behind the same trait.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoleAssignmentProvider {
    by_actor: HashMap<Uuid, Vec<RoleAssignment>>,
}

impl InMemoryRoleAssignmentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_assignments(assignments: impl IntoIterator<Item = RoleAssignment>) -> Self {
        let mut by_actor: HashMap<Uuid, Vec<RoleAssignment>> = HashMap::new();
        for assignment in assignments {
            by_actor
                .entry(assignment.actor_id)
                .or_default()
                .push(assignment);
        }
        Self { by_actor }
    }

    /// Load a flat JSON array of role assignments and group it by actor id.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|err| {
            AppError::configuration(format!(
                "failed to read role assignments from {}: {err}",
                path.display()
            ))
        })?;

        let assignments: Vec<RoleAssignment> = serde_json::from_str(&raw).map_err(|err| {
            AppError::configuration(format!(
                "invalid role assignment file {}: {err}",
                path.display()
            ))
        })?;

        Ok(Self::from_assignments(assignments))
    }
}

#[async_trait]
impl RoleAssignmentProvider for InMemoryRoleAssignmentProvider {
    async fn assignments_for(&self, actor_id: Uuid) -> Result<Vec<RoleAssignment>, AppError> {
        Ok(self.by_actor.get(&actor_id).cloned().unwrap_or_default())
    }

    async fn assignment_count(&self) -> Result<usize, AppError> {
        Ok(self.by_actor.values().map(Vec::len).sum())
    }
}
