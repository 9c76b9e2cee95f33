//! In-memory identity and membership store for tests.

use super::{
    DirectoryError, DirectoryResult, MembershipStore, OrganizationId, ProjectId, Role,
    StatusDirectory, StatusId, User, UserDirectory, UserId,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory implementation of every identity port.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    state: Arc<RwLock<DirectoryState>>,
}

#[derive(Debug, Default)]
struct DirectoryState {
    users: HashMap<UserId, User>,
    statuses: HashMap<StatusId, String>,
    organizations: HashMap<OrganizationId, String>,
    projects: HashMap<ProjectId, (OrganizationId, String)>,
    organization_members: HashMap<(OrganizationId, UserId), Role>,
    project_members: HashMap<(ProjectId, UserId), Role>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn write(&self) -> DirectoryResult<std::sync::RwLockWriteGuard<'_, DirectoryState>> {
        self.state
            .write()
            .map_err(|err| DirectoryError::store(std::io::Error::other(err.to_string())))
    }

    fn read(&self) -> DirectoryResult<std::sync::RwLockReadGuard<'_, DirectoryState>> {
        self.state
            .read()
            .map_err(|err| DirectoryError::store(std::io::Error::other(err.to_string())))
    }

    /// Seeds a user record, returning its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Store`] when the backing lock is poisoned.
    pub fn seed_user(
        &self,
        name: impl Into<String>,
        email: Option<String>,
    ) -> DirectoryResult<UserId> {
        let user = User::new(UserId::new(), name, email);
        let id = user.id;
        self.write()?.users.insert(id, user);
        Ok(id)
    }

    /// Seeds a status display name, returning its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Store`] when the backing lock is poisoned.
    pub fn seed_status(&self, name: impl Into<String>) -> DirectoryResult<StatusId> {
        let id = StatusId::new();
        self.write()?.statuses.insert(id, name.into());
        Ok(id)
    }

    /// Seeds an organization, returning its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Store`] when the backing lock is poisoned.
    pub fn seed_organization(&self, name: impl Into<String>) -> DirectoryResult<OrganizationId> {
        let id = OrganizationId::new();
        self.write()?.organizations.insert(id, name.into());
        Ok(id)
    }

    /// Seeds a project under an organization, returning its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Store`] when the backing lock is poisoned.
    pub fn seed_project(
        &self,
        org: OrganizationId,
        name: impl Into<String>,
    ) -> DirectoryResult<ProjectId> {
        let id = ProjectId::new();
        self.write()?.projects.insert(id, (org, name.into()));
        Ok(id)
    }

    /// Returns the stored organization role for a member, if any.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Store`] when the backing lock is poisoned.
    pub fn organization_role(
        &self,
        org: OrganizationId,
        user: UserId,
    ) -> DirectoryResult<Option<Role>> {
        Ok(self.read()?.organization_members.get(&(org, user)).copied())
    }

    /// Returns the stored project role for a member, if any.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Store`] when the backing lock is poisoned.
    pub fn project_role(&self, project: ProjectId, user: UserId) -> DirectoryResult<Option<Role>> {
        Ok(self.read()?.project_members.get(&(project, user)).copied())
    }
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn find_by_id(&self, id: UserId) -> DirectoryResult<Option<User>> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> DirectoryResult<Option<User>> {
        Ok(self
            .read()?
            .users
            .values()
            .find(|user| user.email.as_deref() == Some(email))
            .cloned())
    }

    async fn find_by_names(&self, names: &[String]) -> DirectoryResult<Vec<User>> {
        Ok(self
            .read()?
            .users
            .values()
            .filter(|user| names.iter().any(|name| *name == user.name))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl StatusDirectory for InMemoryDirectory {
    async fn status_name(&self, id: StatusId) -> DirectoryResult<Option<String>> {
        Ok(self.read()?.statuses.get(&id).cloned())
    }
}

#[async_trait]
impl MembershipStore for InMemoryDirectory {
    async fn organization_name(&self, org: OrganizationId) -> DirectoryResult<Option<String>> {
        Ok(self.read()?.organizations.get(&org).cloned())
    }

    async fn is_organization_member(
        &self,
        org: OrganizationId,
        user: UserId,
    ) -> DirectoryResult<bool> {
        Ok(self.read()?.organization_members.contains_key(&(org, user)))
    }

    async fn attach_organization_member(
        &self,
        org: OrganizationId,
        user: UserId,
        role: Role,
    ) -> DirectoryResult<()> {
        self.write()?.organization_members.insert((org, user), role);
        Ok(())
    }

    async fn is_project_member(&self, project: ProjectId, user: UserId) -> DirectoryResult<bool> {
        Ok(self.read()?.project_members.contains_key(&(project, user)))
    }

    async fn attach_project_member(
        &self,
        project: ProjectId,
        user: UserId,
        role: Role,
    ) -> DirectoryResult<()> {
        self.write()?.project_members.insert((project, user), role);
        Ok(())
    }

    async fn project_organization(
        &self,
        project: ProjectId,
    ) -> DirectoryResult<Option<OrganizationId>> {
        Ok(self.read()?.projects.get(&project).map(|(org, _)| *org))
    }

    async fn project_name(&self, project: ProjectId) -> DirectoryResult<Option<String>> {
        Ok(self
            .read()?
            .projects
            .get(&project)
            .map(|(_, name)| name.clone()))
    }
}
