//! In-memory invitation repository.

use crate::identity::OrganizationId;
use crate::invitation::domain::{Invitation, InvitationId, InviteToken, PersistedInvitationData};
use crate::invitation::ports::{
    InvitationRepository, InvitationRepositoryError, InvitationRepositoryResult,
};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory invitation repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInvitationRepository {
    state: Arc<RwLock<Vec<Invitation>>>,
}

impl InMemoryInvitationRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn write(
        &self,
    ) -> InvitationRepositoryResult<std::sync::RwLockWriteGuard<'_, Vec<Invitation>>> {
        self.state.write().map_err(|err| {
            InvitationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn read(&self) -> InvitationRepositoryResult<std::sync::RwLockReadGuard<'_, Vec<Invitation>>> {
        self.state.read().map_err(|err| {
            InvitationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl InvitationRepository for InMemoryInvitationRepository {
    async fn upsert(&self, invitation: &Invitation) -> InvitationRepositoryResult<Invitation> {
        let mut state = self.write()?;
        let existing = state.iter_mut().find(|stored| {
            stored.organization() == invitation.organization()
                && stored.email() == invitation.email()
        });
        let stored = match existing {
            Some(slot) => {
                let replaced = Invitation::from_persisted(PersistedInvitationData {
                    id: slot.id(),
                    organization: invitation.organization(),
                    email: invitation.email().to_owned(),
                    token: invitation.token().clone(),
                    role: invitation.role(),
                    project: invitation.project(),
                    created_at: slot.created_at(),
                    updated_at: invitation.updated_at(),
                });
                *slot = replaced.clone();
                replaced
            }
            None => {
                state.push(invitation.clone());
                invitation.clone()
            }
        };
        Ok(stored)
    }

    async fn find_by_token(
        &self,
        token: &InviteToken,
    ) -> InvitationRepositoryResult<Option<Invitation>> {
        Ok(self
            .read()?
            .iter()
            .find(|invitation| invitation.token() == token)
            .cloned())
    }

    async fn find_by_key(
        &self,
        organization: OrganizationId,
        email: &str,
    ) -> InvitationRepositoryResult<Option<Invitation>> {
        Ok(self
            .read()?
            .iter()
            .find(|invitation| {
                invitation.organization() == organization && invitation.email() == email
            })
            .cloned())
    }

    async fn delete(&self, id: InvitationId) -> InvitationRepositoryResult<()> {
        let mut state = self.write()?;
        let position = state
            .iter()
            .position(|invitation| invitation.id() == id)
            .ok_or(InvitationRepositoryError::NotFound(id))?;
        state.remove(position);
        Ok(())
    }
}
