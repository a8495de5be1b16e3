//! `CollaborationRepositoryImpl`: playlist collaborators.

use crate::{dao::CollaborationDao, traits::CollaborationRepository, RepositoryContext};
use async_trait::async_trait;
use openmusic_cache::Mutation;
use openmusic_core::{CatalogError, CatalogResult, CollaborationId, PlaylistId, UserId};
use std::sync::Arc;
use tracing::debug;

/// Collaboration repository.
///
/// A collaborator sees the playlist in their own `playlists:<user>` listing,
/// so adding or removing one clears that entry.
pub struct CollaborationRepositoryImpl {
    collaborations: Arc<dyn CollaborationDao>,
    ctx: RepositoryContext,
}

impl CollaborationRepositoryImpl {
    /// Creates a new `CollaborationRepositoryImpl`.
    #[must_use]
    pub fn new(collaborations: Arc<dyn CollaborationDao>, ctx: RepositoryContext) -> Self {
        Self { collaborations, ctx }
    }
}

#[async_trait]
impl CollaborationRepository for CollaborationRepositoryImpl {
    async fn add_collaborator(&self, playlist: &PlaylistId, user: &UserId) -> CatalogResult<CollaborationId> {
        debug!("Repository: add_collaborator {} on {}", user, playlist);

        let exists = self
            .ctx
            .db("collaborations.exists", || self.collaborations.exists(playlist, user))
            .await?;
        if exists {
            return Err(CatalogError::invariant("User already collaborates on this playlist"));
        }

        let id = CollaborationId::generate();
        let id = self
            .ctx
            .db("collaborations.insert", || self.collaborations.insert(&id, playlist, user))
            .await?;

        self.ctx
            .invalidate(Mutation::CollaborationChanged {
                user_id: user.clone(),
            })
            .await?;
        Ok(id)
    }

    async fn remove_collaborator(&self, playlist: &PlaylistId, user: &UserId) -> CatalogResult<()> {
        debug!("Repository: remove_collaborator {} on {}", user, playlist);

        let removed = self
            .ctx
            .db("collaborations.delete", || self.collaborations.delete(playlist, user))
            .await?;
        if !removed {
            return Err(CatalogError::invariant("Collaboration could not be removed"));
        }

        self.ctx
            .invalidate(Mutation::CollaborationChanged {
                user_id: user.clone(),
            })
            .await
    }

    async fn verify_collaborator(&self, playlist: &PlaylistId, user: &UserId) -> CatalogResult<()> {
        let exists = self
            .ctx
            .db("collaborations.exists", || self.collaborations.exists(playlist, user))
            .await?;
        if exists {
            Ok(())
        } else {
            Err(CatalogError::not_found("Collaboration", format!("{}/{}", playlist, user)))
        }
    }

    async fn collaborator_ids(&self, playlist: &PlaylistId) -> CatalogResult<Vec<UserId>> {
        self.ctx
            .db("collaborations.user_ids", || self.collaborations.user_ids(playlist))
            .await
    }
}
