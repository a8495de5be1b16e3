//! Two-tier playlist authorization.
//!
//! Access is decided in a fixed order:
//!
//! 1. **Owner.** Look up the playlist owner. A missing playlist ends the
//!    evaluation with [`AccessDecision::DeniedNotFound`]; the collaborator
//!    check is never reached. A matching owner is granted.
//! 2. **Collaborator.** Only for an existing playlist with a different
//!    owner. A collaboration record grants access. A missing record *or a
//!    failed lookup* yields [`AccessDecision::DeniedForbidden`], which always
//!    maps to the same [`CatalogError::access_denied`] error.
//!
//! A database failure during the owner lookup is not an authorization
//! outcome and is returned as an error.

use openmusic_core::{CatalogError, CatalogResult, PlaylistId, UserId};
use openmusic_repository::{CollaborationRepository, PlaylistRepository};
use std::sync::Arc;
use tracing::{debug, warn};

/// How access was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessRoute {
    /// Caller owns the playlist.
    Owner,
    /// Caller is a collaborator.
    Collaborator,
}

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Access granted through the given route.
    Granted(AccessRoute),
    /// The playlist does not exist.
    DeniedNotFound,
    /// The playlist exists but the caller holds no relation to it.
    DeniedForbidden,
}

impl AccessDecision {
    /// True if access was granted.
    #[must_use]
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted(_))
    }

    /// Converts the decision into the error taxonomy.
    pub fn into_result(self, playlist: &PlaylistId) -> CatalogResult<AccessRoute> {
        match self {
            Self::Granted(route) => Ok(route),
            Self::DeniedNotFound => Err(CatalogError::not_found("Playlist", playlist)),
            Self::DeniedForbidden => Err(CatalogError::access_denied()),
        }
    }
}

/// Resolves owner/collaborator access to playlists.
#[derive(Clone)]
pub struct PlaylistAccessResolver {
    playlists: Arc<dyn PlaylistRepository>,
    collaborations: Arc<dyn CollaborationRepository>,
}

impl PlaylistAccessResolver {
    /// Creates a resolver.
    #[must_use]
    pub fn new(
        playlists: Arc<dyn PlaylistRepository>,
        collaborations: Arc<dyn CollaborationRepository>,
    ) -> Self {
        Self {
            playlists,
            collaborations,
        }
    }

    /// Owner-only decision.
    pub async fn resolve_owner(&self, playlist: &PlaylistId, caller: &UserId) -> CatalogResult<AccessDecision> {
        let decision = match self.playlists.find_owner(playlist).await? {
            None => AccessDecision::DeniedNotFound,
            Some(owner) if &owner == caller => AccessDecision::Granted(AccessRoute::Owner),
            Some(_) => AccessDecision::DeniedForbidden,
        };
        Ok(decision)
    }

    /// Owner-or-collaborator decision.
    pub async fn resolve(&self, playlist: &PlaylistId, caller: &UserId) -> CatalogResult<AccessDecision> {
        let owner_decision = self.resolve_owner(playlist, caller).await?;
        if owner_decision != AccessDecision::DeniedForbidden {
            return Ok(owner_decision);
        }

        match self.collaborations.verify_collaborator(playlist, caller).await {
            Ok(()) => Ok(AccessDecision::Granted(AccessRoute::Collaborator)),
            Err(e) => {
                if e.is_domain() {
                    debug!("{} is not a collaborator on {}", caller, playlist);
                } else {
                    warn!("Collaborator lookup for {} on {} failed: {}", caller, playlist, e);
                }
                Ok(AccessDecision::DeniedForbidden)
            }
        }
    }

    /// Requires owner or collaborator access.
    pub async fn verify_access(&self, playlist: &PlaylistId, caller: &UserId) -> CatalogResult<AccessRoute> {
        self.resolve(playlist, caller).await?.into_result(playlist)
    }

    /// Requires ownership.
    pub async fn verify_owner(&self, playlist: &PlaylistId, caller: &UserId) -> CatalogResult<AccessRoute> {
        self.resolve_owner(playlist, caller).await?.into_result(playlist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockCollaborationRepo, MockPlaylistRepo};
    use mockall::predicate::eq;

    fn playlist() -> PlaylistId {
        PlaylistId::new("playlist-1")
    }

    fn owned_by(owner: &'static str) -> MockPlaylistRepo {
        let mut playlists = MockPlaylistRepo::new();
        playlists
            .expect_find_owner()
            .with(eq(playlist()))
            .returning(move |_| Ok(Some(UserId::new(owner))));
        playlists
    }

    fn resolver(playlists: MockPlaylistRepo, collaborations: MockCollaborationRepo) -> PlaylistAccessResolver {
        PlaylistAccessResolver::new(Arc::new(playlists), Arc::new(collaborations))
    }

    #[tokio::test]
    async fn test_missing_playlist_is_not_found_for_any_caller() {
        let mut playlists = MockPlaylistRepo::new();
        playlists.expect_find_owner().returning(|_| Ok(None));
        let mut collaborations = MockCollaborationRepo::new();
        collaborations.expect_verify_collaborator().times(0);
        let resolver = resolver(playlists, collaborations);

        for caller in ["user-1", "user-2", "user-3"] {
            let caller = UserId::new(caller);
            assert_eq!(
                resolver.resolve(&playlist(), &caller).await.unwrap(),
                AccessDecision::DeniedNotFound
            );
            assert!(matches!(
                resolver.verify_access(&playlist(), &caller).await,
                Err(CatalogError::NotFound { .. })
            ));
        }
    }

    #[tokio::test]
    async fn test_owner_is_granted_without_collaborator_lookup() {
        let mut collaborations = MockCollaborationRepo::new();
        collaborations.expect_verify_collaborator().times(0);
        let resolver = resolver(owned_by("user-1"), collaborations);

        let route = resolver
            .verify_access(&playlist(), &UserId::new("user-1"))
            .await
            .unwrap();
        assert_eq!(route, AccessRoute::Owner);
    }

    #[tokio::test]
    async fn test_collaborator_is_granted_via_second_check() {
        let mut collaborations = MockCollaborationRepo::new();
        collaborations
            .expect_verify_collaborator()
            .with(eq(playlist()), eq(UserId::new("user-2")))
            .times(1)
            .returning(|_, _| Ok(()));
        let resolver = resolver(owned_by("user-1"), collaborations);

        let route = resolver
            .verify_access(&playlist(), &UserId::new("user-2"))
            .await
            .unwrap();
        assert_eq!(route, AccessRoute::Collaborator);
    }

    #[tokio::test]
    async fn test_stranger_and_failed_lookup_share_one_error() {
        let mut collaborations = MockCollaborationRepo::new();
        collaborations
            .expect_verify_collaborator()
            .with(eq(playlist()), eq(UserId::new("user-3")))
            .returning(|p, u| Err(CatalogError::not_found("Collaboration", format!("{}/{}", p, u))));
        collaborations
            .expect_verify_collaborator()
            .with(eq(playlist()), eq(UserId::new("user-4")))
            .returning(|_, _| Err(CatalogError::Database("connection reset".to_string())));
        let resolver = resolver(owned_by("user-1"), collaborations);

        let stranger = resolver
            .verify_access(&playlist(), &UserId::new("user-3"))
            .await
            .unwrap_err();
        let lookup_failed = resolver
            .verify_access(&playlist(), &UserId::new("user-4"))
            .await
            .unwrap_err();

        assert!(matches!(stranger, CatalogError::Authorization(_)));
        assert_eq!(stranger.to_string(), lookup_failed.to_string());
        assert_eq!(stranger.error_code(), lookup_failed.error_code());
    }

    #[tokio::test]
    async fn test_owner_lookup_failure_propagates() {
        let mut playlists = MockPlaylistRepo::new();
        playlists
            .expect_find_owner()
            .returning(|_| Err(CatalogError::Timeout("playlists.find_owner".to_string())));
        let mut collaborations = MockCollaborationRepo::new();
        collaborations.expect_verify_collaborator().times(0);
        let resolver = resolver(playlists, collaborations);

        assert!(matches!(
            resolver.resolve(&playlist(), &UserId::new("user-1")).await,
            Err(CatalogError::Timeout(_))
        ));
    }

    #[tokio::test]
    async fn test_verify_owner_rejects_collaborators() {
        let mut collaborations = MockCollaborationRepo::new();
        collaborations.expect_verify_collaborator().times(0);
        let resolver = resolver(owned_by("user-1"), collaborations);

        assert!(matches!(
            resolver.verify_owner(&playlist(), &UserId::new("user-2")).await,
            Err(CatalogError::Authorization(_))
        ));
        assert_eq!(
            resolver
                .verify_owner(&playlist(), &UserId::new("user-1"))
                .await
                .unwrap(),
            AccessRoute::Owner
        );
    }
}
