use theorydeck_shared::types::{NewTheory, Page, Theory, TheoryFilter, TheoryId, TheoryStatus, TheoryUpdate};

use crate::errors::RepositoryError;

/// A trait that defines the interface for persisting theories.
#[async_trait::async_trait]
pub trait TheoryRepository: Send + Sync {
    /// Inserts a theory. Fails with `RepositoryError::Conflict` when the slug is taken.
    async fn create_theory(&self, theory: &NewTheory) -> Result<Theory, RepositoryError>;

    async fn get_theory(&self, id: TheoryId) -> Result<Option<Theory>, RepositoryError>;

    async fn get_theory_by_slug(&self, slug: &str) -> Result<Option<Theory>, RepositoryError>;

    async fn slug_exists(&self, slug: &str) -> Result<bool, RepositoryError>;

    /// Lists theories matching the filter, newest first.
    ///
    /// The status filter defaults to `ACTIVE`. `search` matches title and
    /// claim case-insensitively, or a tag exactly.
    async fn list_theories(&self, filter: &TheoryFilter) -> Result<Page<Theory>, RepositoryError>;

    /// Applies a partial update. Returns `None` if the theory does not exist.
    async fn update_theory(
        &self,
        id: TheoryId,
        update: &TheoryUpdate,
    ) -> Result<Option<Theory>, RepositoryError>;

    async fn set_theory_status(
        &self,
        id: TheoryId,
        status: TheoryStatus,
    ) -> Result<Option<Theory>, RepositoryError>;
}
