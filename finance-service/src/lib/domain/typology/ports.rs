use async_trait::async_trait;

use crate::domain::typology::errors::TypologyError;
use crate::domain::typology::models::EntryKind;
use crate::domain::typology::models::Typology;
use crate::domain::typology::models::TypologyId;

/// Port for typology lookups.
#[async_trait]
pub trait TypologyServicePort: Send + Sync + 'static {
    /// List active typologies, optionally restricted to one kind.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_active(&self, kind: Option<EntryKind>) -> Result<Vec<Typology>, TypologyError>;

    /// List every typology including inactive ones.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<Typology>, TypologyError>;

    /// Retrieve one typology.
    ///
    /// # Errors
    /// * `NotFound` - Typology does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_typology(&self, id: &TypologyId) -> Result<Typology, TypologyError>;
}

/// Read access to stored typologies.
#[async_trait]
pub trait TypologyRepository: Send + Sync + 'static {
    /// List typologies ordered by name.
    ///
    /// # Arguments
    /// * `kind` - Restrict to one kind when set
    /// * `include_inactive` - Also return deactivated typologies
    async fn list(
        &self,
        kind: Option<EntryKind>,
        include_inactive: bool,
    ) -> Result<Vec<Typology>, TypologyError>;

    /// Retrieve typology by identifier.
    ///
    /// # Returns
    /// Optional typology (None if not found)
    async fn find_by_id(&self, id: &TypologyId) -> Result<Option<Typology>, TypologyError>;
}
