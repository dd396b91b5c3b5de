use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::typology::errors::TypologyError;
use crate::domain::typology::models::EntryKind;
use crate::domain::typology::models::Typology;
use crate::domain::typology::models::TypologyId;
use crate::domain::typology::ports::TypologyRepository;
use crate::domain::typology::ports::TypologyServicePort;

/// Domain service for typology lookups.
pub struct TypologyService<TR>
where
    TR: TypologyRepository,
{
    repository: Arc<TR>,
}

impl<TR> TypologyService<TR>
where
    TR: TypologyRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<TR> TypologyServicePort for TypologyService<TR>
where
    TR: TypologyRepository,
{
    async fn list_active(&self, kind: Option<EntryKind>) -> Result<Vec<Typology>, TypologyError> {
        self.repository.list(kind, false).await
    }

    async fn list_all(&self) -> Result<Vec<Typology>, TypologyError> {
        self.repository.list(None, true).await
    }

    async fn get_typology(&self, id: &TypologyId) -> Result<Typology, TypologyError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TypologyError::NotFound(id.to_string()))
    }
}
