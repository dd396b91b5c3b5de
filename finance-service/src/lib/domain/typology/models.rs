use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::domain::typology::errors::EntryKindError;
use crate::domain::typology::errors::TypologyIdError;

/// Typology unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypologyId(pub Uuid);

impl TypologyId {
    /// Generate a new random typology ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a typology ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, TypologyIdError> {
        Uuid::parse_str(s)
            .map(TypologyId)
            .map_err(|e| TypologyIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for TypologyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TypologyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Direction of money movement, shared by typologies and activities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Income => "income",
            EntryKind::Expense => "expense",
        }
    }
}

impl FromStr for EntryKind {
    type Err = EntryKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(EntryKind::Income),
            "expense" => Ok(EntryKind::Expense),
            other => Err(EntryKindError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category an activity can be filed under.
///
/// Typologies are reference data: seeded by migration, read-only through the
/// API. Inactive ones are hidden from everyone but administrators.
#[derive(Debug, Clone, PartialEq)]
pub struct Typology {
    pub id: TypologyId,
    pub name: String,
    pub description: Option<String>,
    pub icon: String,
    pub color: String,
    pub kind: EntryKind,
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_kind_parse() {
        assert_eq!("income".parse::<EntryKind>(), Ok(EntryKind::Income));
        assert_eq!("expense".parse::<EntryKind>(), Ok(EntryKind::Expense));
        assert!(matches!(
            "Income".parse::<EntryKind>(),
            Err(EntryKindError::Unknown(_))
        ));
    }

    #[test]
    fn test_typology_id_parse() {
        let id = TypologyId::new();
        assert_eq!(TypologyId::from_string(&id.to_string()), Ok(id));
        assert!(TypologyId::from_string("nope").is_err());
    }
}
