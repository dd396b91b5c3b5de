use std::fmt;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::activity::errors::ActivityDateError;
use crate::domain::activity::errors::ActivityError;
use crate::domain::activity::errors::ActivityIdError;
use crate::domain::activity::errors::ActivityNameError;
use crate::domain::activity::errors::AmountError;
use crate::domain::typology::models::EntryKind;
use crate::domain::typology::models::TypologyId;
use crate::domain::user::models::UserId;

/// A single income or expense entry owned by one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub id: ActivityId,
    pub user_id: UserId,
    pub name: ActivityName,
    pub amount: Amount,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub kind: EntryKind,
    pub typology_id: Option<TypologyId>,
    pub created_at: DateTime<Utc>,
}

/// Activity unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivityId(pub Uuid);

impl ActivityId {
    /// Generate a new random activity ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an activity ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ActivityIdError> {
        Uuid::parse_str(s)
            .map(ActivityId)
            .map_err(|e| ActivityIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ActivityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Activity name value object.
///
/// Non-blank, at most 100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityName(String);

impl ActivityName {
    const MAX_LENGTH: usize = 100;

    /// # Errors
    /// * `Empty` - Name is empty or whitespace only
    /// * `TooLong` - Name exceeds 100 characters
    pub fn new(name: String) -> Result<Self, ActivityNameError> {
        if name.trim().is_empty() {
            return Err(ActivityNameError::Empty);
        }

        let length = name.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(ActivityNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Strictly positive, finite monetary amount.
///
/// The sign of money movement is carried by [`EntryKind`], never by the amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Amount(f64);

impl Amount {
    /// # Errors
    /// * `NotPositive` - Value is zero, negative, NaN or infinite
    pub fn new(value: f64) -> Result<Self, AmountError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(AmountError::NotPositive(value))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Parse a calendar date in `YYYY-MM-DD` form.
///
/// # Errors
/// * `InvalidFormat` - Not a valid ISO calendar date
pub fn parse_activity_date(raw: &str) -> Result<NaiveDate, ActivityDateError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ActivityDateError::InvalidFormat(raw.to_string()))
}

/// Command to create an activity for the caller.
///
/// The owner is not part of the command; it is always the caller.
#[derive(Debug)]
pub struct CreateActivityCommand {
    pub name: ActivityName,
    pub amount: Amount,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub kind: EntryKind,
    pub typology_id: Option<TypologyId>,
}

impl CreateActivityCommand {
    /// Build a create command from raw request fields.
    ///
    /// # Errors
    /// * `MissingFields` - `name`, `amount`, `date` or `kind` is absent or blank
    /// * Any value object error for a present but invalid field
    pub fn parse(
        name: Option<String>,
        amount: Option<f64>,
        description: Option<String>,
        date: Option<String>,
        kind: Option<String>,
        typology_id: Option<String>,
    ) -> Result<Self, ActivityError> {
        let (Some(name), Some(amount), Some(date), Some(kind)) = (
            non_blank(name),
            amount,
            non_blank(date),
            non_blank(kind),
        ) else {
            return Err(ActivityError::MissingFields(
                "name, amount, date and type are required".to_string(),
            ));
        };

        Ok(Self {
            name: ActivityName::new(name)?,
            amount: Amount::new(amount)?,
            description: non_blank(description),
            date: parse_activity_date(&date)?,
            kind: kind.parse()?,
            typology_id: non_blank(typology_id)
                .map(|id| TypologyId::from_string(&id))
                .transpose()?,
        })
    }
}

/// Command to update an activity; only provided fields change.
#[derive(Debug, Default)]
pub struct UpdateActivityCommand {
    pub name: Option<ActivityName>,
    pub amount: Option<Amount>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub kind: Option<EntryKind>,
    pub typology_id: Option<TypologyId>,
}

impl UpdateActivityCommand {
    /// # Errors
    /// * Any value object error for a present but invalid field
    pub fn parse(
        name: Option<String>,
        amount: Option<f64>,
        description: Option<String>,
        date: Option<String>,
        kind: Option<String>,
        typology_id: Option<String>,
    ) -> Result<Self, ActivityError> {
        Ok(Self {
            name: name.map(ActivityName::new).transpose()?,
            amount: amount.map(Amount::new).transpose()?,
            description,
            date: date.map(|d| parse_activity_date(&d)).transpose()?,
            kind: kind.map(|k| k.parse()).transpose()?,
            typology_id: typology_id
                .map(|id| TypologyId::from_string(&id))
                .transpose()?,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
