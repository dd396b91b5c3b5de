use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::activity::models::Activity;

pub mod create_activity;
pub mod delete_activity;
pub mod get_activity;
pub mod list_activities;
pub mod update_activity;

/// Request body shared by create and update.
///
/// The owner is never read from the body. `type` is accepted as the
/// external name of the kind.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityRequestBody {
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub date: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub typology_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityData {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typology_id: Option<String>,
}

impl From<&Activity> for ActivityData {
    fn from(activity: &Activity) -> Self {
        Self {
            id: activity.id.to_string(),
            user_id: activity.user_id.to_string(),
            name: activity.name.as_str().to_string(),
            amount: activity.amount.value(),
            description: activity.description.clone(),
            date: activity.date,
            kind: activity.kind.as_str().to_string(),
            typology_id: activity.typology_id.map(|id| id.to_string()),
        }
    }
}

pub(crate) fn to_data(activities: &[Activity]) -> Vec<ActivityData> {
    activities.iter().map(ActivityData::from).collect()
}
