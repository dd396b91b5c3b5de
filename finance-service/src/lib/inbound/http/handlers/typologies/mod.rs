use serde::Serialize;

use crate::domain::typology::models::Typology;

pub mod get_typology;
pub mod list_typologies;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypologyData {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub icon: String,
    pub color: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub is_active: bool,
}

impl From<&Typology> for TypologyData {
    fn from(typology: &Typology) -> Self {
        Self {
            id: typology.id.to_string(),
            name: typology.name.clone(),
            description: typology.description.clone(),
            icon: typology.icon.clone(),
            color: typology.color.clone(),
            kind: typology.kind.as_str().to_string(),
            is_active: typology.is_active,
        }
    }
}
