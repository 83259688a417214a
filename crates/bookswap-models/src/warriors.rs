use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::WarriorId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Race {
    Admin,
    Moderator,
    Director,
    Worker,
    Junior,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Achievement {
    pub id: i64,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WarriorBook {
    pub id: i64,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Warrior {
    pub id: WarriorId,
    pub race: Race,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(range(min = 0, message = "level must not be negative"))]
    pub level: i32,
    #[serde(default, alias = "achievements")]
    pub achievement: Option<Achievement>,
    #[serde(default)]
    pub books: Vec<WarriorBook>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WarriorCreatedResponse {
    pub status: u16,
    pub data: Warrior,
}
