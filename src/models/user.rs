use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::response::{require, serialize_object_id};
use crate::utils::AppError;

/// Account stored in the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub name: String,
    pub email: String,
    /// bcrypt hash, never plain text
    pub password: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    pub email: String,
    pub password: String,
    pub image: Option<String>,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        require("email", &self.email)?;
        require("password", &self.password)
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Data returned by a successful login.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LoginData {
    pub token: String,
    pub email: String,
}

/// Public view of a user; the password hash never leaves the service.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserProfile {
    #[serde(rename = "_id", serialize_with = "serialize_object_id")]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        UserProfile {
            id: user.id,
            name: user.name,
            email: user.email,
            image: user.image,
        }
    }
}
