//! Volunteers, testimonials and comments: flat records with no links other
//! than a testimonial's `postId`.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::response::{require, serialize_object_id};
use crate::utils::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Volunteer {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_object_id"
    )]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: Option<i64>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct NewVolunteer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub image: Option<String>,
}

impl NewVolunteer {
    pub fn validate(&self) -> Result<(), AppError> {
        require("name", &self.name)?;
        require("email", &self.email)
    }

    pub fn into_volunteer(self, now: i64) -> Volunteer {
        Volunteer {
            id: None,
            name: self.name,
            email: self.email,
            phone: self.phone,
            location: self.location,
            image: self.image,
            created_at: Some(now),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_object_id"
    )]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    /// Hex id of the post this testimonial belongs to
    pub post_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    pub message: String,
    #[serde(default)]
    pub created_at: Option<i64>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewTestimonial {
    pub post_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub message: String,
}

impl NewTestimonial {
    pub fn validate(&self) -> Result<(), AppError> {
        require("postId", &self.post_id)?;
        require("message", &self.message)
    }

    pub fn into_testimonial(self, now: i64) -> Testimonial {
        Testimonial {
            id: None,
            post_id: self.post_id,
            name: self.name,
            email: self.email,
            image: self.image,
            message: self.message,
            created_at: Some(now),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_object_id"
    )]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    pub text: String,
    #[serde(default)]
    pub created_at: Option<i64>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct NewComment {
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub text: String,
}

impl NewComment {
    pub fn validate(&self) -> Result<(), AppError> {
        require("text", &self.text)
    }

    pub fn into_comment(self, now: i64) -> Comment {
        Comment {
            id: None,
            name: self.name,
            email: self.email,
            image: self.image,
            text: self.text,
            created_at: Some(now),
        }
    }
}
