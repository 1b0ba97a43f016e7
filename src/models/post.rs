use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

use super::response::{require, serialize_object_id};
use crate::utils::AppError;

/// Donation campaign post (stored in the `posts` collection)
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_object_id"
    )]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub image: Option<String>,
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub qty: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    /// Email of the authenticated user that created the post
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<i64>,
}

impl Post {
    pub fn new(request: NewPost, created_by: &str, now: i64) -> Self {
        Post {
            id: None,
            image: request.image,
            title: request.title,
            category: request.category,
            qty: request.qty,
            description: request.description,
            created_by: Some(created_by.to_string()),
            created_at: Some(now),
        }
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct NewPost {
    pub image: Option<String>,
    pub title: String,
    pub category: Option<String>,
    pub qty: Option<i64>,
    pub description: Option<String>,
}

impl NewPost {
    pub fn validate(&self) -> Result<(), AppError> {
        require("title", &self.title)?;
        match self.qty {
            Some(qty) if qty < 0 => Err(AppError::BadRequest("qty must not be negative".into())),
            _ => Ok(()),
        }
    }
}

/// PATCH body; only the fields present are written.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdatePost {
    pub image: Option<String>,
    pub title: Option<String>,
    pub category: Option<String>,
    pub qty: Option<i64>,
    pub description: Option<String>,
}

impl UpdatePost {
    /// Builds the `$set` body for the provided fields.
    pub fn to_set_document(&self) -> Result<Document, AppError> {
        let mut set = Document::new();
        if let Some(image) = &self.image {
            set.insert("image", image.clone());
        }
        if let Some(title) = &self.title {
            require("title", title)?;
            set.insert("title", title.clone());
        }
        if let Some(category) = &self.category {
            set.insert("category", category.clone());
        }
        if let Some(qty) = self.qty {
            if qty < 0 {
                return Err(AppError::BadRequest("qty must not be negative".into()));
            }
            set.insert("qty", qty);
        }
        if let Some(description) = &self.description {
            set.insert("description", description.clone());
        }

        if set.is_empty() {
            return Err(AppError::BadRequest("No fields to update".into()));
        }
        Ok(doc! { "$set": set })
    }
}
