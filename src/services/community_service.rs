use mongodb::bson::doc;

use super::{decode_all, encode_document, now};
use crate::database::{CollectionName, DocumentStore};
use crate::models::{Comment, InsertResult, NewComment, NewTestimonial, NewVolunteer, Testimonial, Volunteer};
use crate::utils::AppError;

pub async fn add_volunteer(store: &dyn DocumentStore, request: NewVolunteer) -> Result<InsertResult, AppError> {
    request.validate()?;
    let volunteer = request.into_volunteer(now());
    let id = store
        .insert_one(CollectionName::Volunteers, encode_document(&volunteer)?)
        .await?;
    Ok(id.into())
}

/// An empty volunteer list is reported as a 404.
pub async fn list_volunteers(store: &dyn DocumentStore) -> Result<Vec<Volunteer>, AppError> {
    let documents = store.find(CollectionName::Volunteers, doc! {}, None).await?;
    if documents.is_empty() {
        return Err(AppError::NotFound("No Volunteer found".to_string()));
    }
    decode_all(documents)
}

pub async fn add_testimonial(store: &dyn DocumentStore, request: NewTestimonial) -> Result<InsertResult, AppError> {
    request.validate()?;
    let testimonial = request.into_testimonial(now());
    let id = store
        .insert_one(CollectionName::Testimonials, encode_document(&testimonial)?)
        .await?;
    Ok(id.into())
}

pub async fn list_testimonials(store: &dyn DocumentStore, post_id: &str) -> Result<Vec<Testimonial>, AppError> {
    let documents = store
        .find(CollectionName::Testimonials, doc! { "postId": post_id }, None)
        .await?;
    decode_all(documents)
}

pub async fn add_comment(store: &dyn DocumentStore, request: NewComment) -> Result<InsertResult, AppError> {
    request.validate()?;
    let comment = request.into_comment(now());
    let id = store
        .insert_one(CollectionName::Comments, encode_document(&comment)?)
        .await?;
    Ok(id.into())
}

pub async fn list_comments(store: &dyn DocumentStore) -> Result<Vec<Comment>, AppError> {
    let documents = store.find(CollectionName::Comments, doc! {}, None).await?;
    decode_all(documents)
}
