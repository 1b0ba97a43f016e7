use mongodb::bson::doc;

use super::{decode_all, decode_document, encode_document, now, parse_object_id};
use crate::database::{CollectionName, DocumentStore};
use crate::models::{InsertResult, NewPost, Post, UpdatePost};
use crate::utils::AppError;

const NOT_FOUND: &str = "No posts found";

pub async fn create_post(store: &dyn DocumentStore, request: NewPost, author: &str) -> Result<InsertResult, AppError> {
    request.validate()?;
    let post = Post::new(request, author, now());
    let id = store.insert_one(CollectionName::Posts, encode_document(&post)?).await?;
    Ok(id.into())
}

pub async fn list_posts(store: &dyn DocumentStore) -> Result<Vec<Post>, AppError> {
    let documents = store.find(CollectionName::Posts, doc! {}, None).await?;
    decode_all(documents)
}

pub async fn get_post(store: &dyn DocumentStore, id: &str) -> Result<Post, AppError> {
    let object_id = parse_object_id(id, NOT_FOUND)?;
    let document = store
        .find_one(CollectionName::Posts, doc! { "_id": object_id })
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;
    decode_document(document)
}

pub async fn delete_post(store: &dyn DocumentStore, id: &str) -> Result<(), AppError> {
    let object_id = parse_object_id(id, NOT_FOUND)?;
    store
        .find_one_and_delete(CollectionName::Posts, doc! { "_id": object_id })
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
}

pub async fn update_post(store: &dyn DocumentStore, id: &str, request: UpdatePost) -> Result<(), AppError> {
    let object_id = parse_object_id(id, NOT_FOUND)?;
    let update = request.to_set_document()?;
    store
        .find_one_and_update(CollectionName::Posts, doc! { "_id": object_id }, update)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
}
