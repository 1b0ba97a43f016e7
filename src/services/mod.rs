pub mod auth_service;
pub mod community_service;
pub mod donor_service;
pub mod post_service;

use mongodb::bson::{oid::ObjectId, Document};
use serde::{de::DeserializeOwned, Serialize};

use crate::utils::AppError;

pub(crate) fn encode_document<T: Serialize>(record: &T) -> Result<Document, AppError> {
    mongodb::bson::to_document(record).map_err(|e| AppError::Internal(format!("Failed to encode document: {}", e)))
}

pub(crate) fn decode_document<T: DeserializeOwned>(document: Document) -> Result<T, AppError> {
    mongodb::bson::from_document(document).map_err(|e| AppError::Internal(format!("Malformed document: {}", e)))
}

pub(crate) fn decode_all<T: DeserializeOwned>(documents: Vec<Document>) -> Result<Vec<T>, AppError> {
    documents.into_iter().map(decode_document).collect()
}

/// Parses a hex id; a malformed id can never match, so it is reported like a missing one.
pub(crate) fn parse_object_id(id: &str, not_found: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::NotFound(not_found.to_string()))
}

pub(crate) fn now() -> i64 {
    chrono::Utc::now().timestamp()
}
