use mongodb::bson::oid::ObjectId;
use serde::{Serialize, Serializer};

/// Uniform `{success, message, data}` wrapper returned by every endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Successful response whose `data` is `null`.
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

/// Acknowledgement returned by the insert endpoints.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    pub acknowledged: bool,
    pub inserted_id: String,
}

impl From<ObjectId> for InsertResult {
    fn from(id: ObjectId) -> Self {
        InsertResult {
            acknowledged: true,
            inserted_id: id.to_hex(),
        }
    }
}

/// Writes `_id` as a hex string in API responses. Stored documents keep the
/// native ObjectId because records are only serialized to BSON while `_id` is `None`.
pub fn serialize_object_id<S: Serializer>(id: &Option<ObjectId>, serializer: S) -> Result<S::Ok, S::Error> {
    match id {
        Some(id) => serializer.serialize_str(&id.to_hex()),
        None => serializer.serialize_none(),
    }
}

/// Trims and checks that a required text field is present.
pub fn require(field: &str, value: &str) -> Result<(), crate::utils::AppError> {
    if value.trim().is_empty() {
        return Err(crate::utils::AppError::BadRequest(format!("{} is required", field)));
    }
    Ok(())
}
