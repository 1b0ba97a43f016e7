use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::response::{require, serialize_object_id};
use crate::utils::AppError;

/// Donor record keyed by email (stored in the `donors` collection)
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Donor {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_object_id"
    )]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub total_amount: f64,
    /// Every contribution made by this donor, oldest first
    #[serde(default, rename = "post")]
    pub contributions: Vec<Contribution>,
    #[serde(default)]
    pub created_at: Option<i64>,
}

/// Reference to the post a donation went to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub post_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub amount: f64,
}

impl Contribution {
    fn validate(&self) -> Result<(), AppError> {
        require("post.postId", &self.post_id)?;
        if self.amount < 0.0 {
            return Err(AppError::BadRequest("post.amount must not be negative".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewDonor {
    pub email: String,
    pub name: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub post: Vec<Contribution>,
}

impl NewDonor {
    pub fn validate(&self) -> Result<(), AppError> {
        require("email", &self.email)?;
        if self.total_amount < 0.0 {
            return Err(AppError::BadRequest("totalAmount must not be negative".into()));
        }
        self.post.iter().try_for_each(Contribution::validate)
    }

    pub fn into_donor(self, now: i64) -> Donor {
        Donor {
            id: None,
            email: self.email,
            name: self.name,
            image: self.image,
            total_amount: self.total_amount,
            contributions: self.post,
            created_at: Some(now),
        }
    }
}

/// Body of `PATCH /update-donate-amount/{email}`.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonationUpdate {
    /// New running total for the donor
    pub total_amount: f64,
    pub post: Contribution,
}

impl DonationUpdate {
    /// The running total may only grow.
    pub fn validate_against(&self, current: &Donor) -> Result<(), AppError> {
        self.post.validate()?;
        if self.total_amount < current.total_amount {
            return Err(AppError::BadRequest(format!(
                "totalAmount {} is lower than the current total {}",
                self.total_amount, current.total_amount
            )));
        }
        Ok(())
    }
}
