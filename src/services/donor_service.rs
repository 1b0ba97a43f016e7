use mongodb::bson::{doc, to_bson};

use super::{decode_all, decode_document, encode_document, now};
use crate::database::{CollectionName, DocumentStore};
use crate::models::{DonationUpdate, Donor, InsertResult, NewDonor};
use crate::utils::AppError;

const NOT_FOUND: &str = "No donor found";

pub async fn create_donor(store: &dyn DocumentStore, request: NewDonor) -> Result<InsertResult, AppError> {
    request.validate()?;
    let donor = request.into_donor(now());
    let id = store.insert_one(CollectionName::Donors, encode_document(&donor)?).await?;
    Ok(id.into())
}

/// Donors ordered by `totalAmount`, largest first. An empty collection is a 404.
pub async fn list_donors(store: &dyn DocumentStore) -> Result<Vec<Donor>, AppError> {
    let documents = store
        .find(CollectionName::Donors, doc! {}, Some(doc! { "totalAmount": -1 }))
        .await?;
    if documents.is_empty() {
        return Err(AppError::NotFound("No donors found".to_string()));
    }
    decode_all(documents)
}

pub async fn get_donor(store: &dyn DocumentStore, email: &str) -> Result<Donor, AppError> {
    let document = store
        .find_one(CollectionName::Donors, doc! { "email": email })
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;
    decode_document(document)
}

/// Sets the donor's new total and appends the contribution to the existing list.
///
/// One atomic `$set` + `$push`, filtered on `totalAmount <= new total`.
pub async fn update_donation(store: &dyn DocumentStore, email: &str, update: DonationUpdate) -> Result<(), AppError> {
    let current = get_donor(store, email).await?;
    update.validate_against(&current)?;

    let contribution =
        to_bson(&update.post).map_err(|e| AppError::Internal(format!("Failed to encode contribution: {}", e)))?;
    let filter = doc! {
        "email": email,
        "totalAmount": { "$lte": update.total_amount },
    };
    let change = doc! {
        "$set": { "totalAmount": update.total_amount },
        "$push": { "post": contribution },
    };

    if store
        .find_one_and_update(CollectionName::Donors, filter, change)
        .await?
        .is_some()
    {
        return Ok(());
    }

    // The guard failed: either the donor is gone or a larger total landed first.
    let latest = get_donor(store, email).await?;
    update.validate_against(&latest)?;
    Err(AppError::Internal(format!("Donation update for {} was not applied", email)))
}
