use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::{Client, Database, IndexModel};
use std::fmt;

use crate::utils::AppError;

#[cfg(test)]
pub mod memory;

/// Collections used by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionName {
    Users,
    Posts,
    Donors,
    Volunteers,
    Testimonials,
    Comments,
}

impl CollectionName {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionName::Users => "users",
            CollectionName::Posts => "posts",
            CollectionName::Donors => "donors",
            CollectionName::Volunteers => "volunteers",
            CollectionName::Testimonials => "testimonials",
            CollectionName::Comments => "comments",
        }
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// A unique index rejected the write
    DuplicateKey,
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::DuplicateKey => write!(f, "Duplicate key"),
            StoreError::Backend(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey => AppError::AlreadyExists("Document already exists".into()),
            StoreError::Backend(msg) => AppError::DatabaseError(msg),
        }
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == 11000 => {
                StoreError::DuplicateKey
            }
            _ => StoreError::Backend(err.to_string()),
        }
    }
}

/// Untyped document operations over the named collections.
///
/// Filters are plain equality documents; updates use `$set`. The find-and-modify
/// operations return the document as it was before the write.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert_one(&self, collection: CollectionName, document: Document) -> Result<ObjectId, StoreError>;

    /// `sort` is a single-field sort document such as `{ "totalAmount": -1 }`.
    async fn find(
        &self,
        collection: CollectionName,
        filter: Document,
        sort: Option<Document>,
    ) -> Result<Vec<Document>, StoreError>;

    async fn find_one(&self, collection: CollectionName, filter: Document) -> Result<Option<Document>, StoreError>;

    async fn find_one_and_update(
        &self,
        collection: CollectionName,
        filter: Document,
        update: Document,
    ) -> Result<Option<Document>, StoreError>;

    async fn find_one_and_delete(
        &self,
        collection: CollectionName,
        filter: Document,
    ) -> Result<Option<Document>, StoreError>;
}

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, StoreError> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        client_options.app_name = Some("donation-service".to_string());
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates the lookup indexes. `users.email` is unique so two concurrent
    /// registrations for one address cannot both be inserted.
    async fn ensure_indexes(&self) -> Result<(), StoreError> {
        log::info!("🔧 Creating database indexes...");

        let users_email = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(mongodb::options::IndexOptions::builder().unique(true).build())
            .build();
        // A unique index cannot be built over existing duplicates; keep serving
        // and rely on the service-level check in that case.
        match self.raw(CollectionName::Users).create_index(users_email).await {
            Ok(_) => log::info!("   ✅ Index created: users(email) unique"),
            Err(e) => log::warn!("   ⚠️  Could not create users(email) index: {}", e),
        }

        let lookups = [
            (CollectionName::Donors, doc! { "email": 1 }),
            (CollectionName::Donors, doc! { "totalAmount": -1 }),
            (CollectionName::Testimonials, doc! { "postId": 1 }),
        ];
        for (collection, keys) in lookups {
            let index = IndexModel::builder().keys(keys.clone()).build();
            match self.raw(collection).create_index(index).await {
                Ok(_) => log::info!("   ✅ Index created: {}({})", collection, keys),
                Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
            }
        }

        log::info!("✅ Database indexes ready");
        Ok(())
    }

    fn raw(&self, collection: CollectionName) -> mongodb::Collection<Document> {
        self.db.collection(collection.as_str())
    }
}

#[async_trait]
impl DocumentStore for MongoDB {
    async fn insert_one(&self, collection: CollectionName, document: Document) -> Result<ObjectId, StoreError> {
        let result = self.raw(collection).insert_one(document).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::Backend(format!("Unexpected id type in {}", collection)))
    }

    async fn find(
        &self,
        collection: CollectionName,
        filter: Document,
        sort: Option<Document>,
    ) -> Result<Vec<Document>, StoreError> {
        let raw = self.raw(collection);
        let mut action = raw.find(filter);
        if let Some(sort) = sort {
            action = action.sort(sort);
        }
        let cursor = action.await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_one(&self, collection: CollectionName, filter: Document) -> Result<Option<Document>, StoreError> {
        Ok(self.raw(collection).find_one(filter).await?)
    }

    async fn find_one_and_update(
        &self,
        collection: CollectionName,
        filter: Document,
        update: Document,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self.raw(collection).find_one_and_update(filter, update).await?)
    }

    async fn find_one_and_delete(
        &self,
        collection: CollectionName,
        filter: Document,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self.raw(collection).find_one_and_delete(filter).await?)
    }
}
