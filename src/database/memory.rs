use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use std::cmp::Ordering;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{CollectionName, DocumentStore, StoreError};

/// In-process store with the subset of MongoDB semantics the services use:
/// equality and `$lte`/`$gte` filters, single-field sorts, `$set` and `$push`.
/// Each update runs under the write lock, so it is atomic like a server-side one.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<CollectionName, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self, collection: CollectionName) -> usize {
        self.collections
            .read()
            .await
            .get(&collection)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, expected)| match expected {
        Bson::Document(ops) if ops.keys().next().is_some_and(|op| op.starts_with('$')) => ops
            .iter()
            .all(|(op, operand)| compare_values(document.get(key), op, operand)),
        _ => document.get(key) == Some(expected),
    })
}

fn compare_values(actual: Option<&Bson>, op: &str, operand: &Bson) -> bool {
    let Some(ordering) = as_number(actual)
        .zip(as_number(Some(operand)))
        .and_then(|(a, b)| a.partial_cmp(&b))
    else {
        return false;
    };
    match op {
        "$lte" => ordering != Ordering::Greater,
        "$gte" => ordering != Ordering::Less,
        _ => false,
    }
}

fn as_number(value: Option<&Bson>) -> Option<f64> {
    match value? {
        Bson::Double(v) => Some(*v),
        Bson::Int32(v) => Some(*v as f64),
        Bson::Int64(v) => Some(*v as f64),
        _ => None,
    }
}

fn compare(a: &Document, b: &Document, field: &str) -> Ordering {
    match (as_number(a.get(field)), as_number(b.get(field))) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

fn apply_update(document: &mut Document, update: &Document) -> Result<(), StoreError> {
    for (operator, fields) in update {
        match (operator.as_str(), fields) {
            ("$set", Bson::Document(fields)) => {
                for (key, value) in fields {
                    document.insert(key.clone(), value.clone());
                }
            }
            ("$push", Bson::Document(fields)) => {
                for (key, value) in fields {
                    match document.get_mut(key) {
                        Some(Bson::Array(items)) => items.push(value.clone()),
                        Some(_) => return Err(StoreError::Backend(format!("Cannot $push to non-array field: {}", key))),
                        None => {
                            document.insert(key.clone(), Bson::Array(vec![value.clone()]));
                        }
                    }
                }
            }
            _ => return Err(StoreError::Backend(format!("Unsupported update operator: {}", operator))),
        }
    }
    Ok(())
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_one(&self, collection: CollectionName, mut document: Document) -> Result<ObjectId, StoreError> {
        let id = match document.get_object_id("_id") {
            Ok(id) => id,
            Err(_) => {
                let id = ObjectId::new();
                document.insert("_id", id);
                id
            }
        };
        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .push(document);
        Ok(id)
    }

    async fn find(
        &self,
        collection: CollectionName,
        filter: Document,
        sort: Option<Document>,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        let mut found: Vec<Document> = collections
            .get(&collection)
            .map(|docs| docs.iter().filter(|d| matches(d, &filter)).cloned().collect())
            .unwrap_or_default();

        if let Some((field, direction)) = sort.as_ref().and_then(|s| s.iter().next()) {
            let descending = as_number(Some(direction)).map(|d| d < 0.0).unwrap_or(false);
            found.sort_by(|a, b| {
                let ordering = compare(a, b, field);
                if descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }
        Ok(found)
    }

    async fn find_one(&self, collection: CollectionName, filter: Document) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| matches(d, &filter)).cloned()))
    }

    async fn find_one_and_update(
        &self,
        collection: CollectionName,
        filter: Document,
        update: Document,
    ) -> Result<Option<Document>, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(document) = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|d| matches(d, &filter)))
        else {
            return Ok(None);
        };
        let before = document.clone();
        apply_update(document, &update)?;
        Ok(Some(before))
    }

    async fn find_one_and_delete(
        &self,
        collection: CollectionName,
        filter: Document,
    ) -> Result<Option<Document>, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(None);
        };
        Ok(docs
            .iter()
            .position(|d| matches(d, &filter))
            .map(|index| docs.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn test_insert_assigns_id_and_find_one_matches() {
        let store = MemoryStore::new();
        let id = store
            .insert_one(CollectionName::Donors, doc! { "email": "a@x.io", "totalAmount": 5.0 })
            .await
            .unwrap();

        let found = store
            .find_one(CollectionName::Donors, doc! { "_id": id })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.get_str("email").unwrap(), "a@x.io");
        assert!(store.find_one(CollectionName::Posts, doc! { "_id": id }).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_sorts_descending() {
        let store = MemoryStore::new();
        for (email, amount) in [("a", 10.0), ("b", 50.0), ("c", 25.0)] {
            store
                .insert_one(CollectionName::Donors, doc! { "email": email, "totalAmount": amount })
                .await
                .unwrap();
        }

        let sorted = store
            .find(CollectionName::Donors, doc! {}, Some(doc! { "totalAmount": -1 }))
            .await
            .unwrap();
        let emails: Vec<_> = sorted.iter().map(|d| d.get_str("email").unwrap()).collect();
        assert_eq!(emails, vec!["b", "c", "a"]);
    }

    #[tokio::test]
    async fn test_update_returns_previous_document() {
        let store = MemoryStore::new();
        store
            .insert_one(CollectionName::Posts, doc! { "title": "old" })
            .await
            .unwrap();

        let before = store
            .find_one_and_update(CollectionName::Posts, doc! { "title": "old" }, doc! { "$set": { "title": "new" } })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(before.get_str("title").unwrap(), "old");

        let after = store
            .find_one(CollectionName::Posts, doc! { "title": "new" })
            .await
            .unwrap();
        assert!(after.is_some());
    }

    #[tokio::test]
    async fn test_push_appends_and_range_filter_guards() {
        let store = MemoryStore::new();
        store
            .insert_one(CollectionName::Donors, doc! { "email": "a@x.io", "totalAmount": 20.0, "post": ["p0"] })
            .await
            .unwrap();

        let lower = store
            .find_one_and_update(
                CollectionName::Donors,
                doc! { "email": "a@x.io", "totalAmount": { "$lte": 10.0 } },
                doc! { "$set": { "totalAmount": 10.0 }, "$push": { "post": "p1" } },
            )
            .await
            .unwrap();
        assert!(lower.is_none());

        store
            .find_one_and_update(
                CollectionName::Donors,
                doc! { "email": "a@x.io", "totalAmount": { "$lte": 20.0 } },
                doc! { "$set": { "totalAmount": 20.0 }, "$push": { "post": "p2", "tags": "first" } },
            )
            .await
            .unwrap()
            .unwrap();

        let stored = store
            .find_one(CollectionName::Donors, doc! { "totalAmount": { "$gte": 20.0 } })
            .await
            .unwrap()
            .unwrap();
        let posts: Vec<_> = stored
            .get_array("post")
            .unwrap()
            .iter()
            .filter_map(Bson::as_str)
            .collect();
        assert_eq!(posts, vec!["p0", "p2"]);
        assert_eq!(stored.get_array("tags").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unsupported_operator_is_rejected() {
        let store = MemoryStore::new();
        store
            .insert_one(CollectionName::Posts, doc! { "qty": 1 })
            .await
            .unwrap();

        let result = store
            .find_one_and_update(CollectionName::Posts, doc! {}, doc! { "$inc": { "qty": 1 } })
            .await;
        assert!(matches!(result, Err(StoreError::Backend(_))));
    }

    #[tokio::test]
    async fn test_delete_removes_document() {
        let store = MemoryStore::new();
        let id = store
            .insert_one(CollectionName::Comments, doc! { "text": "hi" })
            .await
            .unwrap();

        assert!(store
            .find_one_and_delete(CollectionName::Comments, doc! { "_id": id })
            .await
            .unwrap()
            .is_some());
        assert_eq!(store.count(CollectionName::Comments).await, 0);
        assert!(store
            .find_one_and_delete(CollectionName::Comments, doc! { "_id": id })
            .await
            .unwrap()
            .is_none());
    }
}
