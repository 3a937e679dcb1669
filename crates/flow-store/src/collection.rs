//! Typed repositories over JSON array documents.

use std::marker::PhantomData;
use std::sync::Arc;

use flow_core::entities::{Audit, AuditTemplate, User};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;
use crate::kv::KeyValueStore;

/// Read and deserialize the document under `key`.
///
/// # Errors
///
/// `StoreError::Corrupt` when the stored JSON does not match `T`.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    store
        .read(key)?
        .map(|text| {
            serde_json::from_str(&text).map_err(|source| StoreError::Corrupt {
                key: key.to_string(),
                source,
            })
        })
        .transpose()
}

/// Serialize `value` and store it under `key`.
///
/// # Errors
///
/// Serialization or storage failure.
pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| StoreError::Other(e.into()))?;
    store.write(key, &text)
}

/// An entity with a natural key inside its collection.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Audit {
    fn key(&self) -> &str {
        &self.reference
    }
}

impl Keyed for User {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for AuditTemplate {
    fn key(&self) -> &str {
        &self.audit_type
    }
}

pub trait Repository<T> {
    /// # Errors
    ///
    /// Storage or deserialization failure.
    fn get(&self, key: &str) -> Result<Option<T>, StoreError>;

    /// # Errors
    ///
    /// Storage or deserialization failure.
    fn list(&self) -> Result<Vec<T>, StoreError>;

    /// Insert or replace by key. Returns `true` when the item was new.
    ///
    /// # Errors
    ///
    /// Storage or serialization failure.
    fn save(&self, item: &T) -> Result<bool, StoreError>;

    /// Remove by key. Returns whether the item existed.
    ///
    /// # Errors
    ///
    /// Storage or deserialization failure.
    fn delete(&self, key: &str) -> Result<bool, StoreError>;
}

/// A collection stored as one JSON array document. Insertion order is kept.
pub struct JsonCollection<T> {
    store: Arc<dyn KeyValueStore>,
    storage_key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonCollection<T> {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, storage_key: &'static str) -> Self {
        Self {
            store,
            storage_key,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub const fn storage_key(&self) -> &'static str {
        self.storage_key
    }
}

impl<T> JsonCollection<T>
where
    T: Keyed + Serialize + DeserializeOwned,
{
    /// Replace the whole collection.
    ///
    /// # Errors
    ///
    /// Storage or serialization failure.
    pub fn replace_all(&self, items: &[T]) -> Result<(), StoreError> {
        save_json(self.store.as_ref(), self.storage_key, items)
    }
}

impl<T> Repository<T> for JsonCollection<T>
where
    T: Keyed + Serialize + DeserializeOwned,
{
    fn get(&self, key: &str) -> Result<Option<T>, StoreError> {
        Ok(self.list()?.into_iter().find(|item| item.key() == key))
    }

    fn list(&self) -> Result<Vec<T>, StoreError> {
        Ok(load_json(self.store.as_ref(), self.storage_key)?.unwrap_or_default())
    }

    fn save(&self, item: &T) -> Result<bool, StoreError> {
        let current = self.list()?;
        let existing = current.iter().position(|i| i.key() == item.key());
        let mut items: Vec<serde_json::Value> = current
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<_, _>>()
            .map_err(|e| StoreError::Other(e.into()))?;
        let value = serde_json::to_value(item).map_err(|e| StoreError::Other(e.into()))?;
        match existing {
            Some(pos) => items[pos] = value,
            None => items.push(value),
        }
        save_json(self.store.as_ref(), self.storage_key, &items)?;
        Ok(existing.is_none())
    }

    fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let mut items = self.list()?;
        let before = items.len();
        items.retain(|i| i.key() != key);
        if items.len() == before {
            return Ok(false);
        }
        self.replace_all(&items)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use flow_core::enums::UserRole;
    use pretty_assertions::assert_eq;

    fn user(id: &str, name: &str) -> User {
        User {
            id: id.into(),
            username: name.into(),
            role: UserRole::Auditor,
            is_admin: false,
            theme: None,
            last_login: None,
            total_usage_time: 0,
        }
    }

    #[test]
    fn save_upserts_in_place() {
        let repo: JsonCollection<User> = JsonCollection::new(Arc::new(MemoryStore::new()), "auditUsers");
        assert!(repo.save(&user("u1", "alice")).unwrap());
        assert!(repo.save(&user("u2", "bob")).unwrap());
        assert!(!repo.save(&user("u1", "alicia")).unwrap());

        let names: Vec<String> = repo.list().unwrap().into_iter().map(|u| u.username).collect();
        assert_eq!(names, ["alicia", "bob"]);
        assert_eq!(repo.get("u2").unwrap().unwrap().username, "bob");
    }

    #[test]
    fn delete_reports_presence() {
        let repo: JsonCollection<User> = JsonCollection::new(Arc::new(MemoryStore::new()), "auditUsers");
        repo.save(&user("u1", "alice")).unwrap();
        assert!(repo.delete("u1").unwrap());
        assert!(!repo.delete("u1").unwrap());
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn corrupt_document_is_reported() {
        let store = Arc::new(MemoryStore::new());
        store.write("auditUsers", r#"[{"id": 7}]"#).unwrap();
        let repo: JsonCollection<User> = JsonCollection::new(store, "auditUsers");
        let err = repo.list().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
        assert!(err.to_string().contains("auditUsers"));
    }

    #[test]
    fn saves_through_the_trait_object() {
        let store = Arc::new(MemoryStore::new());
        let collection: JsonCollection<User> = JsonCollection::new(store.clone(), "auditUsers");
        let repo: &dyn Repository<User> = &collection;
        assert!(repo.save(&user("u1", "alice")).unwrap());
        assert!(!repo.save(&user("u1", "alicia")).unwrap());
        assert_eq!(repo.list().unwrap().len(), 1);

        let stored: Vec<serde_json::Value> =
            serde_json::from_str(&store.read("auditUsers").unwrap().unwrap()).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0]["username"], "alicia");
    }
}
