//! In-process `PersonRepository` implementation.
//!
//! People live in a `BTreeMap` keyed by identifier, so listings come out in
//! identifier order without sorting. Identifiers are handed out from an atomic
//! sequence starting at 1 and are never reused, even after deletes.
//!
//! This adapter stands in for a SQL-backed repository. Column filters are a
//! case-sensitive substring match, the in-process analogue of `LIKE '%…%'`,
//! and nothing survives a restart.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::ports::{PersonRepository, PersonRepositoryError};
use crate::domain::{EnrichedRecord, Person, PersonId, PersonQuery};

/// Memory-backed implementation of the `PersonRepository` port.
#[derive(Debug)]
pub struct InMemoryPersonRepository {
    people: RwLock<BTreeMap<u64, Person>>,
    next_id: AtomicU64,
}

impl Default for InMemoryPersonRepository {
    fn default() -> Self {
        Self {
            people: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl InMemoryPersonRepository {
    /// Number of stored people.
    pub async fn len(&self) -> usize {
        self.people.read().await.len()
    }

    /// Whether the repository is empty.
    pub async fn is_empty(&self) -> bool {
        self.people.read().await.is_empty()
    }
}

#[async_trait]
impl PersonRepository for InMemoryPersonRepository {
    async fn insert(
        &self,
        record: &EnrichedRecord,
        now: DateTime<Utc>,
    ) -> Result<Person, PersonRepositoryError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let person = Person {
            id: PersonId::new(id),
            record: record.clone(),
            created_at: now,
            updated_at: now,
        };
        self.people.write().await.insert(id, person.clone());
        debug!(id, "stored person");
        Ok(person)
    }

    async fn list(&self, query: &PersonQuery) -> Result<Vec<Person>, PersonRepositoryError> {
        let offset = usize::try_from(query.page.offset())
            .map_err(|_| PersonRepositoryError::query("page offset exceeds address space"))?;
        let size = usize::try_from(query.page.size())
            .map_err(|_| PersonRepositoryError::query("page size exceeds address space"))?;
        let people = self.people.read().await;
        Ok(people
            .values()
            .filter(|person| {
                query
                    .filter
                    .as_ref()
                    .is_none_or(|filter| filter.matches(&person.record))
            })
            .skip(offset)
            .take(size)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: PersonId,
        record: &EnrichedRecord,
        now: DateTime<Utc>,
    ) -> Result<Person, PersonRepositoryError> {
        let mut people = self.people.write().await;
        let person = people
            .get_mut(&id.get())
            .ok_or_else(|| PersonRepositoryError::not_found(id.get()))?;
        person.record = record.clone();
        person.updated_at = now;
        Ok(person.clone())
    }

    async fn delete(&self, id: PersonId) -> Result<(), PersonRepositoryError> {
        self.people
            .write()
            .await
            .remove(&id.get())
            .map(|_| ())
            .ok_or_else(|| PersonRepositoryError::not_found(id.get()))
    }
}
