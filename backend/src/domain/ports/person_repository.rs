//! Driven port for storing enriched people.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::define_port_error;
use crate::domain::{EnrichedRecord, Person, PersonId, PersonQuery};

define_port_error! {
    /// Errors surfaced by person repositories.
    pub enum PersonRepositoryError {
        /// No person with the identifier exists.
        NotFound { id: u64 } => "person {id} does not exist",
        /// The backing store could not be reached.
        Connection { message: String } => "person store unavailable: {message}",
        /// The backing store rejected the operation.
        Query { message: String } => "person store query failed: {message}",
    }
}

/// Port for creating, listing, updating and deleting people.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Store a new person and assign its identifier.
    async fn insert(
        &self,
        record: &EnrichedRecord,
        now: DateTime<Utc>,
    ) -> Result<Person, PersonRepositoryError>;

    /// Return one page of people ordered by identifier.
    async fn list(&self, query: &PersonQuery) -> Result<Vec<Person>, PersonRepositoryError>;

    /// Replace the attributes of an existing person.
    async fn update(
        &self,
        id: PersonId,
        record: &EnrichedRecord,
        now: DateTime<Utc>,
    ) -> Result<Person, PersonRepositoryError>;

    /// Remove a person.
    async fn delete(&self, id: PersonId) -> Result<(), PersonRepositoryError>;
}
