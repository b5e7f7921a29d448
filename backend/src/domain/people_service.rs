//! People use cases: create, list, update and delete.
//!
//! Creation validates the submitted name, enriches it, validates the merged
//! record and stores it. Updates skip enrichment and validate the client's
//! full record instead. Repository and enrichment failures are translated to
//! domain [`Error`]s here so inbound adapters only map codes to statuses.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, error};

use crate::domain::ports::{PersonRepository, PersonRepositoryError};
use crate::domain::{
    EnrichedRecord, EnrichmentError, EnrichmentService, Error, NameInput, Person, PersonId,
    PersonQuery, validate_input, validate_record,
};

/// Domain service behind the people endpoints.
#[derive(Clone)]
pub struct PeopleService {
    enrichment: EnrichmentService,
    repository: Arc<dyn PersonRepository>,
    clock: Arc<dyn Clock>,
}

impl PeopleService {
    /// Create a service over an enrichment coordinator, a repository and a
    /// clock.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// # use people::domain::{EnrichmentService, PeopleService, ProviderEndpoints};
    /// # use people::outbound::http::ReqwestJsonFetcher;
    /// # use people::outbound::persistence::InMemoryPersonRepository;
    /// # fn example() -> Result<(), reqwest::Error> {
    /// let enrichment = EnrichmentService::new(
    ///     Arc::new(ReqwestJsonFetcher::new()?),
    ///     ProviderEndpoints::default(),
    /// );
    /// let service = PeopleService::new(
    ///     enrichment,
    ///     Arc::new(InMemoryPersonRepository::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(
        enrichment: EnrichmentService,
        repository: Arc<dyn PersonRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            enrichment,
            repository,
            clock,
        }
    }

    /// Validate, enrich and store a new person.
    ///
    /// # Errors
    /// - `UnprocessableEntity` when the name or the enriched record is invalid.
    /// - `EnrichmentFailed` when any lookup fails.
    /// - `ServiceUnavailable`/`InternalError` when storage fails.
    pub async fn create(&self, input: NameInput) -> Result<Person, Error> {
        validate_input(&input).into_result().map_err(|err| {
            debug!(error = %err, "invalid name input");
            Error::unprocessable(err.to_string())
        })?;

        let record = self
            .enrichment
            .enrich_input(input)
            .await
            .map_err(map_enrichment_error)?;

        ensure_record_valid(&record)?;

        let person = self
            .repository
            .insert(&record, self.clock.utc())
            .await
            .map_err(map_repository_error)?;
        debug!(id = %person.id, "person created");
        Ok(person)
    }

    /// Return one page of people matching `query`.
    ///
    /// # Errors
    /// `ServiceUnavailable`/`InternalError` when storage fails.
    pub async fn list(&self, query: &PersonQuery) -> Result<Vec<Person>, Error> {
        self.repository
            .list(query)
            .await
            .map_err(map_repository_error)
    }

    /// Replace a stored person's attributes with a client-supplied record.
    ///
    /// # Errors
    /// - `UnprocessableEntity` when the record is invalid.
    /// - `NotFound` when no person has `id`.
    pub async fn update(&self, id: PersonId, record: EnrichedRecord) -> Result<Person, Error> {
        ensure_record_valid(&record)?;
        let person = self
            .repository
            .update(id, &record, self.clock.utc())
            .await
            .map_err(map_repository_error)?;
        debug!(%id, "person updated");
        Ok(person)
    }

    /// Delete a stored person.
    ///
    /// # Errors
    /// `NotFound` when no person has `id`.
    pub async fn delete(&self, id: PersonId) -> Result<(), Error> {
        self.repository
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        debug!(%id, "person deleted");
        Ok(())
    }
}

fn ensure_record_valid(record: &EnrichedRecord) -> Result<(), Error> {
    validate_record(record).into_result().map_err(|err| {
        debug!(error = %err, "invalid person record");
        Error::unprocessable(format!("Filling errors: {err}"))
    })
}

fn map_enrichment_error(err: EnrichmentError) -> Error {
    Error::enrichment_failed(format!("Failed to enrich data from API: {err}"))
}

fn map_repository_error(err: PersonRepositoryError) -> Error {
    match err {
        PersonRepositoryError::NotFound { id } => {
            Error::not_found(format!("Entry \"{id}\" does not exist"))
        }
        PersonRepositoryError::Connection { message } => {
            error!(%message, "person store unavailable");
            Error::service_unavailable(format!("person store unavailable: {message}"))
        }
        PersonRepositoryError::Query { message } => {
            error!(%message, "person store query failed");
            Error::internal(format!("person store query failed: {message}"))
        }
    }
}
