//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain use cases and remain testable without I/O.

use std::sync::Arc;

use crate::domain::PeopleService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub people: Arc<PeopleService>,
}

impl HttpState {
    /// Construct state around the people service.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use people::domain::{EnrichmentService, PeopleService, ProviderEndpoints};
    /// use people::inbound::http::state::HttpState;
    /// use people::outbound::http::ReqwestJsonFetcher;
    /// use people::outbound::persistence::InMemoryPersonRepository;
    ///
    /// let enrichment = EnrichmentService::new(
    ///     Arc::new(ReqwestJsonFetcher::new().expect("client")),
    ///     ProviderEndpoints::default(),
    /// );
    /// let people = PeopleService::new(
    ///     enrichment,
    ///     Arc::new(InMemoryPersonRepository::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// let state = HttpState::new(Arc::new(people));
    /// let _people = state.people.clone();
    /// ```
    pub fn new(people: Arc<PeopleService>) -> Self {
        Self { people }
    }
}
