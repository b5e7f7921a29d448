//! Domain ports: the traits outbound adapters implement.
//!
//! Ports are the only way the domain reaches the network or storage. Each
//! port owns its error enum so adapters translate infrastructure failures
//! into domain vocabulary at the boundary.

mod macros;

mod json_fetcher;
mod person_repository;

pub(crate) use macros::define_port_error;

#[cfg(test)]
pub use json_fetcher::MockJsonFetcher;
pub use json_fetcher::{FetchError, JsonFetcher, JsonObject};
#[cfg(test)]
pub use person_repository::MockPersonRepository;
pub use person_repository::{PersonRepository, PersonRepositoryError};
