//! Persistence adapters.
//!
//! Repository implementations only translate between storage and domain
//! types. No business logic resides here.
//!
//! # Example
//!
//! ```
//! use people::outbound::persistence::InMemoryPersonRepository;
//!
//! let repository = InMemoryPersonRepository::default();
//! # let _ = repository;
//! ```

mod in_memory_person_repository;

pub use in_memory_person_repository::InMemoryPersonRepository;
