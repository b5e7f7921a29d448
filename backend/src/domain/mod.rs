//! Domain primitives, validation and use cases.
//!
//! Purpose: define the person types, the demographic lookups and the
//! enrichment coordinator, and the people service that sequences them.
//! Nothing here knows about HTTP or storage engines; those sit behind the
//! traits in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifier.
//! - TraceId: per-request correlation identifier.
//! - NameInput, EnrichedRecord, Person and friends: the data model.
//! - validate_input / validate_record: pure validators.
//! - EnrichmentService: concurrent lookup coordinator.
//! - PeopleService: create, list, update and delete use cases.

pub mod enrichment;
pub mod error;
pub mod lookup;
pub mod people_service;
pub mod person;
pub mod ports;
pub mod trace_id;
pub mod validation;

pub use self::enrichment::{EnrichmentError, EnrichmentService, LOOKUP_FAN_OUT};
pub use self::error::{Error, ErrorCode};
pub use self::lookup::{
    AgeLookup, Attribute, DemographicLookup, FieldMissing, GenderLookup, LookupError,
    LookupOutcome, NationalityLookup, ProviderEndpoints,
};
pub use self::people_service::PeopleService;
pub use self::person::{
    DEFAULT_PAGE_SIZE, Demographics, EnrichedRecord, NameInput, PageRequest, PageRequestError,
    Person, PersonColumn, PersonFilter, PersonId, PersonQuery, UnknownColumn,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::validation::{
    Field, ValidationError, Verdict, Violation, validate_input, validate_record,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use people::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("Entry \"1\" does not exist"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
