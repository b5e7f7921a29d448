//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the people endpoints, the health probes and the
//! schemas they exchange. The document is served by Swagger UI in debug
//! builds.

use utoipa::OpenApi;

use crate::domain::{EnrichedRecord, Error, ErrorCode, Person};
use crate::inbound::http::people::{
    CreatePersonRequest, CreatePersonResponse, DeletePersonRequest, MessageResponse,
    ReadPeopleResponse, UpdatePersonRequest,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "People enrichment API",
        description = "Stores people enriched with age, gender and nationality derived from their name."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::people::create_person,
        crate::inbound::http::people::read_people,
        crate::inbound::http::people::update_person,
        crate::inbound::http::people::delete_person,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        EnrichedRecord,
        Person,
        CreatePersonRequest,
        CreatePersonResponse,
        UpdatePersonRequest,
        DeletePersonRequest,
        MessageResponse,
        ReadPeopleResponse,
    )),
    tags(
        (name = "people", description = "Create, read, update and delete enriched people"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
