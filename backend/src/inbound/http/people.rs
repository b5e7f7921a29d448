//! People API handlers.
//!
//! ```text
//! POST   /api/create {"name":"Ivan","surname":"Ivanov","patronymic":"Ivanovich"}
//! GET    /api/read?size=10&page=1&col=surname&data=Iva
//! PATCH  /api/update {"id":1,"name":"Ivan",...}
//! DELETE /api/delete {"id":1}
//! ```

use actix_web::{HttpResponse, Scope, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    DEFAULT_PAGE_SIZE, EnrichedRecord, Error, NameInput, PageRequest, Person, PersonColumn,
    PersonFilter, PersonId, PersonQuery,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::invalid_api_query;
use crate::inbound::http::state::HttpState;

const SUCCESS: &str = "Success";

/// Request body for `POST /api/create`.
///
/// Absent fields are treated as empty strings and judged by validation.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreatePersonRequest {
    #[schema(example = "Ivan")]
    pub name: String,
    #[schema(example = "Ivanov")]
    pub surname: String,
    #[schema(example = "Ivanovich")]
    pub patronymic: Option<String>,
}

impl From<CreatePersonRequest> for NameInput {
    fn from(value: CreatePersonRequest) -> Self {
        NameInput::new(value.name, value.surname, value.patronymic)
    }
}

/// Request body for `PATCH /api/update`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdatePersonRequest {
    #[schema(example = 1)]
    pub id: u64,
    #[serde(flatten)]
    pub record: EnrichedRecord,
}

/// Request body for `DELETE /api/delete`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct DeletePersonRequest {
    #[schema(example = 1)]
    pub id: u64,
}

/// Query parameters for `GET /api/read`.
///
/// Kept as raw strings so each malformed parameter gets its own message.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReadPeopleParams {
    /// Page size, defaults to 10.
    pub size: Option<String>,
    /// One-based page number, defaults to 1.
    pub page: Option<String>,
    /// Filter column; requires `data`.
    pub col: Option<String>,
    /// Substring the column must contain; requires `col`.
    pub data: Option<String>,
}

/// Success acknowledgement.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Success")]
    pub message: String,
}

impl MessageResponse {
    fn success() -> Self {
        Self {
            message: SUCCESS.to_owned(),
        }
    }
}

/// Response body for `POST /api/create`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePersonResponse {
    #[schema(example = "Success")]
    pub message: String,
    pub entry: Person,
}

/// Response body for `GET /api/read`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadPeopleResponse {
    pub entries: Vec<Person>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_positive(raw: Option<String>, default: u32, message: &'static str) -> Result<u32, Error> {
    match non_empty(raw) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<u32>()
            .ok()
            .filter(|value| *value > 0)
            .ok_or_else(|| Error::invalid_request(message)),
    }
}

fn parse_read_params(params: ReadPeopleParams) -> Result<PersonQuery, Error> {
    let ReadPeopleParams {
        size,
        page,
        col,
        data,
    } = params;
    let filter = match (non_empty(col), non_empty(data)) {
        (None, None) => None,
        (Some(col), Some(needle)) => {
            let column = col
                .parse::<PersonColumn>()
                .map_err(|_| Error::invalid_request("Invalid col parameter"))?;
            Some(PersonFilter { column, needle })
        }
        _ => return Err(Error::invalid_request(r#"Fill in both "col" and "data""#)),
    };
    let size = parse_positive(size, DEFAULT_PAGE_SIZE, "Invalid size parameter")?;
    let page = parse_positive(page, 1, "Invalid page parameter")?;
    let page = PageRequest::new(page, size)
        .map_err(|err| Error::invalid_request(format!("Invalid page request: {err}")))?;
    Ok(PersonQuery { page, filter })
}

/// Scope mounting every people endpoint under `/api`.
///
/// Body and query parse failures answer `400 Invalid API query`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use people::inbound::http::people::api_scope;
///
/// let app = App::new().service(api_scope());
/// ```
pub fn api_scope() -> Scope {
    web::scope("/api")
        .app_data(web::JsonConfig::default().error_handler(invalid_api_query))
        .app_data(web::QueryConfig::default().error_handler(invalid_api_query))
        .service(create_person)
        .service(read_people)
        .service(update_person)
        .service(delete_person)
}

/// Validate, enrich and store a person.
#[utoipa::path(
    post,
    path = "/api/create",
    request_body = CreatePersonRequest,
    responses(
        (status = 200, description = "Person enriched and stored", body = CreatePersonResponse),
        (status = 400, description = "Malformed body", body = Error),
        (status = 422, description = "Invalid name or enriched record", body = Error),
        (status = 500, description = "Enrichment or storage failed", body = Error)
    ),
    tags = ["people"],
    operation_id = "createPerson"
)]
#[post("/create")]
pub async fn create_person(
    state: web::Data<HttpState>,
    payload: web::Json<CreatePersonRequest>,
) -> ApiResult<web::Json<CreatePersonResponse>> {
    let payload = payload.into_inner();
    debug!(
        name = %payload.name,
        surname = %payload.surname,
        patronymic = ?payload.patronymic,
        "create person request"
    );
    let entry = state.people.create(payload.into()).await?;
    Ok(web::Json(CreatePersonResponse {
        message: SUCCESS.to_owned(),
        entry,
    }))
}

/// List people, one page at a time, optionally filtered by a column.
#[utoipa::path(
    get,
    path = "/api/read",
    params(ReadPeopleParams),
    responses(
        (status = 200, description = "One page of people", body = ReadPeopleResponse),
        (status = 400, description = "Invalid paging or filter parameters", body = Error),
        (status = 500, description = "Storage failed", body = Error)
    ),
    tags = ["people"],
    operation_id = "readPeople"
)]
#[get("/read")]
pub async fn read_people(
    state: web::Data<HttpState>,
    params: web::Query<ReadPeopleParams>,
) -> ApiResult<web::Json<ReadPeopleResponse>> {
    let params = params.into_inner();
    debug!(?params, "read people request");
    let query = parse_read_params(params)?;
    let entries = state.people.list(&query).await?;
    Ok(web::Json(ReadPeopleResponse { entries }))
}

/// Replace a stored person's attributes.
#[utoipa::path(
    patch,
    path = "/api/update",
    request_body = UpdatePersonRequest,
    responses(
        (status = 200, description = "Person updated", body = MessageResponse),
        (status = 400, description = "Malformed body", body = Error),
        (status = 404, description = "Unknown person", body = Error),
        (status = 422, description = "Invalid record", body = Error)
    ),
    tags = ["people"],
    operation_id = "updatePerson"
)]
#[patch("/update")]
pub async fn update_person(
    state: web::Data<HttpState>,
    payload: web::Json<UpdatePersonRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let UpdatePersonRequest { id, record } = payload.into_inner();
    debug!(id, ?record, "update person request");
    state.people.update(PersonId::new(id), record).await?;
    Ok(web::Json(MessageResponse::success()))
}

/// Delete a stored person.
#[utoipa::path(
    delete,
    path = "/api/delete",
    request_body = DeletePersonRequest,
    responses(
        (status = 200, description = "Person deleted", body = MessageResponse),
        (status = 400, description = "Malformed body", body = Error),
        (status = 404, description = "Unknown person", body = Error)
    ),
    tags = ["people"],
    operation_id = "deletePerson"
)]
#[delete("/delete")]
pub async fn delete_person(
    state: web::Data<HttpState>,
    payload: web::Json<DeletePersonRequest>,
) -> ApiResult<HttpResponse> {
    let DeletePersonRequest { id } = payload.into_inner();
    debug!(id, "delete person request");
    state.people.delete(PersonId::new(id)).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::success()))
}
