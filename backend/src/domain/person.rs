//! Person records: raw name input, enriched records and stored people.
//!
//! `NameInput` lives for one request. `EnrichedRecord` is what the enrichment
//! coordinator produces and the full-record validator judges. `Person` is an
//! enriched record after the repository assigned it an identity.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Personal name as submitted by a client, before enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NameInput {
    /// Given name; also the key for demographic lookups.
    pub name: String,
    /// Family name.
    pub surname: String,
    /// Optional patronymic.
    pub patronymic: Option<String>,
}

impl NameInput {
    /// Build an input from its parts.
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        patronymic: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
            patronymic,
        }
    }
}

/// The three attributes derived from a name by the lookup providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Demographics {
    /// Estimated age.
    pub age: u8,
    /// Provider-reported gender.
    pub gender: String,
    /// Provider-reported ISO 3166-1 alpha-2 country code.
    pub nationality: String,
}

/// A name merged with its demographic attributes.
///
/// ## Invariants
/// - Records produced by enrichment carry all three attributes or are never
///   produced at all.
///
/// Absent fields deserialise to their defaults so that validation, rather
/// than decoding, reports them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct EnrichedRecord {
    /// Given name.
    #[schema(example = "Ivan")]
    pub name: String,
    /// Family name.
    #[schema(example = "Ivanov")]
    pub surname: String,
    /// Patronymic, empty when not supplied.
    #[schema(example = "Ivanovich")]
    pub patronymic: String,
    /// Age in years.
    #[schema(example = 42)]
    pub age: u8,
    /// `male` or `female`.
    #[schema(example = "male")]
    pub gender: String,
    /// Two uppercase letters.
    #[schema(example = "RU")]
    pub nationality: String,
}

impl EnrichedRecord {
    /// Start a record from raw input with no demographics yet.
    pub fn from_input(input: NameInput) -> Self {
        let NameInput {
            name,
            surname,
            patronymic,
        } = input;
        Self {
            name,
            surname,
            patronymic: patronymic.unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Overwrite all three demographic attributes at once.
    pub fn apply(&mut self, demographics: Demographics) {
        let Demographics {
            age,
            gender,
            nationality,
        } = demographics;
        self.age = age;
        self.gender = gender;
        self.nationality = nationality;
    }
}

/// Repository-assigned person identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(u64);

impl PersonId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored, enriched person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Stable identifier.
    #[schema(value_type = u64, example = 1)]
    pub id: PersonId,
    /// Enriched attributes.
    #[serde(flatten)]
    pub record: EnrichedRecord,
    /// Creation timestamp.
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

/// Columns a listing may be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonColumn {
    /// Given name.
    Name,
    /// Family name.
    Surname,
    /// Patronymic.
    Patronymic,
    /// Age, matched on its decimal text.
    Age,
    /// Gender.
    Gender,
    /// Nationality code.
    Nationality,
}

/// Unknown filter column name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown person column: {0}")]
pub struct UnknownColumn(pub String);

impl FromStr for PersonColumn {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "surname" => Ok(Self::Surname),
            "patronymic" => Ok(Self::Patronymic),
            "age" => Ok(Self::Age),
            "gender" => Ok(Self::Gender),
            "nationality" => Ok(Self::Nationality),
            other => Err(UnknownColumn(other.to_owned())),
        }
    }
}

/// Substring filter on one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonFilter {
    /// Column to inspect.
    pub column: PersonColumn,
    /// Case-sensitive substring the column must contain.
    pub needle: String,
}

impl PersonFilter {
    /// Whether `record` satisfies this filter.
    pub fn matches(&self, record: &EnrichedRecord) -> bool {
        let needle = self.needle.as_str();
        match self.column {
            PersonColumn::Name => record.name.contains(needle),
            PersonColumn::Surname => record.surname.contains(needle),
            PersonColumn::Patronymic => record.patronymic.contains(needle),
            PersonColumn::Age => record.age.to_string().contains(needle),
            PersonColumn::Gender => record.gender.contains(needle),
            PersonColumn::Nationality => record.nationality.contains(needle),
        }
    }
}

/// Default page size for listings.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Rejected pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// Page numbers start at 1.
    #[error("page must be at least 1")]
    ZeroPage,
    /// Page size must be positive.
    #[error("size must be at least 1")]
    ZeroSize,
}

/// One-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Validate a page number and size.
    pub fn new(page: u32, size: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        if size == 0 {
            return Err(PageRequestError::ZeroSize);
        }
        Ok(Self { page, size })
    }

    /// One-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of entries on the page.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of entries preceding the page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Listing query: one page, optionally filtered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersonQuery {
    /// Page to return.
    pub page: PageRequest,
    /// Optional column filter.
    pub filter: Option<PersonFilter>,
}
