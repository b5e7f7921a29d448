//! Demographic lookup tasks.
//!
//! A lookup turns a name into one derived attribute: it builds the provider
//! URL, calls the [`JsonFetcher`] port once, and extracts a typed value from
//! the decoded object. Every distinct way a well-formed body can lack the
//! expected shape has its own [`FieldMissing`] variant.

use std::fmt;

use serde_json::Value;
use tracing::debug;
use url::Url;

use super::ports::{FetchError, JsonFetcher, JsonObject};

/// Default age provider endpoint.
pub const DEFAULT_AGE_PROVIDER: &str = "https://api.agify.io/";
/// Default gender provider endpoint.
pub const DEFAULT_GENDER_PROVIDER: &str = "https://api.genderize.io/";
/// Default nationality provider endpoint.
pub const DEFAULT_NATIONALITY_PROVIDER: &str = "https://api.nationalize.io/";

const AGE_KEY: &str = "age";
const GENDER_KEY: &str = "gender";
const COUNTRY_KEY: &str = "country";
const FIRST_COUNTRY_KEY: &str = "country[0]";
const COUNTRY_ID_KEY: &str = "country_id";

/// The attribute a lookup derives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// Age in years.
    Age,
    /// Gender.
    Gender,
    /// Country code.
    Nationality,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Age => "age",
            Self::Gender => "gender",
            Self::Nationality => "nationality",
        })
    }
}

/// Ways a decoded provider body can lack the expected field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldMissing {
    /// Key absent or `null`.
    #[error("field `{key}` not found")]
    MissingKey {
        /// Expected key.
        key: &'static str,
    },
    /// Key present with a value of the wrong JSON type.
    #[error("field `{key}` is not {expected}")]
    WrongType {
        /// Offending key.
        key: &'static str,
        /// Description of the expected type.
        expected: &'static str,
    },
    /// Sequence present but empty.
    #[error("field `{key}` is empty")]
    EmptySequence {
        /// Offending key.
        key: &'static str,
    },
    /// Nested object lacks a required key.
    #[error("field `{key}` has no `{nested}`")]
    MissingNestedKey {
        /// Path of the nested object.
        key: &'static str,
        /// Key missing from the nested object.
        nested: &'static str,
    },
}

/// Failure of one lookup task.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// The provider could not be reached.
    #[error("{attribute} provider unreachable: {message}")]
    Transport {
        /// Attribute being resolved.
        attribute: Attribute,
        /// Transport failure detail.
        message: String,
    },
    /// The provider answered with something other than a JSON object.
    #[error("{attribute} provider returned malformed data: {message}")]
    Decode {
        /// Attribute being resolved.
        attribute: Attribute,
        /// Decode failure detail.
        message: String,
    },
    /// The provider answered without the expected field.
    #[error("{attribute} data not found: {reason}")]
    FieldMissing {
        /// Attribute being resolved.
        attribute: Attribute,
        /// Which part of the shape was missing.
        reason: FieldMissing,
    },
    /// The provider value does not fit the domain type.
    #[error("{attribute} value {value} is out of range")]
    OutOfRange {
        /// Attribute being resolved.
        attribute: Attribute,
        /// Provider value as received.
        value: String,
    },
}

impl LookupError {
    /// Attribute whose lookup failed.
    pub fn attribute(&self) -> Attribute {
        match self {
            Self::Transport { attribute, .. }
            | Self::Decode { attribute, .. }
            | Self::FieldMissing { attribute, .. }
            | Self::OutOfRange { attribute, .. } => *attribute,
        }
    }

    fn from_fetch(attribute: Attribute, error: FetchError) -> Self {
        match error {
            FetchError::Transport { message } => Self::Transport { attribute, message },
            FetchError::Decode { message } => Self::Decode { attribute, message },
        }
    }
}

fn missing(attribute: Attribute) -> impl Fn(FieldMissing) -> LookupError {
    move |reason| LookupError::FieldMissing { attribute, reason }
}

/// Outcome of one lookup: exactly a value or an error.
pub type LookupOutcome<T> = Result<T, LookupError>;

/// Resolve one derived attribute from a name.
pub trait DemographicLookup: Send + Sync {
    /// Typed attribute value.
    type Output: Send;

    /// Attribute this lookup resolves.
    fn attribute(&self) -> Attribute;

    /// Provider endpoint without the name parameter.
    fn endpoint(&self) -> &Url;

    /// Extract the attribute from a decoded provider body.
    ///
    /// # Errors
    /// Returns [`LookupError::FieldMissing`] or [`LookupError::OutOfRange`]
    /// when the body does not carry a usable value.
    fn extract(&self, body: &JsonObject) -> LookupOutcome<Self::Output>;

    /// Provider URL for `name`, percent-encoded as a `name` query parameter.
    fn provider_url(&self, name: &str) -> Url {
        let mut url = self.endpoint().clone();
        url.query_pairs_mut().append_pair("name", name);
        url
    }
}

/// Run one lookup: build the URL, fetch once, extract.
///
/// # Errors
/// Propagates fetch failures tagged with the lookup's attribute, and
/// extraction failures from [`DemographicLookup::extract`].
pub async fn resolve<L>(
    lookup: &L,
    fetcher: &dyn JsonFetcher,
    name: &str,
) -> LookupOutcome<L::Output>
where
    L: DemographicLookup + ?Sized,
{
    let attribute = lookup.attribute();
    let url = lookup.provider_url(name);
    debug!(%attribute, %url, "querying demographic provider");
    let body = fetcher
        .fetch_json(&url)
        .await
        .map_err(|error| LookupError::from_fetch(attribute, error))?;
    lookup.extract(&body)
}

fn required<'a>(body: &'a JsonObject, key: &'static str) -> Result<&'a Value, FieldMissing> {
    match body.get(key) {
        None | Some(Value::Null) => Err(FieldMissing::MissingKey { key }),
        Some(value) => Ok(value),
    }
}

/// Age lookup against an agify-compatible provider.
#[derive(Debug, Clone)]
pub struct AgeLookup {
    endpoint: Url,
}

impl AgeLookup {
    /// Build a lookup for `endpoint`.
    pub fn new(endpoint: Url) -> Self {
        Self { endpoint }
    }
}

impl DemographicLookup for AgeLookup {
    type Output = u8;

    fn attribute(&self) -> Attribute {
        Attribute::Age
    }

    fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn extract(&self, body: &JsonObject) -> LookupOutcome<u8> {
        let Value::Number(number) = required(body, AGE_KEY).map_err(missing(Attribute::Age))?
        else {
            return Err(missing(Attribute::Age)(FieldMissing::WrongType {
                key: AGE_KEY,
                expected: "a number",
            }));
        };
        whole_u8(number).ok_or_else(|| LookupError::OutOfRange {
                attribute: Attribute::Age,
                value: number.to_string(),
            })
    }
}

/// Whole values in `0..=255`, whether encoded as integers or as floats such
/// as `42.0`. Nothing is clamped.
fn whole_u8(number: &serde_json::Number) -> Option<u8> {
    if let Some(age) = number.as_u64() {
        return u8::try_from(age).ok();
    }
    number
        .as_f64()
        .filter(|age| age.fract() == 0.0 && (0.0..=f64::from(u8::MAX)).contains(age))
        .and_then(|age| u8::try_from(age as u64).ok())
}

/// Gender lookup against a genderize-compatible provider.
#[derive(Debug, Clone)]
pub struct GenderLookup {
    endpoint: Url,
}

impl GenderLookup {
    /// Build a lookup for `endpoint`.
    pub fn new(endpoint: Url) -> Self {
        Self { endpoint }
    }
}

impl DemographicLookup for GenderLookup {
    type Output = String;

    fn attribute(&self) -> Attribute {
        Attribute::Gender
    }

    fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn extract(&self, body: &JsonObject) -> LookupOutcome<String> {
        match required(body, GENDER_KEY).map_err(missing(Attribute::Gender))? {
            Value::String(gender) => Ok(gender.clone()),
            _ => Err(missing(Attribute::Gender)(FieldMissing::WrongType {
                key: GENDER_KEY,
                expected: "a string",
            })),
        }
    }
}

/// Nationality lookup against a nationalize-compatible provider.
///
/// Providers return candidate countries most likely first; only the first
/// candidate is used.
#[derive(Debug, Clone)]
pub struct NationalityLookup {
    endpoint: Url,
}

impl NationalityLookup {
    /// Build a lookup for `endpoint`.
    pub fn new(endpoint: Url) -> Self {
        Self { endpoint }
    }
}

impl DemographicLookup for NationalityLookup {
    type Output = String;

    fn attribute(&self) -> Attribute {
        Attribute::Nationality
    }

    fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn extract(&self, body: &JsonObject) -> LookupOutcome<String> {
        first_country_id(body).map_err(missing(Attribute::Nationality))
    }
}

fn first_country_id(body: &JsonObject) -> Result<String, FieldMissing> {
    let Value::Array(countries) = required(body, COUNTRY_KEY)? else {
        return Err(FieldMissing::WrongType {
            key: COUNTRY_KEY,
            expected: "an array",
        });
    };
    let first = countries
        .first()
        .ok_or(FieldMissing::EmptySequence { key: COUNTRY_KEY })?;
    let Value::Object(first) = first else {
        return Err(FieldMissing::WrongType {
            key: FIRST_COUNTRY_KEY,
            expected: "an object",
        });
    };
    match first.get(COUNTRY_ID_KEY) {
        None | Some(Value::Null) => Err(FieldMissing::MissingNestedKey {
            key: FIRST_COUNTRY_KEY,
            nested: COUNTRY_ID_KEY,
        }),
        Some(Value::String(country_id)) => Ok(country_id.clone()),
        Some(_) => Err(FieldMissing::WrongType {
            key: COUNTRY_ID_KEY,
            expected: "a string",
        }),
    }
}

/// Endpoints of the three providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoints {
    /// Age provider.
    pub age: Url,
    /// Gender provider.
    pub gender: Url,
    /// Nationality provider.
    pub nationality: Url,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        let parse = |raw: &str| {
            Url::parse(raw)
                .unwrap_or_else(|error| panic!("default provider URL {raw} is invalid: {error}"))
        };
        Self {
            age: parse(DEFAULT_AGE_PROVIDER),
            gender: parse(DEFAULT_GENDER_PROVIDER),
            nationality: parse(DEFAULT_NATIONALITY_PROVIDER),
        }
    }
}
