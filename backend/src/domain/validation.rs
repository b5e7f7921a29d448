//! Structural validation of name inputs and enriched records.
//!
//! Every field is checked independently and every failing field contributes
//! one violation; a bad name never hides a bad surname. Within a field the
//! rules run in order and only the first failing rule is reported.
//!
//! Two profiles exist:
//! - [`validate_input`] runs before enrichment and decides whether the
//!   lookup providers are called at all.
//! - [`validate_record`] runs on the merged record before it is stored.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use super::{EnrichedRecord, NameInput};

/// Minimum length of a name or surname, in characters.
pub const NAME_MIN_CHARS: usize = 2;
/// Maximum length of a name or surname, in characters.
pub const NAME_MAX_CHARS: usize = 50;
/// Youngest acceptable age.
pub const AGE_MIN: u8 = 1;
/// Oldest acceptable age.
pub const AGE_MAX: u8 = 120;

static NAME_RE: OnceLock<Regex> = OnceLock::new();
static COUNTRY_RE: OnceLock<Regex> = OnceLock::new();

fn name_regex() -> &'static Regex {
    NAME_RE.get_or_init(|| {
        // Latin and basic Cyrillic letters only; length is checked separately.
        Regex::new("^[a-zA-Zа-яА-Я]+$")
            .unwrap_or_else(|error| panic!("name regex failed to compile: {error}"))
    })
}

fn country_regex() -> &'static Regex {
    COUNTRY_RE.get_or_init(|| {
        Regex::new("^[A-Z]{2}$")
            .unwrap_or_else(|error| panic!("country regex failed to compile: {error}"))
    })
}

/// Record fields in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Given name.
    Name,
    /// Family name.
    Surname,
    /// Age.
    Age,
    /// Gender.
    Gender,
    /// Nationality.
    Nationality,
}

impl Field {
    /// Lowercase field label used in messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Surname => "surname",
            Self::Age => "age",
            Self::Gender => "gender",
            Self::Nationality => "nationality",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One broken rule on one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    /// A required text field is empty.
    #[error("{field} cannot be empty")]
    Empty {
        /// Offending field.
        field: Field,
    },
    /// Shorter than [`NAME_MIN_CHARS`].
    #[error("{field} is too short")]
    TooShort {
        /// Offending field.
        field: Field,
    },
    /// Longer than [`NAME_MAX_CHARS`].
    #[error("{field} is too long")]
    TooLong {
        /// Offending field.
        field: Field,
    },
    /// Contains something other than Latin or Cyrillic letters.
    #[error("{field} contains invalid characters")]
    InvalidCharacters {
        /// Offending field.
        field: Field,
    },
    /// Age outside [`AGE_MIN`]..=[`AGE_MAX`].
    #[error("age contains invalid data")]
    AgeOutOfRange,
    /// Gender other than `male` or `female`.
    #[error("only “male” or “female” gender is available")]
    UnknownGender,
    /// Nationality that is not two uppercase Latin letters.
    #[error("nationality contains invalid data (example: RU, US)")]
    InvalidCountryCode,
}

impl Violation {
    /// Field the violation belongs to.
    pub fn field(&self) -> Field {
        match *self {
            Self::Empty { field }
            | Self::TooShort { field }
            | Self::TooLong { field }
            | Self::InvalidCharacters { field } => field,
            Self::AgeOutOfRange => Field::Age,
            Self::UnknownGender => Field::Gender,
            Self::InvalidCountryCode => Field::Nationality,
        }
    }
}

/// Every violation found in one validation pass, in field order.
///
/// ## Invariants
/// - Never empty.
/// - At most one violation per field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    /// Violations in reporting order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Whether `field` has a violation.
    pub fn mentions(&self, field: Field) -> bool {
        self.violations.iter().any(|violation| violation.field() == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, violation) in self.violations.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Outcome of a validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// No rule was broken.
    Valid,
    /// At least one rule was broken.
    Invalid(ValidationError),
}

impl Verdict {
    fn collect(checks: impl IntoIterator<Item = Option<Violation>>) -> Self {
        let violations: Vec<Violation> = checks.into_iter().flatten().collect();
        if violations.is_empty() {
            Self::Valid
        } else {
            Self::Invalid(ValidationError { violations })
        }
    }

    /// Whether no rule was broken.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Convert into a `Result` for `?` propagation.
    ///
    /// # Errors
    /// Returns the aggregated [`ValidationError`] when the verdict is invalid.
    pub fn into_result(self) -> Result<(), ValidationError> {
        match self {
            Self::Valid => Ok(()),
            Self::Invalid(error) => Err(error),
        }
    }
}

/// Validate a raw name input (name and surname only).
///
/// # Examples
/// ```
/// use people::domain::{validate_input, NameInput, Verdict};
///
/// let verdict = validate_input(&NameInput::new("N", "Ivanov", None));
/// let Verdict::Invalid(error) = verdict else { panic!("expected a violation") };
/// assert_eq!(error.to_string(), "name is too short");
/// ```
pub fn validate_input(input: &NameInput) -> Verdict {
    Verdict::collect([
        check_personal_name(Field::Name, &input.name),
        check_personal_name(Field::Surname, &input.surname),
    ])
}

/// Validate a merged record before it is accepted.
pub fn validate_record(record: &EnrichedRecord) -> Verdict {
    Verdict::collect([
        check_personal_name(Field::Name, &record.name),
        check_personal_name(Field::Surname, &record.surname),
        check_age(record.age),
        check_gender(&record.gender),
        check_nationality(&record.nationality),
    ])
}

fn check_personal_name(field: Field, value: &str) -> Option<Violation> {
    if value.is_empty() {
        return Some(Violation::Empty { field });
    }
    let length = value.chars().count();
    if length < NAME_MIN_CHARS {
        return Some(Violation::TooShort { field });
    }
    if length > NAME_MAX_CHARS {
        return Some(Violation::TooLong { field });
    }
    if !name_regex().is_match(value) {
        return Some(Violation::InvalidCharacters { field });
    }
    None
}

fn check_age(age: u8) -> Option<Violation> {
    (!(AGE_MIN..=AGE_MAX).contains(&age)).then_some(Violation::AgeOutOfRange)
}

fn check_gender(gender: &str) -> Option<Violation> {
    match gender {
        "" => Some(Violation::Empty {
            field: Field::Gender,
        }),
        "male" | "female" => None,
        _ => Some(Violation::UnknownGender),
    }
}

fn check_nationality(nationality: &str) -> Option<Violation> {
    if nationality.is_empty() {
        return Some(Violation::Empty {
            field: Field::Nationality,
        });
    }
    (!country_regex().is_match(nationality)).then_some(Violation::InvalidCountryCode)
}

#[cfg(test)]
mod tests;
