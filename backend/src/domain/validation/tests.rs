//! Tests for the input and record validators.

use super::*;
use rstest::{fixture, rstest};

#[fixture]
fn valid_record() -> EnrichedRecord {
    EnrichedRecord {
        name: "Ivan".to_owned(),
        surname: "Ivanov".to_owned(),
        patronymic: "Ivanovich".to_owned(),
        age: 42,
        gender: "male".to_owned(),
        nationality: "RU".to_owned(),
    }
}

fn input(name: &str, surname: &str) -> NameInput {
    NameInput::new(name, surname, None)
}

fn message(verdict: Verdict) -> String {
    match verdict {
        Verdict::Valid => panic!("expected an invalid verdict"),
        Verdict::Invalid(error) => error.to_string(),
    }
}

#[rstest]
fn accepts_full_name_with_patronymic() {
    let verdict = validate_input(&NameInput::new(
        "Ivan",
        "Ivanov",
        Some("Ivanovich".to_owned()),
    ));
    assert!(verdict.is_valid());
}

#[rstest]
#[case::latin_min("Jo")]
#[case::cyrillic("Анна")]
#[case::mixed_case("McDonald")]
#[case::latin_max("a")]
fn accepts_letter_only_names_within_bounds(#[case] seed: &str) {
    let name = if seed.chars().count() < NAME_MIN_CHARS {
        seed.repeat(NAME_MAX_CHARS)
    } else {
        seed.to_owned()
    };
    assert!(validate_input(&input(&name, &name)).is_valid());
}

#[rstest]
fn counts_characters_not_bytes() {
    // Two Cyrillic letters occupy four bytes.
    assert!(validate_input(&input("Ян", "Ли")).is_valid());
    let long = "я".repeat(NAME_MAX_CHARS);
    assert!(validate_input(&input(&long, "Ivanov")).is_valid());
}

#[rstest]
#[case::empty("", "name cannot be empty")]
#[case::short("N", "name is too short")]
#[case::long(&"a".repeat(NAME_MAX_CHARS + 1), "name is too long")]
#[case::digits("Iv4n", "name contains invalid characters")]
#[case::whitespace("Ivan Ivan", "name contains invalid characters")]
#[case::punctuation("O'Neil", "name contains invalid characters")]
#[case::yo("Ёлка", "name contains invalid characters")]
fn reports_first_failing_name_rule(#[case] name: &str, #[case] expected: &str) {
    assert_eq!(message(validate_input(&input(name, "Ivanov"))), expected);
}

#[rstest]
fn single_character_name_is_too_short_not_invalid() {
    // Length rules run before the character rule.
    assert_eq!(message(validate_input(&input("1", "Ivanov"))), "name is too short");
}

#[rstest]
fn reports_both_name_and_surname() {
    let verdict = validate_input(&input("N", ""));
    let Verdict::Invalid(error) = verdict else {
        panic!("expected an invalid verdict");
    };
    assert!(error.mentions(Field::Name));
    assert!(error.mentions(Field::Surname));
    assert_eq!(error.to_string(), "name is too short, surname cannot be empty");
}

#[rstest]
fn input_validation_is_deterministic() {
    let candidate = input("N4", "x");
    assert_eq!(
        message(validate_input(&candidate)),
        message(validate_input(&candidate))
    );
}

#[rstest]
fn accepts_valid_record(valid_record: EnrichedRecord) {
    assert!(validate_record(&valid_record).is_valid());
}

#[rstest]
#[case::zero(0)]
#[case::above_max(AGE_MAX + 1)]
#[case::two_hundred(200)]
#[case::max_u8(u8::MAX)]
fn reports_only_age_when_out_of_range(mut valid_record: EnrichedRecord, #[case] age: u8) {
    valid_record.age = age;
    let Verdict::Invalid(error) = validate_record(&valid_record) else {
        panic!("expected an invalid verdict");
    };
    assert_eq!(error.violations(), &[Violation::AgeOutOfRange]);
    assert_eq!(error.to_string(), "age contains invalid data");
}

#[rstest]
#[case::min(AGE_MIN)]
#[case::max(AGE_MAX)]
fn accepts_age_bounds(mut valid_record: EnrichedRecord, #[case] age: u8) {
    valid_record.age = age;
    assert!(validate_record(&valid_record).is_valid());
}

#[rstest]
#[case::empty("", "gender cannot be empty")]
#[case::capitalised("Male", "only “male” or “female” gender is available")]
#[case::other("unknown", "only “male” or “female” gender is available")]
fn reports_only_gender(
    mut valid_record: EnrichedRecord,
    #[case] gender: &str,
    #[case] expected: &str,
) {
    valid_record.gender = gender.to_owned();
    assert_eq!(message(validate_record(&valid_record)), expected);
}

#[rstest]
#[case::empty("", "nationality cannot be empty")]
#[case::lowercase("usa", "nationality contains invalid data (example: RU, US)")]
#[case::three_letters("USA", "nationality contains invalid data (example: RU, US)")]
#[case::mixed("Ru", "nationality contains invalid data (example: RU, US)")]
#[case::cyrillic("РУ", "nationality contains invalid data (example: RU, US)")]
fn reports_only_nationality(
    mut valid_record: EnrichedRecord,
    #[case] nationality: &str,
    #[case] expected: &str,
) {
    valid_record.nationality = nationality.to_owned();
    assert_eq!(message(validate_record(&valid_record)), expected);
}

#[rstest]
fn record_violations_follow_field_order() {
    let record = EnrichedRecord {
        name: String::new(),
        surname: "S".to_owned(),
        patronymic: String::new(),
        age: 0,
        gender: "robot".to_owned(),
        nationality: "usa".to_owned(),
    };
    let Verdict::Invalid(error) = validate_record(&record) else {
        panic!("expected an invalid verdict");
    };
    let fields: Vec<Field> = error.violations().iter().map(Violation::field).collect();
    assert_eq!(
        fields,
        vec![
            Field::Name,
            Field::Surname,
            Field::Age,
            Field::Gender,
            Field::Nationality
        ]
    );
    assert_eq!(
        error.to_string(),
        "name cannot be empty, surname is too short, age contains invalid data, \
         only “male” or “female” gender is available, \
         nationality contains invalid data (example: RU, US)"
    );
}

#[rstest]
fn patronymic_is_not_validated(mut valid_record: EnrichedRecord) {
    valid_record.patronymic = "123 !!".to_owned();
    assert!(validate_record(&valid_record).is_valid());
}

#[rstest]
fn into_result_exposes_error() {
    let result = validate_input(&input("", "")).into_result();
    let error = result.expect_err("invalid input");
    assert_eq!(error.violations().len(), 2);
}
