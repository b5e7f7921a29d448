//! Enrichment through the reqwest adapter against local provider stubs.

use std::sync::Arc;

use people::domain::{
    Attribute, EnrichedRecord, EnrichmentError, EnrichmentService, FieldMissing, LookupError,
    NameInput, ProviderEndpoints,
};
use people::outbound::http::ReqwestJsonFetcher;
use rstest::rstest;

#[path = "support/providers.rs"]
mod providers;

use providers::{BROKEN_NAME, StubProviders, closed_address, endpoints_at};

fn service(endpoints: ProviderEndpoints) -> EnrichmentService {
    let fetcher = ReqwestJsonFetcher::new().expect("HTTP client builds");
    EnrichmentService::new(Arc::new(fetcher), endpoints)
}

#[rstest]
#[actix_rt::test]
async fn enriches_known_name_from_all_providers() {
    let stub = StubProviders::start();

    let record = service(stub.endpoints())
        .enrich_input(NameInput::new("Ivan", "Ivanov", Some("Ivanovich".to_owned())))
        .await
        .expect("enrichment succeeds");

    assert_eq!(
        record,
        EnrichedRecord {
            name: "Ivan".to_owned(),
            surname: "Ivanov".to_owned(),
            patronymic: "Ivanovich".to_owned(),
            age: 42,
            gender: "male".to_owned(),
            nationality: "RU".to_owned(),
        }
    );
    stub.stop().await;
}

#[rstest]
#[actix_rt::test]
async fn unknown_name_reports_missing_field() {
    let stub = StubProviders::start();
    let mut record = EnrichedRecord::from_input(NameInput::new("Zzyzx", "Nobody", None));
    let before = record.clone();

    let err = service(stub.endpoints())
        .enrich("Zzyzx", &mut record)
        .await
        .expect_err("unknown names cannot be enriched");

    match err {
        EnrichmentError::Lookup(LookupError::FieldMissing { reason, .. }) => assert!(matches!(
            reason,
            FieldMissing::MissingKey { .. } | FieldMissing::EmptySequence { .. }
        )),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(record, before);
    stub.stop().await;
}

#[rstest]
#[actix_rt::test]
async fn non_json_body_is_a_decode_failure() {
    let stub = StubProviders::start();
    let mut record = EnrichedRecord::default();

    let err = service(stub.endpoints())
        .enrich(BROKEN_NAME, &mut record)
        .await
        .expect_err("HTML bodies cannot be decoded");

    assert!(
        matches!(err, EnrichmentError::Lookup(LookupError::Decode { .. })),
        "unexpected error: {err:?}"
    );
    stub.stop().await;
}

#[rstest]
#[actix_rt::test]
async fn closed_port_is_a_transport_failure() {
    let endpoints = endpoints_at(closed_address());
    let mut record = EnrichedRecord::default();

    let err = service(endpoints)
        .enrich("Ivan", &mut record)
        .await
        .expect_err("nothing is listening");

    let EnrichmentError::Lookup(lookup) = err else {
        panic!("expected a lookup failure");
    };
    assert!(matches!(lookup, LookupError::Transport { .. }));
    assert!(matches!(
        lookup.attribute(),
        Attribute::Age | Attribute::Gender | Attribute::Nationality
    ));
    assert_eq!(record, EnrichedRecord::default());
}
