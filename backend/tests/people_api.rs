//! End-to-end behaviour of the people API with real adapters and stubbed
//! providers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use mockable::DefaultClock;
use people::Trace;
use people::domain::{EnrichmentService, PeopleService, ProviderEndpoints, TRACE_ID_HEADER};
use people::inbound::http::people::api_scope;
use people::inbound::http::state::HttpState;
use people::outbound::http::ReqwestJsonFetcher;
use people::outbound::persistence::InMemoryPersonRepository;
use rstest::rstest;
use serde_json::{Value, json};

#[path = "support/providers.rs"]
mod providers;

use providers::{StubProviders, closed_address, endpoints_at};

fn http_state(endpoints: ProviderEndpoints) -> web::Data<HttpState> {
    let fetcher = ReqwestJsonFetcher::new().expect("HTTP client builds");
    let people = PeopleService::new(
        EnrichmentService::new(Arc::new(fetcher), endpoints),
        Arc::new(InMemoryPersonRepository::default()),
        Arc::new(DefaultClock),
    );
    web::Data::new(HttpState::new(Arc::new(people)))
}

macro_rules! people_app {
    ($endpoints:expr) => {
        test::init_service(
            App::new()
                .app_data(http_state($endpoints))
                .wrap(Trace)
                .service(api_scope()),
        )
        .await
    };
}

#[rstest]
#[actix_rt::test]
async fn create_then_filter_by_nationality() {
    let stub = StubProviders::start();
    let app = people_app!(stub.endpoints());

    for (name, surname) in [("Ivan", "Ivanov"), ("Anna", "Petrova"), ("Dmitriy", "Sokolov")] {
        let req = test::TestRequest::post()
            .uri("/api/create")
            .set_json(json!({ "name": name, "surname": surname }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK, "creating {name}");
    }

    let req = test::TestRequest::get()
        .uri("/api/read?col=nationality&data=UA")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let entries = body["entries"].as_array().expect("entries");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["name"], "Anna");
    assert_eq!(entries[0]["gender"], "female");
    assert_eq!(entries[0]["age"], 29);
    stub.stop().await;
}

#[rstest]
#[actix_rt::test]
async fn unreachable_providers_fail_with_trace_id() {
    let app = people_app!(endpoints_at(closed_address()));

    let req = test::TestRequest::post()
        .uri("/api/create")
        .set_json(json!({ "name": "Ivan", "surname": "Ivanov" }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let header = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["traceId"], header);
    let message = body["message"].as_str().expect("message");
    assert!(message.starts_with("Failed to enrich data from API: "));

    let read = test::TestRequest::get().uri("/api/read").to_request();
    let body: Value = test::call_and_read_body_json(&app, read).await;
    assert_eq!(body["entries"], json!([]));
}
