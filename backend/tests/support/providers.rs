//! Local stand-ins for the age, gender and nationality providers.
//!
//! One actix server answers all three under `/age/`, `/gender/` and
//! `/nationality/`. Names listed in [`StubProviders::answers`] get canned
//! bodies; `Broken` gets a non-JSON body and every other name gets the
//! provider's "unknown name" shape.

use std::collections::HashMap;
use std::net::{SocketAddr, TcpListener};

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpResponse, HttpServer, web};
use people::domain::ProviderEndpoints;
use serde_json::{Value, json};

/// Name whose lookups answer with plain text.
pub const BROKEN_NAME: &str = "Broken";

#[derive(Clone)]
struct Answers {
    age: HashMap<String, Value>,
    gender: HashMap<String, Value>,
    nationality: HashMap<String, Value>,
}

fn default_answers() -> Answers {
    let mut answers = Answers {
        age: HashMap::new(),
        gender: HashMap::new(),
        nationality: HashMap::new(),
    };
    for (name, age, gender, country) in [
        ("Ivan", 42, "male", "RU"),
        ("Anna", 29, "female", "UA"),
        ("Dmitriy", 38, "male", "KZ"),
    ] {
        answers
            .age
            .insert(name.to_owned(), json!({ "count": 10, "name": name, "age": age }));
        answers.gender.insert(
            name.to_owned(),
            json!({ "count": 10, "name": name, "gender": gender, "probability": 0.99 }),
        );
        answers.nationality.insert(
            name.to_owned(),
            json!({
                "count": 10,
                "name": name,
                "country": [
                    { "country_id": country, "probability": 0.61 },
                    { "country_id": "BY", "probability": 0.12 }
                ]
            }),
        );
    }
    answers
}

fn answer(table: &HashMap<String, Value>, params: &HashMap<String, String>, unknown: Value) -> HttpResponse {
    let name = params.get("name").map(String::as_str).unwrap_or_default();
    if name == BROKEN_NAME {
        return HttpResponse::BadGateway().body("<html>upstream down</html>");
    }
    HttpResponse::Ok().json(table.get(name).cloned().unwrap_or(unknown))
}

async fn age(answers: web::Data<Answers>, params: web::Query<HashMap<String, String>>) -> HttpResponse {
    answer(&answers.age, &params, json!({ "count": 0, "age": null }))
}

async fn gender(
    answers: web::Data<Answers>,
    params: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    answer(&answers.gender, &params, json!({ "count": 0, "gender": null }))
}

async fn nationality(
    answers: web::Data<Answers>,
    params: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    answer(&answers.nationality, &params, json!({ "count": 0, "country": [] }))
}

/// Running provider stub.
pub struct StubProviders {
    addr: SocketAddr,
    handle: ServerHandle,
}

impl StubProviders {
    /// Start the stub on an ephemeral port inside the current actix runtime.
    pub fn start() -> Self {
        let data = web::Data::new(default_answers());
        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .route("/age/", web::get().to(age))
                .route("/gender/", web::get().to(gender))
                .route("/nationality/", web::get().to(nationality))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("stub providers should bind");
        let addr = *server.addrs().first().expect("bound address");
        let server = server.run();
        let handle = server.handle();
        actix_rt::spawn(server);
        Self { addr, handle }
    }

    /// Endpoints pointing at this stub.
    pub fn endpoints(&self) -> ProviderEndpoints {
        endpoints_at(self.addr)
    }

    /// Stop accepting connections.
    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

/// Endpoints rooted at `addr`.
pub fn endpoints_at(addr: SocketAddr) -> ProviderEndpoints {
    let url = |path: &str| {
        format!("http://{addr}/{path}/")
            .parse()
            .expect("stub url parses")
    };
    ProviderEndpoints {
        age: url("age"),
        gender: url("gender"),
        nationality: url("nationality"),
    }
}

/// An address nothing is listening on.
pub fn closed_address() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").expect("ephemeral port");
    listener.local_addr().expect("local address")
}
