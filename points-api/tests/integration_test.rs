use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::{Days, Utc};
use http_body_util::BodyExt;
use points_api::{app, state::spawn_view_sweeper, AppState};
use points_core::repository::{AirportDirectory, FlightSearchClient};
use points_core::search::FlightSearchRequest;
use points_core::{CoreError, CoreResult};
use points_results::{Diagnostics, ViewRegistry};
use points_shared::{Airport, DiagnosticEvent};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

const QS: &str = "oc=JFK&dc=LAX&dd=05-01-2024&rd=null";

fn nonstop(carrier: &str, cabin: &str, points: i64, cash: f64) -> Value {
    json!({
        "carrier": carrier,
        "origin": "JFK",
        "destination": "LAX",
        "departure_time": "2024-05-01T08:00:00Z",
        "arrival_time": "2024-05-01T14:00:00Z",
        "cabin_class": cabin,
        "point_cost": points,
        "dollar_cost": cash,
        "duration": {"hours": 6, "minutes": 0},
        "segments": [{
            "origin": "JFK",
            "destination": "LAX",
            "departure_time": "2024-05-01T08:00:00Z",
            "arrival_time": "2024-05-01T14:00:00Z",
            "aircraft_type": "A321",
            "flight_num": format!("{}100", carrier),
            "flight_time": {"hours": 6, "minutes": 0}
        }],
        "stop_count": 0
    })
}

struct StubSearch {
    calls: AtomicUsize,
    records: Vec<Value>,
    fail: bool,
}

#[async_trait]
impl FlightSearchClient for StubSearch {
    async fn search_flights(&self, _request: &FlightSearchRequest) -> CoreResult<Vec<Value>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(CoreError::UpstreamError { status: 500, body: "down".into() });
        }
        Ok(self.records.clone())
    }
}

struct StubAirports {
    online: bool,
}

#[async_trait]
impl AirportDirectory for StubAirports {
    async fn default_origin(&self) -> CoreResult<Airport> {
        if !self.online {
            return Err(CoreError::TransportError("connection refused".into()));
        }
        Ok(Airport::new("SFO", "San Francisco", "CA"))
    }

    async fn predictive_cities(&self, _prefix: &str) -> CoreResult<Vec<Airport>> {
        if !self.online {
            return Err(CoreError::TransportError("connection refused".into()));
        }
        Ok(vec![Airport::new("SAN", "San Diego", "CA")])
    }
}

struct Harness {
    router: Router,
    search: Arc<StubSearch>,
    diagnostics: Diagnostics,
}

fn harness(records: Vec<Value>, fail: bool, online: bool) -> Harness {
    let search = Arc::new(StubSearch { calls: AtomicUsize::new(0), records, fail });
    let diagnostics = Diagnostics::default();
    let state = AppState::new(search.clone(), Arc::new(StubAirports { online }), diagnostics.clone());
    Harness { router: app(state), search, diagnostics }
}

fn sample() -> Vec<Value> {
    let mut records = Vec::new();
    for i in 0..25 {
        records.push(nonstop("AA", "economy", 30_000 - i * 100, 5.6));
    }
    records.push(nonstop("DL", "business", 80_000, 11.2));
    records.push(nonstop("DL", "economy", 12_500, 5.6));
    records.push(json!({"carrier": "UA"}));
    records
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}

async fn mount(h: &Harness, qs: &str) -> String {
    let (status, body) = send(&h.router, Method::POST, "/v1/views", Some(json!({"query": qs}))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

/// Polls until the background search has settled.
async fn settled(h: &Harness, id: &str) -> Value {
    for _ in 0..200 {
        let (status, body) = send(&h.router, Method::GET, &format!("/v1/views/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        if body["loading"] == false {
            return body;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    panic!("view {} never settled", id);
}

#[tokio::test]
async fn test_mounted_view_loads_first_page() {
    let h = harness(sample(), false, true);
    let id = mount(&h, QS).await;
    let body = settled(&h, &id).await;

    assert_eq!(body["query"], QS);
    assert_eq!(body["fetch_state"], "settled");
    assert_eq!(body["raw_total"], 27);
    assert_eq!(body["total"], 27);
    assert_eq!(body["page"], 1);
    assert_eq!(body["page_count"], 2);
    assert_eq!(body["has_next"], true);
    assert_eq!(body["items"].as_array().unwrap().len(), 20);
    assert_eq!(body["facets"]["carriers"], json!(["AA", "DL"]));
    assert_eq!(body["facets"]["cabin_classes"], json!(["business", "economy"]));
    assert_eq!(body["items"][0]["status"], "flight");
    assert_eq!(body["items"][0]["stops"], "Nonstop");
    assert_eq!(h.search.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_filters_sort_and_paging() {
    let h = harness(sample(), false, true);
    let id = mount(&h, QS).await;
    settled(&h, &id).await;

    let (status, body) = send(
        &h.router,
        Method::PUT,
        &format!("/v1/views/{}/filters", id),
        Some(json!({"carriers": ["DL"], "cabin_classes": [], "max_stops": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["page_count"], 1);

    let (_, body) = send(
        &h.router,
        Method::PUT,
        &format!("/v1/views/{}/sort", id),
        Some(json!({"sort": "fewest_points"})),
    )
    .await;
    assert_eq!(body["sort"], "fewest_points");
    assert_eq!(body["items"][0]["points"], "12,500 pts");
    assert_eq!(body["items"][1]["points"], "80,000 pts");

    let (_, body) = send(&h.router, Method::GET, &format!("/v1/views/{}?page=3", id), None).await;
    assert_eq!(body["page"], 3);
    assert_eq!(body["empty"], true);
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_same_query_does_not_refetch() {
    let h = harness(sample(), false, true);
    let id = mount(&h, QS).await;
    settled(&h, &id).await;

    let (status, body) = send(
        &h.router,
        Method::PUT,
        &format!("/v1/views/{}/query", id),
        Some(json!({"query": QS})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["loading"], false);
    assert_eq!(h.search.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_upstream_failure_settles_empty_and_reports() {
    let h = harness(Vec::new(), true, true);
    let mut rx = h.diagnostics.subscribe();
    let id = mount(&h, QS).await;
    let body = settled(&h, &id).await;

    assert_eq!(body["raw_total"], 0);
    assert_eq!(body["empty"], true);
    match rx.recv().await.unwrap() {
        DiagnosticEvent::FetchFailed(e) => assert_eq!(e.view_id.to_string(), id),
        other => panic!("unexpected event {:?}", other),
    }
}

#[tokio::test]
async fn test_unmount_and_unknown_view() {
    let h = harness(sample(), false, true);
    let id = mount(&h, QS).await;

    let (status, _) = send(&h.router, Method::DELETE, &format!("/v1/views/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&h.router, Method::GET, &format!("/v1/views/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains(&id));

    let (status, _) = send(&h.router, Method::DELETE, &format!("/v1/views/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search_form_redirects_to_results() {
    let h = harness(Vec::new(), false, true);
    let departure = Utc::now().date_naive().checked_add_days(Days::new(30)).unwrap();

    let (status, body) = send(
        &h.router,
        Method::POST,
        "/v1/search",
        Some(json!({
            "origin_code": "jfk",
            "destination_code": "LAX",
            "departure_date": departure.format("%Y-%m-%d").to_string()
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["location"],
        format!("/flights?oc=JFK&dc=LAX&dd={}&rd=null", departure.format("%m-%d-%Y"))
    );

    let (status, body) = send(&h.router, Method::POST, "/v1/search", Some(json!({"origin_code": "JFK"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("destination"));
}

#[tokio::test]
async fn test_airport_lookup_falls_back_to_bundled_list() {
    let online = harness(Vec::new(), false, true);
    let (_, body) = send(&online.router, Method::GET, "/v1/airports/search/San", None).await;
    assert_eq!(body[0]["airport_code"], "SAN");

    let offline = harness(Vec::new(), false, false);
    let (status, body) = send(&offline.router, Method::GET, "/v1/airports/search/JFK", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["airport_code"], "JFK");

    let (status, _) = send(&offline.router, Method::GET, "/v1/airports/default", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_abandoned_view_is_swept() {
    let search = Arc::new(StubSearch { calls: AtomicUsize::new(0), records: sample(), fail: false });
    let state = AppState::with_registry(
        ViewRegistry::with_idle_ttl(std::time::Duration::from_millis(30)),
        search.clone(),
        Arc::new(StubAirports { online: true }),
        Diagnostics::default(),
    );
    let sweeper = spawn_view_sweeper(state.views.clone(), std::time::Duration::from_millis(10));
    let h = Harness { router: app(state.clone()), search, diagnostics: Diagnostics::default() };

    let id = mount(&h, QS).await;
    assert_eq!(state.views.read().await.len(), 1);

    tokio::time::sleep(std::time::Duration::from_millis(150)).await;
    assert!(state.views.read().await.is_empty());
    let (status, _) = send(&h.router, Method::GET, &format!("/v1/views/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    sweeper.abort();
}

#[tokio::test]
async fn test_non_finite_cash_is_rejected_and_cash_sort_survives() {
    let mut records = sample();
    for _ in 0..22 {
        records.push(nonstop("UA", "economy", 40_000, 0.0));
        records.last_mut().unwrap()["dollar_cost"] = json!("NaN");
    }
    let h = harness(records, false, true);
    let id = mount(&h, QS).await;
    let body = settled(&h, &id).await;
    assert_eq!(body["raw_total"], 27);

    let (status, body) = send(
        &h.router,
        Method::PUT,
        &format!("/v1/views/{}/sort", id),
        Some(json!({"sort": "lowest_cash"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sort"], "lowest_cash");
    assert_eq!(body["items"][0]["cash"], "+$5.60");
}
