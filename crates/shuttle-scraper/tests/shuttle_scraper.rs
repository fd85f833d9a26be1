//! Integration tests for `ShuttleClient` and `ShuttleScraper`.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no
//! real network traffic is made. Covers the happy path against a saved
//! copy of the schedule page, the scenario fixtures, and every failure
//! that must collapse to the `success == false` sentinel.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shuttle_scraper::{DayType, ScraperError, ShuttleClient, ShuttleScraper};

const SHUTTLE_PAGE: &str = include_str!("fixtures/shuttle_page.html");

const SCENARIO_PAGE: &str = "<html><body>\
    <h3>A Route</h3>\
    <p>North Oakland</p>\
    <p>Forbes &gt; Morewood</p>\
    <h4>Weekday Schedule</h4>\
    <table>\
      <tr><th>Stop1</th><th>Stop2</th></tr>\
      <tr><td>08:00</td><td>08:10</td></tr>\
    </table>\
    </body></html>";

/// Builds a `ShuttleClient` suitable for tests: 5-second timeout, descriptive UA.
fn test_client() -> ShuttleClient {
    ShuttleClient::new(5, "shuttle-test/0.1").expect("failed to build test ShuttleClient")
}

async fn serve(status: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shuttle.html"))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;
    server
}

fn page_url(server: &MockServer) -> String {
    format!("{}/shuttle.html", server.uri())
}

// ---------------------------------------------------------------------------
// ShuttleClient::fetch_page
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_page_returns_body_on_200() {
    let server = serve(200, SCENARIO_PAGE).await;

    let body = test_client().fetch_page(&page_url(&server)).await;

    assert!(body.is_ok(), "expected Ok, got: {body:?}");
    assert!(body.unwrap().contains("North Oakland"));
}

#[tokio::test]
async fn fetch_page_returns_unexpected_status_on_500() {
    let server = serve(500, "internal error").await;

    let result = test_client().fetch_page(&page_url(&server)).await;

    let err = result.unwrap_err();
    assert!(
        matches!(err, ScraperError::UnexpectedStatus { status: 500, .. }),
        "expected UnexpectedStatus(500), got: {err:?}"
    );
    assert!(err.is_fetch_error());
}

#[tokio::test]
async fn fetch_page_treats_non_200_success_as_failure() {
    let server = serve(204, "").await;

    let result = test_client().fetch_page(&page_url(&server)).await;

    assert!(
        matches!(result, Err(ScraperError::UnexpectedStatus { status: 204, .. })),
        "expected UnexpectedStatus(204), got: {result:?}"
    );
}

#[tokio::test]
async fn fetch_page_returns_http_error_when_server_unreachable() {
    let server = MockServer::start().await;
    let url = page_url(&server);
    drop(server);

    let result = test_client().fetch_page(&url).await;

    assert!(
        matches!(result, Err(ScraperError::Http(_))),
        "expected Http error, got: {result:?}"
    );
}

// ---------------------------------------------------------------------------
// ShuttleScraper::get_all_shuttle_data
// ---------------------------------------------------------------------------

#[tokio::test]
async fn scenario_single_route_and_weekday_table() {
    let server = serve(200, SCENARIO_PAGE).await;
    let scraper = ShuttleScraper::new(test_client(), page_url(&server));

    let result = scraper.get_all_shuttle_data().await;

    assert!(result.success, "expected success, got: {result:?}");
    assert!(result.error.is_none());
    assert_eq!(result.url, page_url(&server));

    assert_eq!(result.routes.len(), 1);
    let a = &result.routes["A"];
    assert_eq!(a.description, "North Oakland");
    assert_eq!(a.path, "Forbes > Morewood");

    let table = &result.schedules["A_Weekday"];
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0].get("Stop1"), Some("08:00"));
    assert_eq!(table.rows[0].get("Stop2"), Some("08:10"));

    let rows = serde_json::to_value(&table.rows).unwrap();
    assert_eq!(rows, serde_json::json!([{"Stop1": "08:00", "Stop2": "08:10"}]));
}

#[tokio::test]
async fn scenario_http_500_yields_empty_failure() {
    let server = serve(500, SCENARIO_PAGE).await;
    let scraper = ShuttleScraper::new(test_client(), page_url(&server));

    let result = scraper.get_all_shuttle_data().await;

    assert!(!result.success);
    assert!(result.routes.is_empty(), "routes must be empty on failure");
    assert!(result.schedules.is_empty(), "schedules must be empty on failure");
    let error = result.error.expect("failure carries an error message");
    assert!(error.contains("500"), "unexpected error message: {error}");
}

#[tokio::test]
async fn not_found_yields_empty_failure() {
    let server = MockServer::start().await;
    let scraper = ShuttleScraper::new(test_client(), page_url(&server));

    let result = scraper.get_all_shuttle_data().await;

    assert!(!result.success);
    assert!(result.routes.is_empty());
    assert!(result.schedules.is_empty());
}

#[tokio::test]
async fn unparseable_body_yields_empty_failure() {
    let server = serve(200, "   ").await;
    let scraper = ShuttleScraper::new(test_client(), page_url(&server));

    let result = scraper.get_all_shuttle_data().await;

    assert!(!result.success);
    assert!(result.routes.is_empty());
    assert!(result.schedules.is_empty());
    assert!(result.error.is_some());
}

#[tokio::test]
async fn page_without_routes_or_tables_is_still_success() {
    let server = serve(200, "<html><body><p>Service suspended.</p></body></html>").await;
    let scraper = ShuttleScraper::new(test_client(), page_url(&server));

    let result = scraper.get_all_shuttle_data().await;

    assert!(result.success);
    assert!(result.routes.is_empty());
    assert!(result.schedules.is_empty());
}

#[tokio::test]
async fn every_call_fetches_again() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shuttle.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SCENARIO_PAGE))
        .expect(2)
        .mount(&server)
        .await;
    let scraper = ShuttleScraper::new(test_client(), page_url(&server));

    let first = scraper.get_all_shuttle_data().await;
    let second = scraper.get_all_shuttle_data().await;

    assert_eq!(first, second);
    server.verify().await;
}

// ---------------------------------------------------------------------------
// Saved schedule page
// ---------------------------------------------------------------------------

#[tokio::test]
async fn saved_page_routes_and_schedules() {
    let server = serve(200, SHUTTLE_PAGE).await;
    let scraper = ShuttleScraper::new(test_client(), page_url(&server));

    let result = scraper.get_all_shuttle_data().await;
    assert!(result.success, "expected success, got: {result:?}");

    let codes: Vec<&str> = result.routes.keys().map(String::as_str).collect();
    assert_eq!(codes, vec!["A", "AB", "B", "BakerySquare", "C", "Mill19"]);

    let a = &result.routes["A"];
    assert_eq!(a.description, "North Oakland / West Shadyside");
    assert!(a.path.starts_with("Morewood & Forbes > Centre & Neville"));

    let c = &result.routes["C"];
    assert_eq!(c.description, "Squirrel Hill");
    assert_eq!(c.path, "Morewood & Forbes > Forbes & Murray > Beacon & Shady");

    let bakery = &result.routes["BakerySquare"];
    assert_eq!(bakery.description, "Service to Bakery Square via Shadyside");
    assert_eq!(bakery.path, "");

    let keys: Vec<&str> = result.schedules.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["A_B_AB_Weekday", "A_B_AB_Weekend", "C_Weekday"]);

    let weekday = &result.schedules["A_B_AB_Weekday"];
    assert_eq!(
        weekday.columns,
        vec!["Morewood & Forbes", "Centre & Neville", "Fifth & Aiken"]
    );
    assert_eq!(weekday.rows.len(), 3);
    assert_eq!(weekday.rows[2].get("Centre & Neville"), None);
    assert_eq!(
        weekday.times_at("Fifth & Aiken"),
        vec!["7:12 AM", "7:32 AM", "7:52 AM"]
    );

    let weekend: Vec<&str> = result
        .schedules_for(DayType::Weekend)
        .map(|(key, _)| key)
        .collect();
    assert_eq!(weekend, vec!["A_B_AB_Weekend"]);
}

#[test]
fn scrape_markup_is_deterministic() {
    let first = ShuttleScraper::scrape_markup(SHUTTLE_PAGE, "https://example.test/shuttle.html");
    let second = ShuttleScraper::scrape_markup(SHUTTLE_PAGE, "https://example.test/shuttle.html");

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn weekend_tables_come_only_from_weekend_headings() {
    let result = ShuttleScraper::scrape_markup(SHUTTLE_PAGE, "https://example.test/shuttle.html");

    for (key, table) in &result.schedules {
        let expect_weekend = key == "A_B_AB_Weekend";
        assert_eq!(
            table.day == DayType::Weekend,
            expect_weekend,
            "unexpected day classification for {key}"
        );
    }
}
