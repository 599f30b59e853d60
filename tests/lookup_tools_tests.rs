//! Tests for the HTTP-backed lookup tools against a mock server.

use reagent::tools::{Observation, Tool, ToolError, ToolOutput, WeatherLookup, WikipediaSearch, NO_RESULT};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn weather(server: &MockServer) -> WeatherLookup {
    WeatherLookup::new(reqwest::Client::new(), &server.uri()).unwrap()
}

fn search(server: &MockServer) -> WikipediaSearch {
    WikipediaSearch::new(reqwest::Client::new(), &server.uri()).unwrap()
}

#[tokio::test]
async fn weather_reads_current_temperature() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Recife"))
        .and(query_param("format", "j1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current_condition": [{ "temp_C": "29", "humidity": "70" }],
            "weather": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let out = weather(&server).execute("Recife").await.unwrap();
    assert_eq!(out, ToolOutput::Text("29°C".into()));
}

#[tokio::test]
async fn weather_encodes_city_names() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/S%C3%A3o%20Paulo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current_condition": [{ "temp_C": "21" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let out = weather(&server).execute("São Paulo").await.unwrap();
    assert_eq!(out.to_string(), "21°C");
}

#[tokio::test]
async fn weather_non_success_status_reads_as_absence() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Unknown location"))
        .mount(&server)
        .await;

    let result = weather(&server).execute("Atlântida").await;
    assert!(matches!(result, Err(ToolError::Status { status: 404 })));
    assert_eq!(Observation::from_result(result).text(), NO_RESULT);
}

#[tokio::test]
async fn weather_missing_fields_read_as_absence() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "current_condition": [] })))
        .mount(&server)
        .await;

    let out = weather(&server).execute("Recife").await.unwrap();
    assert_eq!(out, ToolOutput::Absent);
}

#[tokio::test]
async fn weather_garbage_body_reads_as_absence() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = weather(&server).execute("Recife").await;
    assert!(matches!(result, Err(ToolError::Malformed(_))));
    assert_eq!(Observation::from_result(result).text(), NO_RESULT);
}

#[tokio::test]
async fn search_returns_first_snippet() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("action", "query"))
        .and(query_param("list", "search"))
        .and(query_param("srsearch", "LangChain"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": {
                "searchinfo": { "totalhits": 2 },
                "search": [
                    { "title": "LangChain", "snippet": "<span class=\"searchmatch\">LangChain</span> is a framework" },
                    { "title": "Other", "snippet": "second hit" }
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let out = search(&server).execute("LangChain").await.unwrap();
    assert_eq!(
        out,
        ToolOutput::Text("<span class=\"searchmatch\">LangChain</span> is a framework".into())
    );
}

#[tokio::test]
async fn search_without_hits_is_absent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": { "search": [] }
        })))
        .mount(&server)
        .await;

    let out = search(&server).execute("xyzzy").await.unwrap();
    assert_eq!(out, ToolOutput::Absent);
    assert_eq!(out.to_string(), NO_RESULT);
}

#[tokio::test]
async fn search_server_error_reads_as_absence() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = search(&server).execute("França").await;
    assert!(matches!(result, Err(ToolError::Status { status: 503 })));
    assert_eq!(Observation::from_result(result).text(), NO_RESULT);
}

#[tokio::test]
async fn search_body_without_query_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": "nope" })))
        .mount(&server)
        .await;

    let result = search(&server).execute("França").await;
    assert!(matches!(result, Err(ToolError::Malformed(_))));
}
