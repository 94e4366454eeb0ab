//! HTTP contract tests for the NASA Images API client

use deck::{DeckError, ImageSearch, NasaImageClient, NasaSettings};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> NasaImageClient {
    let settings = NasaSettings { base_url: server.uri(), ..Default::default() };
    NasaImageClient::new(&settings).unwrap()
}

fn item(id: &str) -> serde_json::Value {
    json!({
        "data": [{
            "nasa_id": id,
            "title": format!("{id} title"),
            "description": "Taken by Cassini",
            "date_created": "2004-06-30T00:00:00Z",
            "center": "JPL",
            "keywords": ["Saturn", "rings"]
        }],
        "links": [{ "rel": "preview", "href": format!("https://images-assets.nasa.gov/image/{id}/{id}~thumb.jpg") }]
    })
}

#[tokio::test]
async fn search_sends_archive_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Saturn rings"))
        .and(query_param("media_type", "image"))
        .and(query_param("year_start", "1960"))
        .and(query_param("year_end", "2026"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collection": { "items": [item("PIA1"), item("PIA2"), item("PIA3")] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let images = client_for(&server).search("Saturn rings", 2).await.unwrap();

    assert_eq!(images.len(), 2);
    assert_eq!(images[0].nasa_id, "PIA1");
    assert_eq!(images[0].center, "JPL");
    assert_eq!(
        images[1].thumbnail_url.as_deref(),
        Some("https://images-assets.nasa.gov/image/PIA2/PIA2~thumb.jpg")
    );
}

#[tokio::test]
async fn search_reports_http_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server).search("Mars", 8).await.unwrap_err();
    assert!(matches!(err, DeckError::Search(_)));
}

#[tokio::test]
async fn variants_list_asset_urls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/asset/PIA1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collection": { "items": [
                { "href": "https://images-assets.nasa.gov/image/PIA1/PIA1~orig.jpg" },
                { "href": "" },
                { "href": "https://images-assets.nasa.gov/image/PIA1/PIA1~small.jpg" }
            ]}
        })))
        .mount(&server)
        .await;

    let urls = client_for(&server).image_variants("PIA1").await;

    assert_eq!(
        urls,
        vec![
            "https://images-assets.nasa.gov/image/PIA1/PIA1~orig.jpg",
            "https://images-assets.nasa.gov/image/PIA1/PIA1~small.jpg",
        ]
    );
}

#[tokio::test]
async fn variants_are_empty_on_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/asset/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert!(client_for(&server).image_variants("missing").await.is_empty());
}
