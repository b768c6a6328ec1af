//! Vendor adapter specifications against stubbed HTTP endpoints.

use rankgap::workflows::gap::{
    AhrefsProvider, DataForSeoProvider, GapKeywordProvider, GapKeywordRequest, ProviderError,
    ProviderKind,
};
use serde_json::json;
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request() -> GapKeywordRequest {
    GapKeywordRequest {
        location_code: 2840,
        language_name: "English".to_string(),
        limit: 200,
        provider: ProviderKind::Dataforseo,
    }
}

#[tokio::test]
async fn dataforseo_payloads_map_to_gap_keywords() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3/dataforseo_labs/google/domain_intersection/live"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tasks": [{
                "result": [{
                    "total_count": 2,
                    "items": [
                        {
                            "keyword_data": {
                                "keyword": "comfort sandals",
                                "keyword_info": { "search_volume": 900, "cpc": 1.1 },
                                "keyword_properties": { "keyword_difficulty": 31.0 }
                            },
                            "first_domain_serp_element": { "rank_absolute": 5 }
                        },
                        {
                            "keyword_data": {
                                "keyword": "recovery slides",
                                "keyword_info": {}
                            }
                        }
                    ]
                }]
            }]
        })))
        .mount(&server)
        .await;

    let provider = DataForSeoProvider::with_base_url(
        server.uri(),
        "login".to_string(),
        "password".to_string(),
    );
    let response = provider
        .gap_keywords("stridewell.com", "hoka.com", &request())
        .await
        .expect("parsed response");

    assert_eq!(response.brand_domain, "stridewell.com");
    assert_eq!(response.competitor_domain, "hoka.com");
    assert_eq!(response.total_count, 2);
    assert_eq!(response.gap_keywords.len(), 2);

    let first = &response.gap_keywords[0];
    assert_eq!(first.keyword, "comfort sandals");
    assert_eq!(first.search_volume, 900);
    assert_eq!(first.competitor_position, Some(5));
    assert_eq!(first.cpc, Some(1.1));
    assert_eq!(first.difficulty, Some(31.0));

    let second = &response.gap_keywords[1];
    assert_eq!(second.search_volume, 0);
    assert_eq!(second.competitor_position, None);
    assert_eq!(second.cpc, None);
}

#[tokio::test]
async fn dataforseo_non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3/dataforseo_labs/google/domain_intersection/live"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let provider =
        DataForSeoProvider::with_base_url(server.uri(), "login".to_string(), "pw".to_string());
    let error = provider
        .gap_keywords("stridewell.com", "hoka.com", &request())
        .await
        .expect_err("status error");

    assert!(matches!(error, ProviderError::Status { status: 502 }));
}

#[tokio::test]
async fn dataforseo_empty_task_list_is_a_payload_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3/dataforseo_labs/google/domain_intersection/live"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tasks": [] })))
        .mount(&server)
        .await;

    let provider =
        DataForSeoProvider::with_base_url(server.uri(), "login".to_string(), "pw".to_string());
    let error = provider
        .gap_keywords("stridewell.com", "hoka.com", &request())
        .await
        .expect_err("payload error");

    assert!(matches!(error, ProviderError::Payload(_)));
}

#[tokio::test]
async fn ahrefs_payloads_map_to_gap_keywords() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/site-explorer/content-gap"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 1,
            "keywords": [
                {
                    "keyword": "orthopedic slides",
                    "volume": 1900,
                    "position": 9,
                    "cpc": 1.3,
                    "difficulty": 33.0
                }
            ]
        })))
        .mount(&server)
        .await;

    let provider = AhrefsProvider::with_base_url(server.uri(), "token".to_string());
    let response = provider
        .gap_keywords("stridewell.com", "oofos.com", &request())
        .await
        .expect("parsed response");

    assert_eq!(response.total_count, 1);
    assert_eq!(response.gap_keywords[0].keyword, "orthopedic slides");
    assert_eq!(response.gap_keywords[0].search_volume, 1900);
    assert_eq!(response.gap_keywords[0].competitor_position, Some(9));
}
