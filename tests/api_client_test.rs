//! REST client against an in-process casino API

use atomiq_verify::api::{verify_transaction, BetRequest, CasinoApiClient};
use atomiq_verify::config::ApiClientConfig;
use atomiq_verify::errors::{AtomiqError, ClientError};
use atomiq_verify::{CoinChoice, OverallStatus, VrfVerifier};
use axum::{
    extract::Query,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;

const HEADS_OUTPUT: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=";

fn bet_json(tx_hash: &str, result: &str) -> Value {
    json!({
        "tx_hash": tx_hash,
        "block": 77,
        "amount_wagered": 1_000_000_000u64,
        "won": true,
        "result": result,
        "payout": 2_000_000_000u64,
        "timestamp": 1_700_000_000u64,
        "game_type": "coin_flip",
        "vrf_proof": "c2lnbmF0dXJl",
        "vrf_output": HEADS_OUTPUT
    })
}

async fn bets(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let limit: u64 = params.get("limit").and_then(|v| v.parse().ok()).unwrap_or(0);
    let offset: u64 = params.get("offset").and_then(|v| v.parse().ok()).unwrap_or(0);
    let mut bets = vec![bet_json("tx-good", "heads"), bet_json("tx-forged", "tails")];
    if let Some(wallet) = params.get("wallet") {
        bets.push(bet_json(&format!("wallet-{}", wallet), "heads"));
    }
    Json(json!({
        "bets": bets,
        "total_count": 2,
        "has_more": false,
        "page": offset,
        "per_page": limit
    }))
}

fn casino_router() -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route(
            "/v1/stats",
            get(|| async {
                Json(json!({
                    "current_block": 1234,
                    "total_bets": 56,
                    "total_wagered": 7_500_000_000u64,
                    "total_won": 7_000_000_000u64,
                    "gross_rtp": 93.3,
                    "house_edge": 6.7
                }))
            }),
        )
        .route("/v1/bets", get(bets))
        .route(
            "/v1/bet",
            post(|Json(request): Json<Value>| async move {
                Json(json!({
                    "tx_hash": format!("tx-{}", request["nonce"]),
                    "height": 78,
                    "result": request["choice"],
                    "won": true,
                    "payout": 2_000u64,
                    "net_result": 1_000,
                    "game_type": request["game_type"],
                    "vrf_proof": "c2lnbmF0dXJl",
                    "vrf_output": HEADS_OUTPUT,
                    "vrf_public_key": "cHVibGlj"
                }))
            }),
        )
}

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client_for(base_url: &str) -> CasinoApiClient {
    CasinoApiClient::new(&ApiClientConfig {
        base_url: format!("{}/", base_url),
        request_timeout_secs: 5,
        lookup_window: 50,
    })
    .unwrap()
}

#[tokio::test]
async fn test_health_and_stats() {
    let client = client_for(&spawn(casino_router()).await);

    assert_eq!(client.health_check().await.unwrap(), "OK");

    let stats = client.get_stats().await.unwrap();
    assert_eq!(stats.current_block, 1234);
    assert_eq!(stats.total_bets, 56);
    assert_eq!(stats.gross_rtp, 93.3);
}

#[tokio::test]
async fn test_get_bets_sends_query() {
    let client = client_for(&spawn(casino_router()).await);

    let page = client.get_bets(20, 40, None).await.unwrap();
    assert_eq!(page.per_page, 20);
    assert_eq!(page.page, 40);
    assert_eq!(page.bets.len(), 2);

    let page = client.get_bets(10, 0, Some("abc")).await.unwrap();
    assert!(page.bets.iter().any(|bet| bet.tx_hash == "wallet-abc"));
}

#[tokio::test]
async fn test_verify_transaction_through_api() {
    let client = client_for(&spawn(casino_router()).await);
    let verifier = VrfVerifier::new();

    let (bet, verdict) = verify_transaction(&client, &verifier, "tx-good").await.unwrap();
    assert_eq!(bet.block, 77);
    assert_eq!(verdict.overall_status, OverallStatus::Verified);

    let (_, verdict) = verify_transaction(&client, &verifier, "tx-forged").await.unwrap();
    assert_eq!(verdict.overall_status, OverallStatus::Failed);
    assert_eq!(verdict.message, "Result mismatch: Expected tails, calculated heads");

    let err = verify_transaction(&client, &verifier, "tx-unknown").await.unwrap_err();
    assert!(matches!(err, AtomiqError::Client(ClientError::NotFound { .. })));
}

#[tokio::test]
async fn test_place_bet() {
    let client = client_for(&spawn(casino_router()).await);

    let response = client
        .place_bet(&BetRequest::coin_flip("wallet-1", 1_000, 42, CoinChoice::Heads))
        .await
        .unwrap();
    assert_eq!(response.tx_hash, "tx-42");
    assert_eq!(response.result, "heads");
    assert_eq!(response.game_type, "coin_flip");

    let verdict = VrfVerifier::new().verify(&(&response).into()).unwrap();
    assert_eq!(verdict.overall_status, OverallStatus::Verified);
}

#[tokio::test]
async fn test_rate_limit_is_reported() {
    let app = Router::new().route(
        "/v1/stats",
        get(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
    );
    let client = client_for(&spawn(app).await);

    let err = client.get_stats().await.unwrap_err();
    assert!(matches!(err, ClientError::RateLimited));
    assert_eq!(err.status(), Some(429));
}

#[tokio::test]
async fn test_http_errors_use_body_or_status_line() {
    let app = Router::new()
        .route(
            "/v1/stats",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "database offline") }),
        )
        .route(
            "/v1/bets",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
    let client = client_for(&spawn(app).await);

    match client.get_stats().await.unwrap_err() {
        ClientError::Http { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "database offline");
        }
        other => panic!("expected HTTP error, got {:?}", other),
    }

    let err = client.get_bets(20, 0, None).await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let app = Router::new().route("/v1/stats", get(|| async { "not json" }));
    let client = client_for(&spawn(app).await);

    assert!(matches!(
        client.get_stats().await.unwrap_err(),
        ClientError::Decode(_)
    ));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{}", addr));
    let err = client.get_stats().await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
    assert_eq!(
        err.to_string(),
        "Network error: Unable to connect to the API server"
    );
}
