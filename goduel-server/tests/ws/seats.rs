use serde_json::json;
use tokio_tungstenite::tungstenite;

use crate::common::TestServer;

#[tokio::test]
async fn first_request_gets_requested_seat() {
    let server = TestServer::start().await;
    let mut client = server.ws("seat-a").await;

    let reply = client.request_seat("W").await;
    assert_eq!(reply["player"], "W");
    let token = reply["token"].as_str().unwrap();
    assert_eq!(token.len(), 22);
}

#[tokio::test]
async fn taken_seat_autoswaps() {
    let server = TestServer::start().await;
    let mut first = server.ws("seat-b").await;
    let mut second = server.ws("seat-b").await;

    let a = first.request_seat("B").await;
    let b = second.request_seat("B").await;
    assert_eq!(a["player"], "B");
    assert_eq!(b["player"], "W");
    assert_ne!(a["token"], b["token"]);
}

#[tokio::test]
async fn request_after_start_gets_empty_object() {
    let server = TestServer::start().await;
    let (_black, _white) = server.seated_pair("seat-c").await;

    let mut third = server.ws("seat-c").await;
    assert_eq!(third.request_seat("B").await, json!({}));
    assert!(third.token.is_none());
}

#[tokio::test]
async fn sessions_are_independent() {
    let server = TestServer::start().await;
    let mut a = server.ws("seat-d1").await;
    let mut b = server.ws("seat-d2").await;

    assert_eq!(a.request_seat("B").await["player"], "B");
    assert_eq!(b.request_seat("B").await["player"], "B");
}

#[tokio::test]
async fn seat_released_when_socket_closes_before_start() {
    let server = TestServer::start().await;
    let mut first = server.ws("seat-e").await;
    let old = first.request_seat("B").await;
    server
        .wait_for_listing(|rows| rows.iter().any(|r| r["matchId"] == "seat-e"))
        .await;

    first.close().await;
    server
        .wait_for_listing(|rows| rows.iter().all(|r| r["matchId"] != "seat-e"))
        .await;

    let mut second = server.ws("seat-e").await;
    let new = second.request_seat("B").await;
    assert_eq!(new["player"], "B");
    assert_ne!(new["token"], old["token"]);
}

#[tokio::test]
async fn offline_match_is_refused() {
    let server = TestServer::start().await;
    let url = format!("ws://{}/ws/offline", server.addr);

    match tokio_tungstenite::connect_async(url).await {
        Err(tungstenite::Error::Http(resp)) => assert_eq!(resp.status(), 400),
        Err(other) => panic!("unexpected error: {other:?}"),
        Ok(_) => panic!("offline match should be refused"),
    }
}
