use serde_json::json;

use crate::common::{TestServer, play_sequence};

#[tokio::test]
async fn state_of_new_match_is_empty() {
    let server = TestServer::start().await;
    let mut client = server.ws("rs-a").await;
    assert_eq!(client.request_state(json!(null)).await, json!({"state": []}));
}

#[tokio::test]
async fn state_replays_transcript_in_order() {
    let server = TestServer::start().await;
    let (mut black, mut white) = server.seated_pair("rs-b").await;
    play_sequence(&mut black, &mut white, &["B 2 2", "W 6 6", "B pass", "W 3 3"]).await;

    let mut watcher = server.ws("rs-b").await;
    assert_eq!(
        watcher.request_state(json!(true)).await,
        json!({"state": ["B 2 2", "W 6 6", "B pass", "W 3 3"]})
    );

    // Idempotent.
    assert_eq!(
        watcher.request_state(json!(true)).await,
        json!({"state": ["B 2 2", "W 6 6", "B pass", "W 3 3"]})
    );
}

#[tokio::test]
async fn reconnected_player_continues_with_token() {
    let server = TestServer::start().await;
    let (mut black, mut white) = server.seated_pair("rs-c").await;
    play_sequence(&mut black, &mut white, &["B 4 4", "W 2 2"]).await;

    let token = black.token.clone().unwrap();
    black.close().await;

    let mut black = server.ws("rs-c").await;
    let state = black.request_state(json!(token)).await;
    assert_eq!(state, json!({"state": ["B 4 4", "W 2 2"]}));

    black.play_with_token(&token, "B 5 5").await;
    assert_eq!(black.recv().await, json!({"content": "B 5 5"}));
    assert_eq!(white.recv().await, json!({"content": "B 5 5"}));
}

#[tokio::test]
async fn state_of_finished_game_includes_resignation() {
    let server = TestServer::start().await;
    let (mut black, mut white) = server.seated_pair("rs-d").await;
    play_sequence(&mut black, &mut white, &["B 4 4"]).await;

    white.play("W resign").await;
    black.recv().await;
    black.recv().await;

    assert_eq!(
        black.request_state(json!(null)).await,
        json!({"state": ["B 4 4", "W resign"]})
    );
}
