use std::time::Duration;

use serde_json::json;

use crate::common::{TestServer, play_sequence};

#[tokio::test]
async fn legal_move_is_broadcast_to_both() {
    let server = TestServer::start().await;
    let (mut black, mut white) = server.seated_pair("mv-a").await;

    black.play("B 3 3").await;
    assert_eq!(black.recv().await, json!({"content": "B 3 3"}));
    assert_eq!(white.recv().await, json!({"content": "B 3 3"}));

    white.play("W 4 4").await;
    assert_eq!(black.recv().await, json!({"content": "W 4 4"}));
    assert_eq!(white.recv().await, json!({"content": "W 4 4"}));
}

#[tokio::test]
async fn wrong_token_is_rejected_to_sender_only() {
    let server = TestServer::start().await;
    let (mut black, mut white) = server.seated_pair("mv-b").await;
    let white_token = white.token.clone().unwrap();

    black.play_with_token(&white_token, "B 3 3").await;
    assert_eq!(
        black.recv().await,
        json!({"error": "invalid token", "content": "B 3 3"})
    );
    white.expect_silence(Duration::from_millis(200)).await;

    let summary = server.get_json("/api/matches/mv-b").await;
    assert_eq!(summary["moves"], json!([]));
}

#[tokio::test]
async fn out_of_turn_is_rejected() {
    let server = TestServer::start().await;
    let (mut black, mut white) = server.seated_pair("mv-c").await;

    white.play("W 3 3").await;
    assert_eq!(
        white.recv().await,
        json!({"error": "out of turn", "content": "W 3 3"})
    );
    black.expect_silence(Duration::from_millis(200)).await;
}

#[tokio::test]
async fn move_before_start_is_rejected() {
    let server = TestServer::start().await;
    let mut black = server.ws("mv-d").await;
    black.request_seat("B").await;

    black.play("B 3 3").await;
    assert_eq!(
        black.recv().await,
        json!({"error": "not started", "content": "B 3 3"})
    );
}

#[tokio::test]
async fn illegal_moves_report_reason() {
    let server = TestServer::start().await;
    let (mut black, mut white) = server.seated_pair("mv-e").await;
    play_sequence(&mut black, &mut white, &["B 1 0", "W 5 5", "B 0 1"]).await;

    // Occupied point.
    white.play("W 1 0").await;
    assert_eq!(
        white.recv().await,
        json!({"error": "occupied", "content": "W 1 0"})
    );

    // White has no liberty in the corner.
    white.play("W 0 0").await;
    assert_eq!(
        white.recv().await,
        json!({"error": "no self capture", "content": "W 0 0"})
    );

    // Off the 9x9 board.
    white.play("W 9 0").await;
    assert_eq!(white.recv().await["error"], "not on board");

    black.expect_silence(Duration::from_millis(200)).await;

    // Still White's turn.
    white.play("W 6 6").await;
    assert_eq!(black.recv().await, json!({"content": "W 6 6"}));
}

#[tokio::test]
async fn malformed_entries_are_rejected() {
    let server = TestServer::start().await;
    let (mut black, _white) = server.seated_pair("mv-f").await;

    black.play("B three 3").await;
    let reply = black.recv().await;
    assert!(reply["error"].as_str().unwrap().starts_with("invalid entry"));

    black.send_text("{not json").await;
    let reply = black.recv().await;
    assert!(reply["error"].as_str().unwrap().starts_with("malformed message"));
}

#[tokio::test]
async fn capture_credits_black() {
    let server = TestServer::start().await;
    let (mut black, mut white) = server.seated_pair("mv-g").await;

    play_sequence(
        &mut black,
        &mut white,
        &[
            "B 0 0", "W 1 0", "B 0 1", "W 1 1", "B 2 0", "W 5 5", "B 2 1", "W 6 6", "B 1 2",
        ],
    )
    .await;

    // The captured points are playable again.
    white.play("W 1 0").await;
    assert_eq!(white.recv().await, json!({"content": "W 1 0"}));

    let session = server.state.registry.get("mv-g").await.unwrap();
    let session = session.lock().await;
    assert_eq!(session.engine().prisoners(goduel_engine::Stone::Black), 2);
}

#[tokio::test]
async fn resignation_broadcasts_result() {
    let server = TestServer::start().await;
    let (mut black, mut white) = server.seated_pair("mv-h").await;

    black.play("B resign").await;
    for client in [&mut black, &mut white] {
        assert_eq!(client.recv().await, json!({"content": "B resign"}));
        assert_eq!(
            client.recv().await,
            json!({"result": "White wins by resignation"})
        );
    }

    white.play("W 0 0").await;
    assert_eq!(
        white.recv().await,
        json!({"error": "game over", "content": "W 0 0"})
    );
}

#[tokio::test]
async fn timeout_broadcasts_result() {
    let server = TestServer::start().await;
    let (mut black, mut white) = server.seated_pair("mv-i").await;
    play_sequence(&mut black, &mut white, &["B 4 4"]).await;

    white.play("W timeout").await;
    assert_eq!(black.recv().await, json!({"content": "W timeout"}));
    assert_eq!(black.recv().await, json!({"result": "Black wins by time"}));
}

#[tokio::test]
async fn double_pass_scores_the_board() {
    let server = TestServer::start().await;
    let (mut black, mut white) = server.seated_pair("mv-j").await;
    play_sequence(&mut black, &mut white, &["B pass"]).await;

    white.play("W pass").await;
    assert_eq!(black.recv().await, json!({"content": "W pass"}));
    // Empty board: nobody owns anything, White has komi.
    assert_eq!(black.recv().await, json!({"result": "White wins, 6.5 to 0"}));

    let summary = server.get_json("/api/matches/mv-j").await;
    assert_eq!(summary["finished"], true);
    assert_eq!(summary["result"], "White wins, 6.5 to 0");
}
