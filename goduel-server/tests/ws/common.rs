#![allow(dead_code)]

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use goduel_server::AppState;
use goduel_server::config::Config;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite;

/// A running server on an ephemeral port.
pub struct TestServer {
    pub addr: String,
    pub state: AppState,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Start with a 9x9 board and otherwise default settings.
    pub async fn start() -> Self {
        Self::start_with(Config {
            board_size: 9,
            ..Config::default()
        })
        .await
    }

    pub async fn start_with(config: Config) -> Self {
        let (router, state) = goduel_server::build_router(config);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        tokio::spawn(async move {
            use axum::extract::Request;
            use tower::Layer as _;
            use tower_http::normalize_path::NormalizePathLayer;

            let app = NormalizePathLayer::trim_trailing_slash().layer(router);
            axum::serve(
                listener,
                axum::ServiceExt::<Request>::into_make_service(app),
            )
            .await
            .unwrap();
        });

        TestServer {
            addr,
            state,
            client: reqwest::Client::new(),
        }
    }

    /// Open a WebSocket connection to a match.
    pub async fn ws(&self, match_id: &str) -> WsClient {
        let url = format!("ws://{}/ws/{match_id}", self.addr);
        let (stream, _response) = tokio_tungstenite::connect_async(url)
            .await
            .expect("WebSocket connect failed");

        let (sink, stream) = stream.split();
        WsClient {
            sink,
            stream,
            token: None,
        }
    }

    /// Two sockets on `match_id`, seated Black and White.
    pub async fn seated_pair(&self, match_id: &str) -> (WsClient, WsClient) {
        let mut black = self.ws(match_id).await;
        let mut white = self.ws(match_id).await;
        let seat = black.request_seat("B").await;
        assert_eq!(seat["player"], "B");
        let seat = white.request_seat("W").await;
        assert_eq!(seat["player"], "W");
        (black, white)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("http://{}{path}", self.addr))
            .send()
            .await
            .unwrap()
    }

    pub async fn get_json(&self, path: &str) -> Value {
        let resp = self.get(path).await;
        assert!(resp.status().is_success(), "GET {path}: {}", resp.status());
        resp.json().await.unwrap()
    }

    /// Poll the lobby until `pred` holds for the listing (5s timeout).
    pub async fn wait_for_listing(&self, pred: impl Fn(&[Value]) -> bool) -> Vec<Value> {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        loop {
            let listing = self.get_json("/api/matches").await;
            let rows = listing.as_array().cloned().unwrap_or_default();
            if pred(&rows) {
                return rows;
            }
            assert!(
                tokio::time::Instant::now() < deadline,
                "listing never matched: {rows:?}"
            );
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }
}

type WsStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

/// A WebSocket client wrapping a split tokio-tungstenite connection.
pub struct WsClient {
    sink: futures_util::stream::SplitSink<WsStream, tungstenite::Message>,
    stream: futures_util::stream::SplitStream<WsStream>,
    /// Seat token from the last successful seat request.
    pub token: Option<String>,
}

impl WsClient {
    /// Send a JSON message.
    pub async fn send(&mut self, msg: Value) {
        self.sink
            .send(tungstenite::Message::Text(msg.to_string().into()))
            .await
            .expect("WS send failed");
    }

    /// Send raw text.
    pub async fn send_text(&mut self, text: &str) {
        self.sink
            .send(tungstenite::Message::Text(text.to_string().into()))
            .await
            .expect("WS send failed");
    }

    /// Receive the next text message as JSON (5s timeout).
    pub async fn recv(&mut self) -> Value {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    /// Receive with a custom timeout.
    pub async fn recv_timeout(&mut self, timeout: Duration) -> Value {
        let msg = tokio::time::timeout(timeout, self.stream.next())
            .await
            .expect("WS recv timed out")
            .expect("WS stream ended")
            .expect("WS recv error");

        match msg {
            tungstenite::Message::Text(text) => {
                serde_json::from_str(&text).expect("WS message not valid JSON")
            }
            other => panic!("Expected text WS message, got: {other:?}"),
        }
    }

    /// Assert nothing arrives within `timeout`.
    pub async fn expect_silence(&mut self, timeout: Duration) {
        if let Ok(Some(msg)) = tokio::time::timeout(timeout, self.stream.next()).await {
            panic!("Expected no message, got: {msg:?}");
        }
    }

    // -- Protocol helpers --

    /// Request a seat and remember the granted token.
    pub async fn request_seat(&mut self, color: &str) -> Value {
        self.send(json!({"request": color})).await;
        let reply = self.recv().await;
        if let Some(token) = reply["token"].as_str() {
            self.token = Some(token.to_string());
        }
        reply
    }

    pub async fn request_state(&mut self, payload: Value) -> Value {
        self.send(json!({"requestState": payload})).await;
        self.recv().await
    }

    /// Send a move with this client's own seat token.
    pub async fn play(&mut self, content: &str) {
        let token = self.token.clone().expect("client has no seat");
        self.play_with_token(&token, content).await;
    }

    pub async fn play_with_token(&mut self, token: &str, content: &str) {
        self.send(json!({"token": token, "content": content})).await;
    }

    /// Close the WebSocket connection (simulates browser close / disconnect).
    pub async fn close(self) {
        let mut sink = self.sink;
        let _ = sink.close().await;
    }
}

/// Play `entries` alternately, Black first, and drain both broadcasts.
pub async fn play_sequence(black: &mut WsClient, white: &mut WsClient, entries: &[&str]) {
    for entry in entries {
        if entry.starts_with('B') {
            black.play(entry).await;
        } else {
            white.play(entry).await;
        }
        assert_eq!(black.recv().await, json!({"content": entry}));
        assert_eq!(white.recv().await, json!({"content": entry}));
    }
}
