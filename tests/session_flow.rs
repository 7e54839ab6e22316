//! End-to-end tests for the planning poker WebSocket protocol.
//!
//! These tests bind the real router on an ephemeral port and drive it with
//! WebSocket clients:
//! 1. A full estimation round from creation to history
//! 2. Admin succession and session deletion on disconnect
//! 3. Error replies for rejected and malformed frames

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

use planning_poker::adapters::http::app_router;
use planning_poker::adapters::websocket::{BroadcastGateway, RoomManager, WebSocketState};
use planning_poker::application::{SessionDefaults, SessionEngine, SessionRegistry};

// =============================================================================
// Test Infrastructure
// =============================================================================

async fn spawn_server() -> SocketAddr {
    let room_manager = Arc::new(RoomManager::default());
    let (engine_tx, engine_rx) = mpsc::channel(64);
    let engine = SessionEngine::new(
        SessionRegistry::with_seed(42),
        SessionDefaults::default(),
        BroadcastGateway::new(room_manager.clone()),
    );
    tokio::spawn(engine.run(engine_rx));

    let app = app_router(WebSocketState::new(room_manager, engine_tx), &[]);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

struct Client {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
    id: String,
}

impl Client {
    async fn connect(addr: SocketAddr) -> Self {
        let (ws, _) = connect_async(format!("ws://{}/ws", addr)).await.unwrap();
        let mut client = Client {
            ws,
            id: String::new(),
        };
        let hello = client.expect("connected").await;
        client.id = hello["clientId"].as_str().unwrap().to_string();
        client
    }

    async fn send(&mut self, frame: Value) {
        self.send_raw(&frame.to_string()).await;
    }

    async fn send_raw(&mut self, text: &str) {
        self.ws.send(Message::Text(text.into())).await.unwrap();
    }

    async fn recv(&mut self) -> Value {
        loop {
            let frame = timeout(Duration::from_secs(5), self.ws.next())
                .await
                .expect("timed out waiting for a message")
                .expect("connection closed")
                .unwrap();
            if let Message::Text(text) = frame {
                return serde_json::from_str(text.as_str()).unwrap();
            }
        }
    }

    async fn expect(&mut self, message_type: &str) -> Value {
        let msg = self.recv().await;
        assert_eq!(msg["type"], message_type, "unexpected message: {}", msg);
        msg
    }

    async fn expect_silence(&mut self) {
        let next = timeout(Duration::from_millis(200), self.ws.next()).await;
        assert!(next.is_err(), "unexpected message: {:?}", next);
    }

    /// Close and wait until the server drops the connection.
    async fn close(mut self) {
        self.ws.close(None).await.unwrap();
        while let Ok(Some(Ok(_))) = timeout(Duration::from_secs(5), self.ws.next()).await {}
    }
}

fn names(players: &Value) -> Vec<&str> {
    players
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect()
}

/// Alice creates "S1", Bob joins. Returns both clients and the code.
async fn alice_and_bob(addr: SocketAddr) -> (Client, Client, String) {
    let mut alice = Client::connect(addr).await;
    alice
        .send(json!({"type": "createSession", "playerName": "Alice", "sessionName": "S1"}))
        .await;
    let created = alice.expect("sessionCreated").await;
    let code = created["sessionCode"].as_str().unwrap().to_string();

    let mut bob = Client::connect(addr).await;
    bob.send(json!({"type": "joinSession", "sessionCode": code, "playerName": "Bob"}))
        .await;
    bob.expect("sessionJoined").await;
    alice.expect("playerJoined").await;

    (alice, bob, code)
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn full_round_from_creation_to_history() {
    let addr = spawn_server().await;

    let mut alice = Client::connect(addr).await;
    alice
        .send(json!({"type": "createSession", "playerName": "Alice", "sessionName": "S1"}))
        .await;
    let created = alice.expect("sessionCreated").await;
    let code = created["sessionCode"].as_str().unwrap().to_string();
    assert_eq!(code.len(), 5);
    assert!(code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    assert_eq!(created["isAdmin"], true);
    assert_eq!(created["adminId"], alice.id.as_str());
    assert_eq!(created["sessionName"], "S1");
    assert_eq!(created["phase"], "idle");

    let mut bob = Client::connect(addr).await;
    bob.send(json!({"type": "joinSession", "sessionCode": code.to_lowercase(), "playerName": "Bob"}))
        .await;
    let joined = bob.expect("sessionJoined").await;
    assert_eq!(joined["isAdmin"], false);
    assert_eq!(names(&joined["players"]), vec!["Alice", "Bob"]);
    let roster = alice.expect("playerJoined").await;
    assert_eq!(names(&roster["players"]), vec!["Alice", "Bob"]);

    alice
        .send(json!({"type": "startEstimation", "sessionCode": code, "storyName": "Login bug"}))
        .await;
    for client in [&mut alice, &mut bob] {
        let started = client.expect("estimationStarted").await;
        assert_eq!(started["currentStory"], "Login bug");
    }

    bob.send(json!({"type": "submitVote", "sessionCode": code, "vote": "5"}))
        .await;
    for client in [&mut alice, &mut bob] {
        let update = client.expect("voteSubmitted").await;
        assert_eq!(update["players"][1]["hasVoted"], true);
        assert!(update["players"][1].get("vote").is_none());
    }

    alice
        .send(json!({"type": "submitVote", "sessionCode": code, "vote": "8"}))
        .await;
    alice.expect("voteSubmitted").await;
    bob.expect("voteSubmitted").await;

    alice
        .send(json!({"type": "revealCards", "sessionCode": code}))
        .await;
    for client in [&mut alice, &mut bob] {
        let revealed = client.expect("cardsRevealed").await;
        assert_eq!(revealed["average"], 6.5);
        assert_eq!(revealed["players"][0]["vote"], "8");
        assert_eq!(revealed["players"][1]["vote"], "5");
    }

    alice
        .send(json!({"type": "estimateAgain", "sessionCode": code}))
        .await;
    for client in [&mut alice, &mut bob] {
        let history = client.expect("historyUpdated").await;
        let entries = history["history"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["storyName"], "Login bug");
        assert_eq!(entries[0]["average"], 6.5);
        assert_eq!(
            entries[0]["votes"],
            json!([
                {"playerName": "Alice", "vote": "8"},
                {"playerName": "Bob", "vote": "5"},
            ])
        );

        let reset = client.expect("estimationReset").await;
        assert!(reset["players"]
            .as_array()
            .unwrap()
            .iter()
            .all(|p| p["hasVoted"] == false));
    }
}

#[tokio::test]
async fn vote_after_reveal_rebroadcasts_average() {
    let addr = spawn_server().await;
    let (mut alice, mut bob, code) = alice_and_bob(addr).await;

    alice
        .send(json!({"type": "startEstimation", "sessionCode": code}))
        .await;
    let started = alice.expect("estimationStarted").await;
    assert_eq!(started["currentStory"], "Untitled Story");
    bob.expect("estimationStarted").await;

    bob.send(json!({"type": "submitVote", "sessionCode": code, "vote": "3"}))
        .await;
    alice.expect("voteSubmitted").await;
    bob.expect("voteSubmitted").await;

    alice
        .send(json!({"type": "revealCards", "sessionCode": code}))
        .await;
    assert_eq!(alice.expect("cardsRevealed").await["average"], 3.0);
    bob.expect("cardsRevealed").await;

    alice
        .send(json!({"type": "submitVote", "sessionCode": code, "vote": "XS"}))
        .await;
    assert_eq!(alice.expect("cardsRevealed").await["average"], 3.0);
    let update = bob.expect("cardsRevealed").await;
    assert_eq!(update["players"][0]["vote"], "XS");
}

#[tokio::test]
async fn admin_disconnect_promotes_next_player() {
    let addr = spawn_server().await;
    let (alice, mut bob, _code) = alice_and_bob(addr).await;

    alice.close().await;

    let promoted = bob.expect("newAdmin").await;
    assert_eq!(promoted["adminId"], bob.id.as_str());
    let left = bob.expect("playerLeft").await;
    assert_eq!(names(&left["players"]), vec!["Bob"]);
    assert_eq!(left["players"][0]["isAdmin"], true);
}

#[tokio::test]
async fn last_player_leaving_deletes_session() {
    let addr = spawn_server().await;

    let mut alice = Client::connect(addr).await;
    alice
        .send(json!({"type": "createSession", "playerName": "Alice"}))
        .await;
    let created = alice.expect("sessionCreated").await;
    assert_eq!(created["sessionName"], "Planning Session");
    let code = created["sessionCode"].as_str().unwrap().to_string();
    alice.close().await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    let mut bob = Client::connect(addr).await;
    bob.send(json!({"type": "joinSession", "sessionCode": code, "playerName": "Bob"}))
        .await;
    let error = bob.expect("error").await;
    assert_eq!(error["code"], "SESSION_NOT_FOUND");
}

#[tokio::test]
async fn rejected_commands_reach_only_the_caller() {
    let addr = spawn_server().await;
    let (mut alice, mut bob, code) = alice_and_bob(addr).await;

    bob.send(json!({"type": "revealCards", "sessionCode": code}))
        .await;
    assert_eq!(bob.expect("error").await["code"], "FORBIDDEN");

    bob.send(json!({"type": "submitVote", "sessionCode": code, "vote": "5"}))
        .await;
    assert_eq!(bob.expect("error").await["code"], "INVALID_PHASE");

    let mut carol = Client::connect(addr).await;
    carol
        .send(json!({"type": "joinSession", "sessionCode": code, "playerName": "Bob"}))
        .await;
    assert_eq!(carol.expect("error").await["code"], "DUPLICATE_NAME");

    alice
        .send(json!({"type": "updateCardValues", "sessionCode": code, "cardValues": []}))
        .await;
    assert_eq!(alice.expect("error").await["code"], "INVALID_CONFIG");

    alice.expect_silence().await;
    bob.expect_silence().await;
}

#[tokio::test]
async fn card_values_update_reaches_room() {
    let addr = spawn_server().await;
    let (mut alice, mut bob, code) = alice_and_bob(addr).await;

    alice
        .send(json!({"type": "updateCardValues", "sessionCode": code, "preset": "tshirt"}))
        .await;

    for client in [&mut alice, &mut bob] {
        let update = client.expect("cardValuesUpdated").await;
        assert_eq!(
            update["cardValues"],
            json!(["XS", "S", "M", "L", "XL", "XXL"])
        );
    }
}

#[tokio::test]
async fn malformed_frames_get_bad_request() {
    let addr = spawn_server().await;
    let mut client = Client::connect(addr).await;

    client.send_raw("not json").await;
    assert_eq!(client.expect("error").await["code"], "BAD_REQUEST");

    client.send(json!({"type": "teleport"})).await;
    assert_eq!(client.expect("error").await["code"], "BAD_REQUEST");

    client.send(json!({"type": "ping"})).await;
    client.expect("pong").await;
}
