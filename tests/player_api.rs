use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};

use reqwest::StatusCode;

use pl_dashboard::player::{Player, PlayerFilters, summarize};
use pl_dashboard::player_api::{
    PlayerApi, PlayerClient, PlayerEndpoints, error_message, parse_player_json,
    parse_players_json,
};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

/// Answers exactly one request on a local port and hands back what was received.
fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local port");
    let base = format!("http://{}/api/v1", listener.local_addr().expect("local addr"));
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept connection");
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
        let mut request = String::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).expect("read header line");
            if let Some((name, value)) = line.split_once(':')
                && name.eq_ignore_ascii_case("content-length")
            {
                content_length = value.trim().parse().expect("numeric content length");
            }
            request.push_str(&line);
            if line == "\r\n" || line.is_empty() {
                break;
            }
        }
        let mut payload = vec![0; content_length];
        reader.read_exact(&mut payload).expect("read request body");
        request.push_str(&String::from_utf8_lossy(&payload));
        stream.write_all(response.as_bytes()).expect("write response");
        request
    });
    (base, handle)
}

fn rodri_draft() -> Player {
    Player {
        player: "Rodri".to_string(),
        team: "Manchester City".to_string(),
        number: 16,
        nation: "ESP".to_string(),
        position: "MF".to_string(),
        age: 27,
        date: "2024-05-19".to_string(),
        ..Player::default()
    }
}

fn endpoints() -> PlayerEndpoints {
    PlayerEndpoints::new("http://localhost:8080/api/v1").expect("valid base url")
}

#[test]
fn list_url_without_filters_has_no_query() {
    let url = endpoints()
        .list_url(&PlayerFilters::default())
        .expect("url should build");
    assert_eq!(url.as_str(), "http://localhost:8080/api/v1/player");
}

#[test]
fn list_url_skips_blank_filters() {
    let filters = PlayerFilters {
        team: Some("Arsenal".to_string()),
        name: Some("   ".to_string()),
        position: None,
        nation: Some(String::new()),
    };
    let url = endpoints().list_url(&filters).expect("url should build");
    assert_eq!(url.as_str(), "http://localhost:8080/api/v1/player?team=Arsenal");
}

#[test]
fn list_url_encodes_every_dimension_in_order() {
    let filters = PlayerFilters {
        team: Some("Manchester City".to_string()),
        name: Some("de Bruyne".to_string()),
        position: Some("MF".to_string()),
        nation: Some("BEL".to_string()),
    };
    let url = endpoints().list_url(&filters).expect("url should build");
    assert_eq!(
        url.query(),
        Some("team=Manchester+City&name=de+Bruyne&position=MF&nation=BEL")
    );
}

#[test]
fn delete_url_encodes_name_as_one_segment() {
    let url = endpoints()
        .delete_url("Bukayo Saka")
        .expect("url should build");
    assert_eq!(
        url.as_str(),
        "http://localhost:8080/api/v1/player/Bukayo%20Saka"
    );

    let url = endpoints().delete_url("A/B").expect("url should build");
    assert_eq!(url.as_str(), "http://localhost:8080/api/v1/player/A%2FB");
}

#[test]
fn trailing_slash_base_does_not_double_up() {
    let endpoints = PlayerEndpoints::new("http://localhost:8080/api/v1/").expect("valid base url");
    let url = endpoints.collection_url().expect("url should build");
    assert_eq!(url.as_str(), "http://localhost:8080/api/v1/player");
}

#[test]
fn rejects_invalid_base_url() {
    assert!(PlayerEndpoints::new("not a url").is_err());
    assert!(PlayerEndpoints::new("mailto:someone@example.com").is_err());
}

#[test]
fn parses_players_fixture() {
    let raw = read_fixture("players.json");
    let players = parse_players_json(&raw).expect("fixture should parse");
    assert_eq!(players.len(), 3);

    let saka = &players[0];
    assert_eq!(saka.id, Some(7));
    assert_eq!(saka.player, "Bukayo Saka");
    assert_eq!(saka.age, 22);
    assert_eq!(saka.penalty_shoot_on_goal, 5);
    assert!((saka.pass_completion - 78.9).abs() < 1e-9);

    let alisson = &players[1];
    assert_eq!(alisson.age, 31);
    assert_eq!(alisson.penalty_shoot, 0);

    let rodri = &players[2];
    assert_eq!(rodri.age, 27);
    assert_eq!(rodri.touches, 0);
}

#[test]
fn fixture_summary_totals() {
    let players = parse_players_json(&read_fixture("players.json")).expect("fixture should parse");
    let summary = summarize(&players);
    assert_eq!(summary.total_players, 3);
    assert_eq!(summary.total_goals, 24);
    assert_eq!(summary.total_assists, 18);
    assert!((summary.avg_xg - 6.3).abs() < 1e-9);
}

#[test]
fn players_null_is_empty() {
    assert!(parse_players_json("null").expect("null should parse").is_empty());
    assert!(parse_players_json("  ").expect("blank should parse").is_empty());
}

#[test]
fn empty_update_body_is_not_found() {
    let err = parse_player_json("").expect_err("empty body should fail");
    assert_eq!(err.to_string(), "player not found");
}

#[test]
fn serializes_camel_case_without_missing_id() {
    let player = Player {
        player: "Rodri".to_string(),
        shot_creating_actions: 80,
        ..Player::default()
    };
    let value = serde_json::to_value(&player).expect("player should serialize");
    assert!(value.get("id").is_none());
    assert_eq!(value["shotCreatingActions"], 80);
    assert_eq!(value["player"], "Rodri");
}

#[test]
fn error_message_prefers_backend_message() {
    let msg = error_message(
        StatusCode::CONFLICT,
        r#"{"message":"Player already exists"}"#,
    );
    assert_eq!(msg, "Player already exists");

    let msg = error_message(StatusCode::BAD_REQUEST, r#"{"error":"Bad Request"}"#);
    assert_eq!(msg, "Bad Request");
}

#[test]
fn error_message_falls_back_to_body_or_status() {
    assert_eq!(
        error_message(StatusCode::NOT_FOUND, "Player not found\n"),
        "Player not found"
    );
    assert_eq!(
        error_message(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>"),
        "request failed with status 500 Internal Server Error"
    );
    assert_eq!(
        error_message(StatusCode::BAD_GATEWAY, ""),
        "request failed with status 502 Bad Gateway"
    );
}

#[test]
fn client_lists_with_query_and_parses_body() {
    let (base, server) = serve_once("200 OK", &read_fixture("players.json"));
    let client = PlayerClient::new(&base).expect("client");
    let filters = PlayerFilters {
        team: Some("Arsenal".to_string()),
        ..PlayerFilters::default()
    };

    let players = client.list_players(&filters).expect("list should succeed");
    assert_eq!(players.len(), 3);

    let request = server.join().expect("server thread");
    assert!(request.starts_with("GET /api/v1/player?team=Arsenal HTTP/1.1\r\n"));
}

#[test]
fn client_posts_draft_without_id() {
    let saved = r#"{"id":42,"player":"Rodri","team":"Manchester City","number":16,"nation":"ESP","position":"MF","age":27,"date":"2024-05-19"}"#;
    let (base, server) = serve_once("201 Created", saved);
    let client = PlayerClient::new(&base).expect("client");

    let created = client.create_player(&rodri_draft()).expect("create should succeed");
    assert_eq!(created.id, Some(42));
    assert_eq!(created.player, "Rodri");

    let request = server.join().expect("server thread");
    assert!(request.starts_with("POST /api/v1/player HTTP/1.1\r\n"));
    assert!(request.contains(r#""player":"Rodri""#));
    assert!(!request.contains(r#""id""#));
}

#[test]
fn client_update_with_empty_body_is_not_found() {
    let (base, server) = serve_once("200 OK", "");
    let client = PlayerClient::new(&base).expect("client");
    let player = Player {
        id: Some(42),
        ..rodri_draft()
    };

    let err = client.update_player(&player).expect_err("empty body should fail");
    assert_eq!(err.to_string(), "player not found");

    let request = server.join().expect("server thread");
    assert!(request.starts_with("PUT /api/v1/player HTTP/1.1\r\n"));
    assert!(request.contains(r#""id":42"#));
}

#[test]
fn client_delete_surfaces_backend_message() {
    let (base, server) = serve_once("404 Not Found", r#"{"message":"Player not found"}"#);
    let client = PlayerClient::new(&base).expect("client");

    let err = client
        .delete_player("Bukayo Saka")
        .expect_err("missing player should fail");
    assert_eq!(err.to_string(), "Player not found");

    let request = server.join().expect("server thread");
    assert!(request.starts_with("DELETE /api/v1/player/Bukayo%20Saka HTTP/1.1\r\n"));
}

#[test]
fn client_server_error_falls_back_to_status() {
    let (base, server) = serve_once("500 Internal Server Error", "<html>oops</html>");
    let client = PlayerClient::new(&base).expect("client");

    let err = client
        .list_players(&PlayerFilters::default())
        .expect_err("server error should fail");
    assert_eq!(
        err.to_string(),
        "request failed with status 500 Internal Server Error"
    );
    server.join().expect("server thread");
}
