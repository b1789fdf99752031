use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;

use landmark_core::config::ServerConfig;
use landmark_core::endpoint::{RegistrationEndpoint, UploadEndpoint};
use landmark_core::error::LandmarkError;
use landmark_core::http::HttpBackend;
use landmark_core::landmark::Side;
use landmark_core::registration::RegistrationRequest;

/// Serve one request with a canned JSON reply. Joins to the raw request text.
fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = std::thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut head = String::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if let Some(v) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                content_length = v.trim().parse().unwrap();
            }
            head.push_str(&line);
            if line == "\r\n" || line.is_empty() {
                break;
            }
        }
        let mut payload = vec![0u8; content_length];
        reader.read_exact(&mut payload).unwrap();

        let mut stream = stream;
        write!(
            stream,
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .unwrap();
        stream.flush().unwrap();

        head + &String::from_utf8_lossy(&payload)
    });

    (base_url, handle)
}

fn backend(base_url: String) -> HttpBackend {
    HttpBackend::new(&ServerConfig {
        base_url,
        timeout_secs: Some(10),
        ..Default::default()
    })
    .unwrap()
}

#[test]
fn test_upload_sends_position_field() {
    let (url, server) = serve_once("200 OK", r#"{"success": true, "image_id": "abc"}"#);
    let receipt = backend(url)
        .upload(Side::Right, "right.png", b"\x89PNG fake")
        .unwrap();
    assert_eq!(receipt.image_id.as_deref(), Some("abc"));

    let request = server.join().unwrap();
    assert!(request.starts_with("POST /upload "));
    assert!(request.contains("name=\"position\""));
    assert!(request.contains("right"));
    assert!(request.contains("filename=\"right.png\""));
}

#[test]
fn test_upload_rejection_maps_to_upload_failed() {
    let (url, server) = serve_once("400 Bad Request", r#"{"error": "No image file provided"}"#);
    let err = backend(url)
        .upload(Side::Left, "left.png", b"bytes")
        .unwrap_err();
    match err {
        LandmarkError::UploadFailed(msg) => assert!(msg.contains("No image file")),
        other => panic!("unexpected error: {other:?}"),
    }
    server.join().unwrap();
}

#[test]
fn test_register_posts_json_and_parses_error_reply() {
    let (url, server) = serve_once(
        "400 Bad Request",
        r#"{"success": false, "error": "At least 4 point pairs are required"}"#,
    );
    let request = RegistrationRequest {
        left_points: vec![[1.0, 2.0]; 4],
        right_points: vec![[3.0, 4.0]; 4],
    };
    let response = backend(url).register(&request).unwrap();
    assert!(!response.success);
    assert!(response.error.unwrap().contains("4 point pairs"));

    let raw = server.join().unwrap();
    assert!(raw.starts_with("POST /register_images "));
    assert!(raw.contains("\"leftPoints\""));
}

#[test]
fn test_unreachable_server_is_registration_failure() {
    // Bind then drop to get a port nothing listens on.
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let request = RegistrationRequest {
        left_points: vec![[0.0, 0.0]; 4],
        right_points: vec![[0.0, 0.0]; 4],
    };
    let err = backend(format!("http://127.0.0.1:{port}"))
        .register(&request)
        .unwrap_err();
    assert!(matches!(err, LandmarkError::RegistrationFailed(_)));
}
