//! Blocking HTTP transport tests against a loopback server
#![cfg(feature = "fetch")]

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use hnsift_core::*;

/// Answers every connection with the response chosen by `respond(n)`, `n` counting from 0.
fn serve(respond: impl Fn(usize) -> String + Send + 'static) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);

    std::thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            read_request(&stream);
            let n = counter.fetch_add(1, Ordering::SeqCst);
            let _ = stream.write_all(respond(n).as_bytes());
            let _ = stream.flush();
        }
    });

    (format!("http://{}/news", addr), hits)
}

fn read_request(stream: &TcpStream) {
    let mut reader = BufReader::new(stream);
    let mut line = String::new();
    while reader.read_line(&mut line).map(|n| n > 0).unwrap_or(false) {
        if line == "\r\n" {
            break;
        }
        line.clear();
    }
}

fn response(status: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    )
}

/// Accepts connections and holds them open without ever answering.
fn serve_silently() -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);

    std::thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming() {
            let Ok(stream) = stream else { continue };
            counter.fetch_add(1, Ordering::SeqCst);
            held.push(stream);
        }
    });

    (format!("http://{}/news", addr), hits)
}

fn fetcher(base_url: &str, max_attempts: u32) -> Fetcher<HttpTransport> {
    fetcher_with_timeout(base_url, max_attempts, 2)
}

fn fetcher_with_timeout(base_url: &str, max_attempts: u32, timeout: u64) -> Fetcher<HttpTransport> {
    let config = FetchConfig {
        base_url: base_url.to_string(),
        max_attempts,
        timeout,
        page_delay: Duration::ZERO,
        ..Default::default()
    };
    let client = reqwest::blocking::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .unwrap();
    Fetcher::with_transport(config, HttpTransport::from_client(client, timeout))
}

#[test]
fn test_http_fetch_success() {
    let (url, hits) = serve(|_| response("200 OK", "<html><body>front page</body></html>"));

    let page = fetcher(&url, 3).fetch(&url).unwrap();

    assert!(page.body.contains("front page"));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_http_status_failure_exhausts_attempts() {
    let (url, hits) = serve(|_| response("503 Service Unavailable", ""));

    let result = fetcher(&url, 4).fetch(&url);

    match result {
        Err(SiftError::RetriesExhausted { attempts, reason, .. }) => {
            assert_eq!(attempts, 4);
            assert!(reason.contains("503"));
        }
        other => panic!("expected RetriesExhausted, got {:?}", other),
    }
    assert_eq!(hits.load(Ordering::SeqCst), 4);
}

#[test]
fn test_http_recovers_after_transient_status() {
    let (url, hits) = serve(|n| {
        if n < 2 { response("500 Internal Server Error", "") } else { response("200 OK", "<p>finally</p>") }
    });

    let page = fetcher(&url, 6).fetch(&url).unwrap();

    assert!(page.body.contains("finally"));
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[test]
fn test_http_empty_body_is_distinct_from_failure() {
    let (url, _) = serve(|_| response("200 OK", ""));

    let page = fetcher(&url, 3).fetch(&url).unwrap();

    assert!(page.is_empty());
}

#[test]
fn test_timeout_is_retried_until_exhausted() {
    let (url, hits) = serve_silently();

    let result = fetcher_with_timeout(&url, 3, 1).fetch(&url);

    match result {
        Err(SiftError::RetriesExhausted { attempts, reason, .. }) => {
            assert_eq!(attempts, 3);
            assert!(reason.contains("timed out"), "unexpected reason: {}", reason);
        }
        other => panic!("expected RetriesExhausted, got {:?}", other),
    }
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[test]
fn test_connection_refused_exhausts_attempts() {
    let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let url = format!("http://{}/news", addr);

    let result = fetcher(&url, 2).fetch(&url);

    assert!(matches!(result, Err(SiftError::RetriesExhausted { attempts: 2, .. })));
}

#[test]
fn test_paginated_fetch_over_http() {
    let (url, hits) = serve(|n| response("200 OK", &format!("<p>page {}</p>", n)));

    let report = fetcher(&url, 1).fetch_pages(3).unwrap();

    assert_eq!(report.pages.len(), 3);
    assert!(report.failures.is_empty());
    assert!(report.pages[2].url.ends_with("/news?p=2"));
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}
