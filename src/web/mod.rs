//! Browser surface for phishscan.
//!
//! Provides a lightweight HTTP server (sync, via `tiny_http`) that serves:
//! - A single-page scanner with result card and scan history
//! - JSON endpoints that feed form submissions and clear-history clicks to
//!   the [`Controller`] and answer with the resulting view state
//!
//! Launched via `phishscan web` (default: `http://127.0.0.1:9747`).
//! Requests are handled one at a time on the calling thread, so the
//! controller and its history are never touched concurrently.

mod api;
mod frontend;

use std::io::{Cursor, Read};

use anyhow::Result;
use serde::Serialize;
use tiny_http::{Header, Method, Response, Server, StatusCode};

use crate::client::PredictionClient;
use crate::controller::Controller;
use crate::store::KeyValueStore;
use crate::ui::SnapshotUi;

type WebController<C, S> = Controller<C, S, SnapshotUi>;

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Start the web server on the given address.
///
/// Blocks the current thread. A failing request gets a JSON error response
/// without stopping the server.
pub fn serve<C, S>(addr: &str, mut controller: WebController<C, S>) -> Result<()>
where
    C: PredictionClient,
    S: KeyValueStore,
{
    let server = Server::http(addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    println!("phishscan running at http://{addr}");
    println!("Press Ctrl+C to stop.\n");

    for mut request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        let body = if matches!(method, Method::Post) {
            let mut buf = String::new();
            let _ = request.as_reader().read_to_string(&mut buf);
            Some(buf)
        } else {
            None
        };

        let resp = match dispatch(&mut controller, &method, &url, body.as_deref()) {
            Ok(resp) => resp,
            Err(e) => error_response(500, &format!("{e:#}")),
        };
        let _ = request.respond(resp);

        // Brief access log
        println!(
            "{} {} {}",
            method,
            url,
            chrono::Local::now().format("%H:%M:%S")
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Dispatch an incoming request to the appropriate handler.
fn dispatch<C, S>(
    controller: &mut WebController<C, S>,
    method: &Method,
    url: &str,
    body: Option<&str>,
) -> Result<Response<Cursor<Vec<u8>>>>
where
    C: PredictionClient,
    S: KeyValueStore,
{
    // Strip query string for path matching
    let path = url.split('?').next().unwrap_or(url);

    match (method, path) {
        (&Method::Get, "/") | (&Method::Get, "/index.html") => Ok(serve_frontend()),

        (&Method::Get, "/api/state") => json_response(&api::state(controller)),
        (&Method::Post, "/api/scan") => match api::parse_scan_request(body.unwrap_or("")) {
            Some(input) => json_response(&api::scan(controller, input)),
            None => Ok(error_response(400, "expected a JSON body with a \"url\" string")),
        },
        (&Method::Post, "/api/history/clear") => json_response(&api::clear_history(controller)),
        (&Method::Get, "/api/health") => json_response(&api::health(controller)),

        _ => Ok(error_response(404, "not found")),
    }
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Serve the embedded single-page frontend.
fn serve_frontend() -> Response<Cursor<Vec<u8>>> {
    Response::from_data(frontend::INDEX_HTML.as_bytes().to_vec())
        .with_header(content_type_html())
        .with_status_code(StatusCode(200))
}

fn json_response<T: Serialize>(value: &T) -> Result<Response<Cursor<Vec<u8>>>> {
    let body = serde_json::to_vec(value)?;
    Ok(Response::from_data(body)
        .with_header(content_type_json())
        .with_status_code(StatusCode(200)))
}

fn error_response(status: u16, message: &str) -> Response<Cursor<Vec<u8>>> {
    let body = serde_json::json!({ "error": message }).to_string();
    Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(status))
}

/// JSON content type header.
fn content_type_json() -> Header {
    Header::from_bytes("Content-Type", "application/json; charset=utf-8").unwrap()
}

/// HTML content type header.
fn content_type_html() -> Header {
    Header::from_bytes("Content-Type", "text/html; charset=utf-8").unwrap()
}
