//! Minimal Gremlin Server stand-in on a local TCP port
//!
//! Answers one HTTP request per connection from a fixed list of responses
//! and records every request body it receives.

use parking_lot::Mutex;
use serde_json::{json, Value};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

pub struct GremlinStub {
    url: String,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl GremlinStub {
    /// Serve `(http status, body)` pairs in order, one per connection
    pub fn serve(responses: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let url = format!("http://{}", listener.local_addr().expect("stub address"));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        thread::spawn(move || {
            for (status, body) in responses {
                let Ok((stream, _)) = listener.accept() else {
                    return;
                };
                let request = read_body(&stream);
                recorded.lock().push(serde_json::from_str(&request).unwrap_or(Value::Null));
                respond(stream, status, &body);
            }
        });

        Self { url, requests }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Request bodies received so far
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().clone()
    }

    /// Gremlin scripts received so far
    pub fn scripts(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| r["gremlin"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}

fn read_body(stream: &TcpStream) -> String {
    let mut reader = BufReader::new(stream);
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }

    let mut body = vec![0u8; content_length];
    let _ = reader.read_exact(&mut body);
    String::from_utf8_lossy(&body).into_owned()
}

fn respond(mut stream: TcpStream, status: u16, body: &str) {
    let reason = if status == 200 { "OK" } else { "Error" };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

/// GraphSON 3 response whose result is a single JSON document string
pub fn graphson_document(document: Value) -> String {
    graphson_status(200, "", json!([document.to_string()]))
}

/// GraphSON 3 response with an explicit Gremlin status code
pub fn graphson_status(code: u16, message: &str, data: Value) -> String {
    json!({
        "requestId": "8f4c8a4e-0d3c-4a55-9c1e-7d8f1b1e2a10",
        "status": {
            "message": message,
            "code": code,
            "attributes": {"@type": "g:Map", "@value": []}
        },
        "result": {
            "data": {"@type": "g:List", "@value": data},
            "meta": {"@type": "g:Map", "@value": []}
        }
    })
    .to_string()
}

/// Introspection result for a store holding nothing
pub fn empty_schema() -> Value {
    json!({
        "propertyKeys": {},
        "vertexLabels": [],
        "edgeLabels": [],
        "propertyConstraints": {},
        "graphIndexes": [],
        "relationIndexes": []
    })
}
