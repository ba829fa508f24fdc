//! Stand-in status service: serves the three endpoints pulsetop polls with
//! canned data that visibly moves. Used by the client's --demo mode and for
//! local development against a known-good backend.

use std::{net::SocketAddr, sync::Arc};

use axum::{extract::State, routing::get, routing::post, Json, Router};
use chrono::Local;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

// ---------- Data types sent to the client ----------

#[derive(Debug, Serialize, Clone)]
struct SystemStatus {
    status: String,
    #[serde(rename = "lastSync")]
    last_sync: String,
}

#[derive(Debug, Serialize, Clone)]
struct Activity {
    id: String,
    progress: f64,
    time: String,
}

#[derive(Debug, Serialize, Clone)]
struct SyncResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

// ---------- Shared state ----------

struct Pipeline {
    id: &'static str,
    progress: f64,
    step: f64,
}

/// Advance one pipeline's progress, wrapping back to the start at 100.
fn advance(progress: f64, step: f64) -> f64 {
    let next = progress + step;
    if next >= 100.0 {
        0.0
    } else {
        next
    }
}

struct StubState {
    last_sync: Option<String>,
    pipelines: Vec<Pipeline>,
}

impl StubState {
    fn new() -> Self {
        Self {
            last_sync: None,
            pipelines: vec![
                Pipeline { id: "ingest", progress: 42.0, step: 7.0 },
                Pipeline { id: "transcode", progress: 15.0, step: 3.0 },
                Pipeline { id: "publish", progress: 88.0, step: 5.0 },
            ],
        }
    }
}

type Shared = Arc<Mutex<StubState>>;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let port = parse_port(std::env::args(), 3939);
    let state: Shared = Arc::new(Mutex::new(StubState::new()));

    let app = Router::new()
        .route("/api/system", get(system))
        .route("/api/activities", get(activities))
        .route("/api/sync", post(sync))
        .with_state(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    info!("stub status service on http://{addr}");

    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).await {
                error!(error = %e, "serve failed");
            }
        }
        Err(e) => error!(error = %e, "bind {addr} failed"),
    }
}

fn parse_port<I: IntoIterator<Item = String>>(args: I, default_port: u16) -> u16 {
    let mut it = args.into_iter();
    let _ = it.next(); // program name
    let mut value: Option<String> = None;
    while let Some(a) = it.next() {
        match a.as_str() {
            "--port" | "-p" => value = it.next(),
            _ if a.starts_with("--port=") => {
                if let Some((_, v)) = a.split_once('=') {
                    value = Some(v.to_string());
                }
            }
            _ => {}
        }
    }
    value
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(default_port)
}

// ---------- Handlers ----------

async fn system(State(state): State<Shared>) -> Json<SystemStatus> {
    let st = state.lock().await;
    Json(SystemStatus {
        status: "active".into(),
        last_sync: st.last_sync.clone().unwrap_or_else(|| "Never".into()),
    })
}

async fn activities(State(state): State<Shared>) -> Json<Vec<Activity>> {
    let mut st = state.lock().await;
    let stamp = Local::now().format("%H:%M:%S").to_string();
    let mut out = Vec::with_capacity(st.pipelines.len());
    for p in &mut st.pipelines {
        p.progress = advance(p.progress, p.step);
        out.push(Activity {
            id: p.id.to_string(),
            progress: p.progress,
            time: stamp.clone(),
        });
    }
    Json(out)
}

async fn sync(State(state): State<Shared>) -> Json<SyncResponse> {
    let mut st = state.lock().await;
    st.last_sync = Some(Local::now().format("%Y-%m-%d %H:%M:%S").to_string());
    Json(SyncResponse {
        success: true,
        error: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_long_short_and_assign() {
        let args = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(parse_port(args(&["stub", "--port", "9001"]), 3939), 9001);
        assert_eq!(parse_port(args(&["stub", "-p", "9002"]), 3939), 9002);
        assert_eq!(parse_port(args(&["stub", "--port=9003"]), 3939), 9003);
        assert_eq!(parse_port(args(&["stub"]), 3939), 3939);
        assert_eq!(parse_port(args(&["stub", "--port", "nope"]), 3939), 3939);
    }

    #[test]
    fn progress_advances_and_wraps() {
        assert_eq!(advance(42.0, 7.0), 49.0);
        assert_eq!(advance(97.0, 5.0), 0.0);
        assert_eq!(advance(95.0, 5.0), 0.0);
    }
}
