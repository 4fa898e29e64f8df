// tests/common/mod.rs
//
// Backend falso em axum: responde o que cada teste configurar e
// registra todas as requisições recebidas.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};

use maestro_admin::{
    services::ApiClient,
    storage::{MemoryStore, SessionStore},
};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub body: Value,
    pub authorization: Option<String>,
}

#[derive(Default)]
struct MockState {
    responses: Mutex<HashMap<String, (u16, Value)>>,
    delay: Mutex<Option<Duration>>,
    requests: Mutex<Vec<Recorded>>,
}

pub struct MockBackend {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) {
        self.state
            .responses
            .lock()
            .unwrap()
            .insert(format!("{method} {path}"), (status, body));
    }

    pub fn delay(&self, delay: Duration) {
        *self.state.delay.lock().unwrap() = Some(delay);
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn calls(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    pub fn api(&self) -> (ApiClient, Arc<dyn SessionStore>) {
        let store: Arc<dyn SessionStore> = Arc::new(MemoryStore::new());
        (ApiClient::new(self.base_url.clone(), store.clone()).unwrap(), store)
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    state.requests.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path: path.clone(),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });

    let delay = *state.delay.lock().unwrap();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let configured = state
        .responses
        .lock()
        .unwrap()
        .get(&format!("{method} {path}"))
        .cloned();

    match configured {
        Some((status, body)) => {
            (StatusCode::from_u16(status).unwrap(), Json(body)).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": format!("Rota {path} não encontrada") })),
        )
            .into_response(),
    }
}

/// Token assinado de verdade, com os claims que o backend emite.
pub fn mint_token(email: &str, entidade_id: i64, ttl_secs: i64) -> String {
    let claims = json!({
        "sub": 1,
        "email": email,
        "entidadeId": entidade_id,
        "iat": Utc::now().timestamp(),
        "exp": Utc::now().timestamp() + ttl_secs,
    });
    encode(&Header::default(), &claims, &EncodingKey::from_secret(b"segredo-de-teste")).unwrap()
}

/// Porta local sem ninguém escutando.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
