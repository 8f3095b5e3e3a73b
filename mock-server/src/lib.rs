use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const ACCOUNT_ID: &str = "acct-mock-0001";
pub const WORKSPACE_LIMIT: i64 = 5;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSource {
    pub id: Uuid,
    #[serde(default)]
    pub credential: Option<serde_json::Value>,
    pub label: String,
    #[serde(default)]
    pub provider: Option<serde_json::Value>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub workspace: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDataSource {
    #[serde(default)]
    pub credential: Option<serde_json::Value>,
    pub label: String,
    #[serde(default)]
    pub provider: Option<serde_json::Value>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub workspace: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAccount {
    pub account_id: String,
    pub created: Option<String>,
    pub label: String,
    pub revision_datetime: Option<String>,
    pub revision_number: i64,
    pub status: String,
    pub workspace: Vec<String>,
    pub workspace_limit: i64,
}

/// How the caller authenticated. Recorded so tests can assert on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credential {
    Bearer(String),
    Basic { username: String, key: String },
    ApiKey(String),
}

pub type Db = Arc<RwLock<Vec<DataSource>>>;

type ApiError = (StatusCode, Json<serde_json::Value>);

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/data-source", post(create_data_source))
        .route("/service-account", get(get_service_account))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Accept `Authorization: Bearer|Basic`, an `x-api-key` header or an
/// `api_key` query parameter.
pub fn authenticate(
    headers: &HeaderMap,
    query: &HashMap<String, String>,
) -> Result<Credential, ApiError> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        let value = value.to_str().map_err(|_| unauthorized("malformed authorization header"))?;
        if let Some(token) = value.strip_prefix("Bearer ") {
            return Ok(Credential::Bearer(token.to_string()));
        }
        if let Some(encoded) = value.strip_prefix("Basic ") {
            let decoded = STANDARD
                .decode(encoded)
                .ok()
                .and_then(|bytes| String::from_utf8(bytes).ok())
                .ok_or_else(|| unauthorized("malformed basic credentials"))?;
            let (username, key) = decoded
                .split_once(':')
                .ok_or_else(|| unauthorized("malformed basic credentials"))?;
            return Ok(Credential::Basic {
                username: username.to_string(),
                key: key.to_string(),
            });
        }
        return Err(unauthorized("unsupported authorization scheme"));
    }
    if let Some(value) = headers.get("x-api-key").and_then(|v| v.to_str().ok()) {
        return Ok(Credential::ApiKey(value.to_string()));
    }
    if let Some(value) = query.get("api_key") {
        return Ok(Credential::ApiKey(value.clone()));
    }
    Err(unauthorized("missing credentials"))
}

fn unauthorized(message: &str) -> ApiError {
    (StatusCode::UNAUTHORIZED, Json(json!({ "message": message })))
}

async fn create_data_source(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    Json(input): Json<CreateDataSource>,
) -> Result<(StatusCode, Json<DataSource>), ApiError> {
    authenticate(&headers, &query)?;
    if input.label.trim().is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "message": "label must not be empty" })),
        ));
    }
    let source = DataSource {
        id: Uuid::new_v4(),
        credential: input.credential,
        label: input.label,
        provider: input.provider,
        reference: input.reference,
        uri: input.uri,
        workspace: input.workspace,
    };
    tracing::info!(id = %source.id, label = %source.label, "data source created");
    db.write().await.push(source.clone());
    Ok((StatusCode::CREATED, Json(source)))
}

async fn get_service_account(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<ServiceAccount>, ApiError> {
    authenticate(&headers, &query)?;
    let sources = db.read().await;
    let mut workspace: Vec<String> = sources.iter().filter_map(|s| s.workspace.clone()).collect();
    workspace.sort();
    workspace.dedup();
    Ok(Json(ServiceAccount {
        account_id: ACCOUNT_ID.to_string(),
        created: None,
        label: "mock service account".to_string(),
        revision_datetime: None,
        revision_number: sources.len() as i64 + 1,
        status: "ACTIVE".to_string(),
        workspace,
        workspace_limit: WORKSPACE_LIMIT,
    }))
}
