use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

/// Requests for this configuration are always denied.
pub const FORBIDDEN_CONFIG_ID: i64 = 403;

const PROBLEM_BASE: &str = "https://problems.luna.akamaiapis.net/appsec";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hostname {
    pub hostname: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HostnameList {
    pub hostname_list: Vec<Hostname>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSelectedHostnames {
    pub config_id: i64,
    pub version: i64,
    pub hostname_list: Vec<Hostname>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Problem {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub detail: String,
    pub instance: String,
    pub status: u16,
}

pub type Db = Arc<RwLock<HashMap<(i64, i64), Vec<Hostname>>>>;

pub fn app() -> Router {
    app_with(HashMap::new())
}

/// Router pre-populated with selected hostnames keyed by `(config_id, version)`.
pub fn app_with(seed: HashMap<(i64, i64), Vec<Hostname>>) -> Router {
    let db: Db = Arc::new(RwLock::new(seed));
    Router::new()
        .route(
            "/appsec/v1/configs/{config_id}/versions/{version}/selected-hostnames",
            get(get_selected_hostnames).put(update_selected_hostnames),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn problem(status: StatusCode, error_type: &str, title: &str, detail: String) -> Response {
    let body = Problem {
        kind: format!("{PROBLEM_BASE}/error-types/{error_type}"),
        title: title.to_string(),
        detail,
        instance: format!("{PROBLEM_BASE}/error-instances/{}", Uuid::new_v4()),
        status: status.as_u16(),
    };
    (
        status,
        [(header::CONTENT_TYPE, "application/problem+json")],
        Json(body),
    )
        .into_response()
}

fn forbidden(config_id: i64) -> Response {
    problem(
        StatusCode::FORBIDDEN,
        "UNAUTHORIZED",
        "Unauthorized",
        format!("You do not have access to configuration {config_id}"),
    )
}

/// Trim, lowercase and drop duplicates, keeping first-seen order.
fn normalize(hostnames: Vec<Hostname>) -> Vec<Hostname> {
    let mut out: Vec<Hostname> = Vec::with_capacity(hostnames.len());
    for h in hostnames {
        let hostname = h.hostname.trim().to_ascii_lowercase();
        if hostname.is_empty() || out.iter().any(|o| o.hostname == hostname) {
            continue;
        }
        out.push(Hostname { hostname });
    }
    out
}

async fn get_selected_hostnames(
    State(db): State<Db>,
    Path((config_id, version)): Path<(i64, i64)>,
) -> Result<Json<HostnameList>, Response> {
    debug!(config_id, version, "get selected hostnames");
    if config_id == FORBIDDEN_CONFIG_ID {
        return Err(forbidden(config_id));
    }
    let db = db.read().await;
    match db.get(&(config_id, version)) {
        Some(list) => Ok(Json(HostnameList {
            hostname_list: list.clone(),
        })),
        None => Err(problem(
            StatusCode::NOT_FOUND,
            "NOT-FOUND",
            "Not Found",
            format!("Configuration {config_id} version {version} not found"),
        )),
    }
}

async fn update_selected_hostnames(
    State(db): State<Db>,
    Path((config_id, version)): Path<(i64, i64)>,
    Json(input): Json<UpdateSelectedHostnames>,
) -> Result<(StatusCode, Json<HostnameList>), Response> {
    if config_id == FORBIDDEN_CONFIG_ID {
        return Err(forbidden(config_id));
    }
    if input.config_id != config_id || input.version != version {
        return Err(problem(
            StatusCode::BAD_REQUEST,
            "INVALID-INPUT-ERROR",
            "Invalid Input Error",
            format!(
                "body targets configuration {} version {}, path targets {config_id} version {version}",
                input.config_id, input.version
            ),
        ));
    }

    let hostname_list = normalize(input.hostname_list);
    let previous = db
        .write()
        .await
        .insert((config_id, version), hostname_list.clone());
    let status = if previous.is_some() {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    info!(
        config_id,
        version,
        hostnames = hostname_list.len(),
        status = status.as_u16(),
        "selected hostnames replaced"
    );
    Ok((status, Json(HostnameList { hostname_list })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hostnames(names: &[&str]) -> Vec<Hostname> {
        names
            .iter()
            .map(|n| Hostname {
                hostname: n.to_string(),
            })
            .collect()
    }

    #[test]
    fn hostname_list_serializes_to_json() {
        let list = HostnameList {
            hostname_list: hostnames(&["example.com"]),
        };
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json["hostnameList"][0]["hostname"], "example.com");
    }

    #[test]
    fn update_requires_ids() {
        let result: Result<UpdateSelectedHostnames, _> =
            serde_json::from_str(r#"{"hostnameList":[]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn normalize_trims_lowercases_and_dedupes() {
        let out = normalize(hostnames(&[" WWW.Example.com ", "www.example.com", "", "b.com"]));
        assert_eq!(out, hostnames(&["www.example.com", "b.com"]));
    }

    #[test]
    fn problem_uses_type_member() {
        let resp = Problem {
            kind: "t".to_string(),
            title: "x".to_string(),
            detail: "y".to_string(),
            instance: "z".to_string(),
            status: 404,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["type"], "t");
        assert_eq!(json["status"], 404);
    }
}
