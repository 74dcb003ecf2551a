//! End-to-end RSE API file tests: datasets, members, UNIX files, and VSAM
//! against an in-process mock gateway with an in-memory catalog and a
//! miniature IDCAMS.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};
use base64::Engine;

use zosgate::{Credentials, FileConfig, RestClient};
use zosgate_file::{
    DatasetAttributes, FileError, UnixFileType, VsamDefinition, ZosFiles,
};

// ─── Mock catalog state ───

#[derive(Clone)]
struct MockDataset {
    org: String,
    recfm: String,
    lrecl: u32,
    content: Vec<u8>,
    members: BTreeMap<String, Vec<u8>>,
}

impl MockDataset {
    fn from_create(body: &serde_json::Value) -> Self {
        Self {
            org: body["dataSetOrganization"].as_str().unwrap_or("PS").to_string(),
            recfm: body["recordFormat"].as_str().unwrap_or("FB").to_string(),
            lrecl: body["recordLength"].as_u64().unwrap_or(80) as u32,
            content: Vec::new(),
            members: BTreeMap::new(),
        }
    }

    fn vsam() -> Self {
        Self {
            org: "VS".to_string(),
            recfm: "U".to_string(),
            lrecl: 0,
            content: Vec::new(),
            members: BTreeMap::new(),
        }
    }
}

#[derive(Clone)]
struct MockNode {
    dir: bool,
    content: Vec<u8>,
    perms: String,
    owner: String,
    group: String,
}

struct MockFiles {
    datasets: BTreeMap<String, MockDataset>,
    unix: BTreeMap<String, MockNode>,
}

type Shared = Arc<Mutex<MockFiles>>;

fn rse_error(status: StatusCode, message: &str) -> axum::response::Response {
    (
        status,
        Json(serde_json::json!({ "status": "ERROR", "message": message })),
    )
        .into_response()
}

fn split_member(name: &str) -> (String, Option<String>) {
    match name.find('(') {
        Some(open) => {
            let close = name.rfind(')').unwrap_or(name.len());
            (
                name[..open].to_string(),
                Some(name[open + 1..close].to_string()),
            )
        }
        None => (name.to_string(), None),
    }
}

// ─── Dataset routes ───

async fn dataset_list(
    State(state): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let files = state.lock().unwrap();
    let filter = query.get("filter").cloned().unwrap_or_else(|| "*".to_string());
    let items: Vec<serde_json::Value> = files
        .datasets
        .iter()
        .filter(|(name, _)| {
            filter == "*"
                || filter
                    .strip_suffix('*')
                    .map(|p| name.starts_with(p))
                    .unwrap_or(**name == filter)
        })
        .map(|(name, ds)| {
            serde_json::json!({
                "name": name,
                "dataSetOrganization": ds.org,
                "recordFormat": ds.recfm,
                "recordLength": ds.lrecl,
                "blockSize": 27920,
                "volumeSerial": "VOL001"
            })
        })
        .collect();
    Json(serde_json::json!({ "items": items }))
}

async fn dataset_create(
    State(state): State<Shared>,
    Path(dsn): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    let mut files = state.lock().unwrap();
    if files.datasets.contains_key(&dsn) {
        return rse_error(StatusCode::CONFLICT, "data set already exists");
    }
    files.datasets.insert(dsn, MockDataset::from_create(&body));
    StatusCode::CREATED.into_response()
}

async fn dataset_delete(State(state): State<Shared>, Path(dsn): Path<String>) -> impl IntoResponse {
    let mut files = state.lock().unwrap();
    let (name, member) = split_member(&dsn);
    match member {
        Some(member) => {
            let removed = match files.datasets.get_mut(&name) {
                Some(ds) => ds.members.remove(&member).is_some(),
                None => false,
            };
            if removed {
                StatusCode::NO_CONTENT.into_response()
            } else {
                rse_error(StatusCode::NOT_FOUND, "member does not exist")
            }
        }
        None => {
            if files.datasets.remove(&name).is_some() {
                StatusCode::NO_CONTENT.into_response()
            } else {
                rse_error(StatusCode::NOT_FOUND, "data set does not exist")
            }
        }
    }
}

async fn dataset_read(
    State(state): State<Shared>,
    Path(dsn): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let files = state.lock().unwrap();
    let (name, member) = split_member(&dsn);
    let content = match files.datasets.get(&name) {
        Some(ds) => match &member {
            Some(member) => match ds.members.get(member) {
                Some(content) => content.clone(),
                None => return rse_error(StatusCode::NOT_FOUND, "member does not exist"),
            },
            None => ds.content.clone(),
        },
        None => return rse_error(StatusCode::NOT_FOUND, "data set does not exist"),
    };
    let records = if query.get("binary").map(|v| v == "true").unwrap_or(false) {
        base64::engine::general_purpose::STANDARD.encode(&content)
    } else {
        String::from_utf8_lossy(&content).to_string()
    };
    Json(serde_json::json!({ "records": records })).into_response()
}

async fn dataset_write(
    State(state): State<Shared>,
    Path(dsn): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    let mut files = state.lock().unwrap();
    let (name, member) = split_member(&dsn);
    let records = body["records"].as_str().unwrap_or_default();
    let content = if query.get("binary").map(|v| v == "true").unwrap_or(false) {
        match base64::engine::general_purpose::STANDARD.decode(records.as_bytes()) {
            Ok(bytes) => bytes,
            Err(_) => return rse_error(StatusCode::BAD_REQUEST, "invalid base64"),
        }
    } else {
        records.as_bytes().to_vec()
    };
    match files.datasets.get_mut(&name) {
        Some(ds) => {
            match member {
                Some(member) => {
                    ds.members.insert(member, content);
                }
                None => ds.content = content,
            }
            StatusCode::NO_CONTENT.into_response()
        }
        None => rse_error(StatusCode::NOT_FOUND, "data set does not exist"),
    }
}

async fn member_list(State(state): State<Shared>, Path(dsn): Path<String>) -> impl IntoResponse {
    let files = state.lock().unwrap();
    match files.datasets.get(&dsn) {
        Some(ds) => {
            let items: Vec<&String> = ds.members.keys().collect();
            Json(serde_json::json!({ "items": items })).into_response()
        }
        None => rse_error(StatusCode::NOT_FOUND, "data set does not exist"),
    }
}

// ─── UNIX file routes ───

fn children(files: &MockFiles, parent: &str) -> Option<Vec<(String, MockNode)>> {
    let node = files.unix.get(parent)?;
    if !node.dir {
        return None;
    }
    let prefix = if parent == "/" {
        "/".to_string()
    } else {
        format!("{}/", parent)
    };
    Some(
        files
            .unix
            .iter()
            .filter(|(path, _)| {
                path.starts_with(&prefix)
                    && path.len() > prefix.len()
                    && !path[prefix.len()..].contains('/')
            })
            .map(|(path, node)| (path[prefix.len()..].to_string(), node.clone()))
            .collect(),
    )
}

async fn unix_entry_routes(
    State(state): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
    method: axum::http::Method,
    body: Option<serde_json::Value>,
) -> axum::response::Response {
    let path = match query.get("path") {
        Some(path) => path.clone(),
        None => return rse_error(StatusCode::BAD_REQUEST, "missing path"),
    };
    let mut files = state.lock().unwrap();

    if method == axum::http::Method::GET {
        match children(&files, &path) {
            Some(entries) => {
                let items: Vec<serde_json::Value> = entries
                    .into_iter()
                    .map(|(name, node)| {
                        serde_json::json!({
                            "name": name,
                            "type": if node.dir { "DIRECTORY" } else { "FILE" },
                            "size": node.content.len(),
                            "permissionsSymbolic": node.perms,
                            "user": node.owner,
                            "group": node.group
                        })
                    })
                    .collect();
                Json(serde_json::json!({ "items": items })).into_response()
            }
            None => rse_error(StatusCode::NOT_FOUND, "path does not exist"),
        }
    } else if method == axum::http::Method::POST {
        if files.unix.contains_key(&path) {
            return rse_error(StatusCode::CONFLICT, "path already exists");
        }
        let body = body.unwrap_or_default();
        let dir = body["type"].as_str() == Some("DIRECTORY");
        let perms = body["permissionsSymbolic"]
            .as_str()
            .unwrap_or(if dir { "rwxr-xr-x" } else { "rw-r--r--" })
            .to_string();
        files.unix.insert(
            path,
            MockNode {
                dir,
                content: Vec::new(),
                perms,
                owner: "IBMUSER".to_string(),
                group: "OMVSGRP".to_string(),
            },
        );
        StatusCode::CREATED.into_response()
    } else if method == axum::http::Method::PUT {
        let body = body.unwrap_or_default();
        let node = match files.unix.get_mut(&path) {
            Some(node) => node,
            None => return rse_error(StatusCode::NOT_FOUND, "path does not exist"),
        };
        match body["request"].as_str() {
            Some("chmod") => {
                if let Some(perms) = body["permissionsSymbolic"].as_str() {
                    node.perms = perms.to_string();
                }
                StatusCode::OK.into_response()
            }
            Some("chown") => {
                if let Some(owner) = body["owner"].as_str() {
                    node.owner = owner.to_string();
                }
                if let Some(group) = body["group"].as_str() {
                    node.group = group.to_string();
                }
                StatusCode::OK.into_response()
            }
            _ => rse_error(StatusCode::BAD_REQUEST, "unknown request"),
        }
    } else if method == axum::http::Method::DELETE {
        let recursive = query.get("recursive").map(|v| v == "true").unwrap_or(false);
        let node = match files.unix.get(&path) {
            Some(node) => node.clone(),
            None => return rse_error(StatusCode::NOT_FOUND, "path does not exist"),
        };
        if node.dir {
            let has_children = children(&files, &path)
                .map(|c| !c.is_empty())
                .unwrap_or(false);
            if has_children && !recursive {
                return rse_error(StatusCode::BAD_REQUEST, "directory is not empty");
            }
            let prefix = format!("{}/", path);
            files
                .unix
                .retain(|p, _| p != &path && !p.starts_with(&prefix));
        } else {
            files.unix.remove(&path);
        }
        StatusCode::NO_CONTENT.into_response()
    } else {
        rse_error(StatusCode::METHOD_NOT_ALLOWED, "unsupported")
    }
}

async fn unix_content(
    State(state): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
    method: axum::http::Method,
    body: Option<serde_json::Value>,
) -> axum::response::Response {
    let path = match query.get("path") {
        Some(path) => path.clone(),
        None => return rse_error(StatusCode::BAD_REQUEST, "missing path"),
    };
    let binary = query.get("binary").map(|v| v == "true").unwrap_or(false);
    let mut files = state.lock().unwrap();

    if method == axum::http::Method::GET {
        let node = match files.unix.get(&path) {
            Some(node) => node,
            None => return rse_error(StatusCode::NOT_FOUND, "path does not exist"),
        };
        let content = if binary {
            base64::engine::general_purpose::STANDARD.encode(&node.content)
        } else {
            String::from_utf8_lossy(&node.content).to_string()
        };
        return Json(serde_json::json!({ "content": content })).into_response();
    }

    // PUT: create-on-write.
    let raw = body
        .as_ref()
        .and_then(|b| b["content"].as_str())
        .unwrap_or_default();
    let content = if binary {
        match base64::engine::general_purpose::STANDARD.decode(raw.as_bytes()) {
            Ok(bytes) => bytes,
            Err(_) => return rse_error(StatusCode::BAD_REQUEST, "invalid base64"),
        }
    } else {
        raw.as_bytes().to_vec()
    };
    match files.unix.get_mut(&path) {
        Some(node) => {
            node.content = content;
            StatusCode::NO_CONTENT.into_response()
        }
        None => {
            files.unix.insert(
                path,
                MockNode {
                    dir: false,
                    content,
                    perms: "rw-r--r--".to_string(),
                    owner: "IBMUSER".to_string(),
                    group: "OMVSGRP".to_string(),
                },
            );
            StatusCode::CREATED.into_response()
        }
    }
}

// ─── Miniature IDCAMS ───

fn paren_value(input: &str, keyword: &str) -> Option<String> {
    let start = input.find(&format!("{}(", keyword))? + keyword.len() + 1;
    let end = input[start..].find(')')? + start;
    Some(input[start..end].to_string())
}

async fn ams(State(state): State<Shared>, Json(body): Json<serde_json::Value>) -> impl IntoResponse {
    let lines: Vec<String> = body["input"]
        .as_array()
        .map(|a| {
            a.iter()
                .filter_map(|v| v.as_str())
                .map(|s| s.trim_end_matches('-').trim().to_string())
                .collect()
        })
        .unwrap_or_default();
    let input = lines.join(" ");
    let mut files = state.lock().unwrap();

    let (return_code, output) = if input.starts_with("DEFINE CLUSTER") {
        match paren_value(&input, "NAME") {
            Some(name) if files.datasets.contains_key(&name) => {
                (12, format!("IDC3013I DUPLICATE DATA SET NAME {}", name))
            }
            Some(name) => {
                files.datasets.insert(name.clone(), MockDataset::vsam());
                (0, format!("IDC0001I DEFINE CLUSTER - {}", name))
            }
            None => (12, "IDC3203I ITEM 'NAME' REQUIRED".to_string()),
        }
    } else if input.starts_with("DELETE") {
        let name = input
            .split_whitespace()
            .nth(1)
            .unwrap_or_default()
            .to_string();
        if files.datasets.remove(&name).is_some() {
            (0, format!("IDC0550I ENTRY (C) {} DELETED", name))
        } else {
            (8, format!("IDC3012I ENTRY {} NOT FOUND", name))
        }
    } else if input.starts_with("REPRO") {
        let from = paren_value(&input, "INDATASET");
        let to = paren_value(&input, "OUTDATASET");
        match (from, to) {
            (Some(from), Some(to)) => {
                let content = files.datasets.get(&from).map(|d| d.content.clone());
                match (content, files.datasets.contains_key(&to)) {
                    (Some(content), true) => {
                        files.datasets.get_mut(&to).unwrap().content = content;
                        (0, format!("IDC0001I REPRO - {} TO {}", from, to))
                    }
                    (None, _) => (12, format!("IDC3002E REPRO FAILED - {} NOT FOUND", from)),
                    (_, false) => (12, format!("IDC3002E REPRO FAILED - {} NOT FOUND", to)),
                }
            }
            _ => (12, "IDC3203I REPRO REQUIRES INDATASET AND OUTDATASET".to_string()),
        }
    } else {
        (16, format!("IDC3211I UNKNOWN COMMAND: {}", input))
    };

    Json(serde_json::json!({ "returnCode": return_code, "output": output }))
}

// ─── Harness ───

async fn start_gateway() -> (String, Shared) {
    let mut unix = BTreeMap::new();
    unix.insert(
        "/".to_string(),
        MockNode {
            dir: true,
            content: Vec::new(),
            perms: "rwxr-xr-x".to_string(),
            owner: "IBMUSER".to_string(),
            group: "OMVSGRP".to_string(),
        },
    );
    let state: Shared = Arc::new(Mutex::new(MockFiles {
        datasets: BTreeMap::new(),
        unix,
    }));

    let unix_entry = |method: axum::http::Method| {
        move |state: State<Shared>,
              query: Query<HashMap<String, String>>,
              body: Option<Json<serde_json::Value>>| async move {
            unix_entry_routes(state, query, method, body.map(|Json(v)| v)).await
        }
    };
    let content_route = |method: axum::http::Method| {
        move |state: State<Shared>,
              query: Query<HashMap<String, String>>,
              body: Option<Json<serde_json::Value>>| async move {
            unix_content(state, query, method, body.map(|Json(v)| v)).await
        }
    };

    let app = Router::new()
        .route("/rseapi/api/v1/datasets", get(dataset_list))
        .route(
            "/rseapi/api/v1/datasets/{dsn}",
            axum::routing::post(dataset_create).delete(dataset_delete),
        )
        .route(
            "/rseapi/api/v1/datasets/{dsn}/content",
            get(dataset_read).put(dataset_write),
        )
        .route("/rseapi/api/v1/datasets/{dsn}/members", get(member_list))
        .route(
            "/rseapi/api/v1/unixfiles",
            get(unix_entry(axum::http::Method::GET))
                .post(unix_entry(axum::http::Method::POST))
                .put(unix_entry(axum::http::Method::PUT))
                .delete(unix_entry(axum::http::Method::DELETE)),
        )
        .route(
            "/rseapi/api/v1/unixfiles/content",
            get(content_route(axum::http::Method::GET)).put(content_route(axum::http::Method::PUT)),
        )
        .route("/rseapi/api/v1/ams", put(ams))
        .with_state(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    (format!("http://{}", addr), state)
}

fn files_manager(base_url: &str) -> ZosFiles {
    let client =
        RestClient::with_base_url(base_url.to_string(), Credentials::basic("IBMUSER", "SYS1"))
            .expect("client");
    ZosFiles::rseapi(client, FileConfig::default())
}

// ─── Tests ───

#[tokio::test]
async fn test_dataset_lifecycle() {
    let (base, _state) = start_gateway().await;
    let files = files_manager(&base);
    let mut handler = files.handler();

    let dataset = handler
        .create_dataset("ibmuser.zosgate.data", &DatasetAttributes::default())
        .await
        .expect("create");
    assert_eq!(dataset.name(), "IBMUSER.ZOSGATE.DATA");
    assert!(dataset.exists().await.expect("exists"));

    dataset
        .store_text("HELLO FROM ZOSGATE\n")
        .await
        .expect("store");
    let content = dataset.retrieve_text().await.expect("retrieve");
    assert_eq!(content, "HELLO FROM ZOSGATE\n");

    let info = dataset.attributes().await.expect("attributes");
    assert_eq!(info.org.as_deref(), Some("PS"));
    assert_eq!(info.recfm.as_deref(), Some("FB"));
    assert_eq!(info.lrecl, Some(80));

    dataset.delete().await.expect("delete");
    assert!(!dataset.exists().await.expect("exists"));
}

#[tokio::test]
async fn test_create_existing_dataset_fails() {
    let (base, _state) = start_gateway().await;
    let files = files_manager(&base);
    let mut handler = files.handler();

    handler
        .create_dataset("IBMUSER.DUP", &DatasetAttributes::default())
        .await
        .expect("create");
    let err = handler
        .create_dataset("IBMUSER.DUP", &DatasetAttributes::default())
        .await
        .unwrap_err();
    assert!(matches!(err, FileError::DatasetExists(_)));
}

#[tokio::test]
async fn test_invalid_dataset_name_rejected_before_any_request() {
    let (base, state) = start_gateway().await;
    let files = files_manager(&base);
    let handler = files.handler();

    let err = handler.dataset("BAD..NAME").unwrap_err();
    assert!(matches!(err, FileError::Name(_)));
    assert!(state.lock().unwrap().datasets.is_empty());
}

#[tokio::test]
async fn test_member_operations() {
    let (base, _state) = start_gateway().await;
    let files = files_manager(&base);
    let mut handler = files.handler();

    let pds = handler
        .create_dataset("IBMUSER.JCLLIB", &DatasetAttributes::partitioned(10))
        .await
        .expect("create");

    pds.member_store("payroll", "//PAYROLL JOB\n")
        .await
        .expect("store");
    pds.member_store("REPORT", "//REPORT JOB\n")
        .await
        .expect("store");

    let members = pds.member_list().await.expect("list");
    assert_eq!(members, vec!["PAYROLL", "REPORT"]);
    assert!(pds.member_exists("PAYROLL").await.expect("exists"));
    assert!(!pds.member_exists("MISSING").await.expect("exists"));

    let content = pds.member_retrieve("PAYROLL").await.expect("retrieve");
    assert_eq!(content, "//PAYROLL JOB\n");

    pds.member_delete("PAYROLL").await.expect("delete");
    assert!(!pds.member_exists("PAYROLL").await.expect("exists"));

    let err = pds.member_retrieve("PAYROLL").await.unwrap_err();
    assert!(matches!(err, FileError::DatasetNotFound(_)));
}

#[tokio::test]
async fn test_binary_content_round_trip() {
    let (base, _state) = start_gateway().await;
    let files = files_manager(&base);
    let mut handler = files.handler();

    let dataset = handler
        .create_dataset("IBMUSER.BINARY", &DatasetAttributes::default())
        .await
        .expect("create");

    let payload: Vec<u8> = (0u8..=255).collect();
    dataset.store_binary(&payload).await.expect("store");
    let round_trip = dataset.retrieve_binary().await.expect("retrieve");
    assert_eq!(round_trip, payload);
}

#[tokio::test]
async fn test_unix_file_lifecycle() {
    let (base, _state) = start_gateway().await;
    let files = files_manager(&base);
    let mut handler = files.handler();

    let dir = handler
        .create_unix_directory("/zgtest")
        .await
        .expect("mkdir");
    let file = handler
        .create_unix_file("/zgtest/hello.txt")
        .await
        .expect("create");

    assert!(file.exists().await.expect("exists"));
    file.store_text("hello uss\n").await.expect("store");
    assert_eq!(file.retrieve_text().await.expect("retrieve"), "hello uss\n");

    let attrs = file.attributes().await.expect("attributes").expect("present");
    assert_eq!(attrs.file_type, UnixFileType::File);
    assert_eq!(attrs.permissions, "rw-r--r--");
    assert_eq!(attrs.size, 10);
    assert_eq!(attrs.user, "IBMUSER");

    file.chmod("rwxr-x---").await.expect("chmod");
    let attrs = file.attributes().await.expect("attributes").expect("present");
    assert_eq!(attrs.permissions, "rwxr-x---");

    file.chown("TESTER", Some("DEVGRP")).await.expect("chown");
    let attrs = file.attributes().await.expect("attributes").expect("present");
    assert_eq!(attrs.user, "TESTER");
    assert_eq!(attrs.group, "DEVGRP");

    let entries = dir.list_directory().await.expect("list");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "hello.txt");
}

#[tokio::test]
async fn test_unix_delete_semantics() {
    let (base, _state) = start_gateway().await;
    let files = files_manager(&base);
    let mut handler = files.handler();

    let dir = handler.create_unix_directory("/deltest").await.expect("mkdir");
    handler
        .create_unix_file("/deltest/a.txt")
        .await
        .expect("create");

    // Non-recursive delete of a populated directory is refused.
    let err = dir.delete().await.unwrap_err();
    assert!(matches!(err, FileError::Client(_)));

    dir.delete_recursive().await.expect("delete");
    assert!(!dir.exists().await.expect("exists"));

    // Deleting again reports not-found.
    let err = dir.delete_recursive().await.unwrap_err();
    assert!(matches!(err, FileError::UnixNotFound(_)));
}

#[tokio::test]
async fn test_relative_unix_path_rejected() {
    let (base, _state) = start_gateway().await;
    let files = files_manager(&base);
    let handler = files.handler();

    let err = handler.unix_file("relative/path.txt").unwrap_err();
    assert!(matches!(err, FileError::Name(_)));
}

#[tokio::test]
async fn test_vsam_define_store_retrieve() {
    let (base, state) = start_gateway().await;
    let files = files_manager(&base);
    let mut handler = files.handler();

    let vsam = handler
        .create_vsam("IBMUSER.VSAM.KSDS", VsamDefinition::ksds(8, 0))
        .await
        .expect("define");
    assert!(vsam.exists().await.expect("exists"));

    handler
        .vsam_store_text(&vsam, "KEY00001 RECORD ONE\n")
        .await
        .expect("store");
    let content = handler.vsam_retrieve_text(&vsam).await.expect("retrieve");
    assert_eq!(content, "KEY00001 RECORD ONE\n");

    // REPRO staging datasets are deleted behind the scenes.
    let leftovers: Vec<String> = state
        .lock()
        .unwrap()
        .datasets
        .keys()
        .filter(|name| name.starts_with("ZOSGATE."))
        .cloned()
        .collect();
    assert!(leftovers.is_empty(), "scratch left behind: {:?}", leftovers);
}

#[tokio::test]
async fn test_vsam_duplicate_define_fails() {
    let (base, _state) = start_gateway().await;
    let files = files_manager(&base);
    let mut handler = files.handler();

    handler
        .create_vsam("IBMUSER.VSAM.DUP", VsamDefinition::ksds(4, 0))
        .await
        .expect("define");
    let err = handler
        .create_vsam("IBMUSER.VSAM.DUP", VsamDefinition::ksds(4, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, FileError::DatasetExists(_)));
}

#[tokio::test]
async fn test_vsam_delete_missing_cluster() {
    let (base, _state) = start_gateway().await;
    let files = files_manager(&base);
    let handler = files.handler();

    let vsam = handler
        .vsam("IBMUSER.VSAM.GONE", VsamDefinition::esds())
        .expect("handle");
    let err = vsam.delete().await.unwrap_err();
    assert!(matches!(err, FileError::DatasetNotFound(_)));
}

#[tokio::test]
async fn test_cleanup_removes_artifacts_in_reverse_order() {
    let (base, state) = start_gateway().await;
    let files = files_manager(&base);
    let mut handler = files.handler();

    handler
        .create_dataset("IBMUSER.CLEANUP.DATA", &DatasetAttributes::default())
        .await
        .expect("create");
    handler
        .create_vsam("IBMUSER.CLEANUP.VSAM", VsamDefinition::ksds(4, 0))
        .await
        .expect("define");
    handler.create_unix_directory("/cleanup").await.expect("mkdir");
    handler
        .create_unix_file("/cleanup/inner.txt")
        .await
        .expect("create");
    assert_eq!(handler.artifacts().len(), 4);

    let leftover = handler.cleanup().await.expect("cleanup");
    assert!(leftover.is_empty());
    assert!(handler.artifacts().is_empty());

    let files_state = state.lock().unwrap();
    assert!(files_state.datasets.is_empty());
    // Only the root directory survives.
    assert_eq!(files_state.unix.len(), 1);
}

#[tokio::test]
async fn test_cleanup_tolerates_already_deleted_artifacts() {
    let (base, _state) = start_gateway().await;
    let files = files_manager(&base);
    let mut handler = files.handler();

    let dataset = handler
        .create_dataset("IBMUSER.PREGONE", &DatasetAttributes::default())
        .await
        .expect("create");
    dataset.delete().await.expect("delete");

    let leftover = handler.cleanup().await.expect("cleanup");
    assert!(leftover.is_empty());
}
