//! End-to-end RSE API batch tests: the manager against an in-process mock
//! gateway implementing the `/rseapi/api/v1/jobs` contract.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use zosgate::{BatchConfig, Credentials, RestClient};
use zosgate_batch::{JobStatus, Jobname, ZosBatch};

// ─── Mock RSE API jobs gateway ───

#[derive(Clone)]
struct MockJob {
    jobname: String,
    jobid: String,
    /// ACTIVE, COMPLETION, or ABEND.
    status: String,
    return_code: Option<String>,
}

struct MockRse {
    jobs: Vec<MockJob>,
    next_id: u32,
}

type SharedRse = Arc<Mutex<MockRse>>;

fn job_json(job: &MockJob) -> serde_json::Value {
    serde_json::json!({
        "jobName": job.jobname,
        "jobId": job.jobid,
        "owner": "IBMUSER",
        "status": job.status,
        "type": "JOB",
        "class": "A",
        "returnCode": job.return_code,
        "subsystem": "JES2"
    })
}

fn rse_not_found(message: &str) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "status": "NOT_FOUND", "message": message })),
    )
}

async fn submit(State(state): State<SharedRse>, Json(body): Json<serde_json::Value>) -> impl IntoResponse {
    let jcl = body["jcl"].as_str().unwrap_or_default();
    let jobname = jcl
        .lines()
        .find(|l| l.starts_with("//") && !l.starts_with("//*"))
        .and_then(|l| l[2..].split_whitespace().next())
        .unwrap_or("NONAME")
        .to_uppercase();

    // JCL asking for an abend completes with an abend code.
    let abend = jcl.contains("ABENDME");

    let mut rse = state.lock().unwrap();
    let jobid = format!("JOB{:05}", rse.next_id);
    rse.next_id += 1;
    let job = MockJob {
        jobname,
        jobid,
        status: if abend { "ABEND".to_string() } else { "COMPLETION".to_string() },
        return_code: Some(if abend { "ABEND S0C4" } else { "CC 0000" }.to_string()),
    };
    rse.jobs.push(job.clone());

    // Submit responses report the job still on the queue.
    let mut submitted = job_json(&job);
    submitted["status"] = serde_json::json!("HOLD");
    submitted["returnCode"] = serde_json::Value::Null;
    (StatusCode::CREATED, Json(submitted))
}

async fn status(
    State(state): State<SharedRse>,
    Path((jobname, jobid)): Path<(String, String)>,
) -> impl IntoResponse {
    let rse = state.lock().unwrap();
    match rse
        .jobs
        .iter()
        .find(|j| j.jobname == jobname && j.jobid == jobid)
    {
        Some(job) => Json(job_json(job)).into_response(),
        None => rse_not_found("job does not exist").into_response(),
    }
}

async fn list(State(state): State<SharedRse>) -> impl IntoResponse {
    let rse = state.lock().unwrap();
    let items: Vec<serde_json::Value> = rse.jobs.iter().map(job_json).collect();
    Json(serde_json::json!({ "items": items }))
}

async fn spool_files(
    State(state): State<SharedRse>,
    Path((jobname, jobid)): Path<(String, String)>,
) -> impl IntoResponse {
    let rse = state.lock().unwrap();
    if !rse
        .jobs
        .iter()
        .any(|j| j.jobname == jobname && j.jobid == jobid)
    {
        return rse_not_found("job does not exist").into_response();
    }
    Json(serde_json::json!({
        "items": [
            { "id": 0, "ddName": "JESMSGLG", "stepName": null, "procStep": null, "recordCount": 4 },
            { "id": 1, "ddName": "SYSOUT", "stepName": "STEP1", "procStep": null, "recordCount": 1 }
        ]
    }))
    .into_response()
}

async fn spool_content(
    State(_state): State<SharedRse>,
    Path((jobname, _jobid, file_id)): Path<(String, String, u32)>,
) -> impl IntoResponse {
    Json(serde_json::json!({
        "content": format!("SPOOL FILE {} FOR {}\n", file_id, jobname)
    }))
}

async fn cancel(
    State(state): State<SharedRse>,
    Path((jobname, jobid)): Path<(String, String)>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    assert_eq!(body["request"], "cancel");
    let mut rse = state.lock().unwrap();
    match rse
        .jobs
        .iter_mut()
        .find(|j| j.jobname == jobname && j.jobid == jobid)
    {
        Some(job) => {
            job.status = "COMPLETION".to_string();
            job.return_code = Some("ABEND S222".to_string());
            StatusCode::OK.into_response()
        }
        None => rse_not_found("job does not exist").into_response(),
    }
}

async fn purge(
    State(state): State<SharedRse>,
    Path((jobname, jobid)): Path<(String, String)>,
) -> impl IntoResponse {
    let mut rse = state.lock().unwrap();
    let before = rse.jobs.len();
    rse.jobs
        .retain(|j| !(j.jobname == jobname && j.jobid == jobid));
    if rse.jobs.len() == before {
        rse_not_found("job does not exist").into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

async fn start_gateway() -> (String, SharedRse) {
    let state: SharedRse = Arc::new(Mutex::new(MockRse {
        jobs: Vec::new(),
        next_id: 1,
    }));
    let app = Router::new()
        .route("/rseapi/api/v1/jobs", post(submit).get(list))
        .route(
            "/rseapi/api/v1/jobs/{jobname}/{jobid}",
            get(status).put(cancel).delete(purge),
        )
        .route(
            "/rseapi/api/v1/jobs/{jobname}/{jobid}/files",
            get(spool_files),
        )
        .route(
            "/rseapi/api/v1/jobs/{jobname}/{jobid}/files/{file_id}/content",
            get(spool_content),
        )
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

fn manager(base_url: &str) -> ZosBatch {
    let client =
        RestClient::with_base_url(base_url.to_string(), Credentials::basic("IBMUSER", "SYS1"))
            .expect("client");
    let config = BatchConfig {
        poll_interval_seconds: 0,
        poll_timeout_seconds: 10,
        ..BatchConfig::default()
    };
    ZosBatch::rseapi(client, config)
}

const STEP_ONLY_JCL: &str = "//STEP1    EXEC PGM=IEFBR14\n";

// ─── Tests ───

#[tokio::test]
async fn test_submit_reports_queued_then_completes() {
    let (base, _state) = start_gateway().await;
    let mut batch = manager(&base);

    let mut job = batch.submit(STEP_ONLY_JCL, None).await.expect("submit");
    // HOLD on the submit response maps to the input queue.
    assert_eq!(job.status(), JobStatus::Input);
    assert!(job.retcode().is_none());

    let status = job.wait_for_completion().await.expect("wait");
    assert_eq!(status, JobStatus::Output);
    assert_eq!(job.retcode(), Some("CC 0000"));
}

#[tokio::test]
async fn test_abend_maps_to_output_with_abend_code() {
    let (base, _state) = start_gateway().await;
    let mut batch = manager(&base);

    let jcl = "//ABJOB    JOB (ACCT)\n//* ABENDME\n//STEP1 EXEC PGM=BAD\n";
    let mut job = batch.submit(jcl, None).await.expect("submit");
    let status = job.wait_for_completion().await.expect("wait");
    assert_eq!(status, JobStatus::Output);
    assert_eq!(job.retcode(), Some("ABEND S0C4"));
}

#[tokio::test]
async fn test_spool_output_uses_content_envelope() {
    let (base, _state) = start_gateway().await;
    let mut batch = manager(&base);

    let mut job = batch.submit(STEP_ONLY_JCL, None).await.expect("submit");
    job.wait_for_completion().await.expect("wait");

    let output = job.output().await.expect("output");
    assert_eq!(output.files.len(), 2);
    assert_eq!(output.files[0].ddname, "JESMSGLG");
    assert!(output.files[0]
        .content
        .contains(&format!("SPOOL FILE 0 FOR {}", job.jobname())));
    assert_eq!(output.files[1].stepname.as_deref(), Some("STEP1"));
}

#[tokio::test]
async fn test_cancel_and_purge() {
    let (base, state) = start_gateway().await;
    let mut batch = manager(&base);

    let mut job = batch
        .submit(STEP_ONLY_JCL, Some(Jobname::new("KILLME").unwrap()))
        .await
        .expect("submit");
    job.cancel().await.expect("cancel");
    let status = job.refresh_status().await.expect("refresh");
    assert_eq!(status, JobStatus::Output);
    assert_eq!(job.retcode(), Some("ABEND S222"));

    job.purge().await.expect("purge");
    assert!(state.lock().unwrap().jobs.is_empty());
    assert_eq!(job.refresh_status().await.expect("refresh"), JobStatus::NotFound);
}

#[tokio::test]
async fn test_list_uses_items_envelope() {
    let (base, _state) = start_gateway().await;
    let mut batch = manager(&base);

    batch
        .submit(STEP_ONLY_JCL, Some(Jobname::new("LISTA").unwrap()))
        .await
        .expect("submit");
    batch
        .submit(STEP_ONLY_JCL, Some(Jobname::new("LISTB").unwrap()))
        .await
        .expect("submit");

    let jobs = batch.list("*", "*").await.expect("list");
    assert_eq!(jobs.len(), 2);
    assert!(jobs.iter().all(|j| j.owner == "IBMUSER"));
}
