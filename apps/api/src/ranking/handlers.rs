//! Axum route handlers for the Ranking API.

use axum::{
    extract::{rejection::JsonRejection, Multipart, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::extract_text;
use crate::models::ranking::{CategoryBuckets, LeaderboardRow, RankedResult};
use crate::ranking::engine::{leaderboard, partition, ResumeInput};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RankRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub job_description: String,
    #[serde(default, deserialize_with = "lenient_resumes")]
    pub resumes: Vec<ResumePayload>,
    pub top_n: Option<usize>,
}

/// One resume entry. A missing or non-string filename is `None`; the handler
/// names it by position.
#[derive(Debug, Default, PartialEq)]
pub struct ResumePayload {
    pub filename: Option<String>,
    pub text: String,
}

impl ResumePayload {
    fn from_value(value: &Value) -> Self {
        ResumePayload {
            filename: value
                .get("filename")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string),
            text: value
                .get("text")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// A file left out of the batch because its text could not be extracted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedFile {
    pub filename: String,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct RankResponse {
    pub run_id: Uuid,
    pub ranked_at: DateTime<Utc>,
    pub total: usize,
    pub ranked: RankedResult,
    #[serde(flatten)]
    pub buckets: CategoryBuckets,
    pub top: Vec<LeaderboardRow>,
    pub skipped: Vec<SkippedFile>,
}

/// Non-string text (null, numbers, objects) is read as an empty string.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// Every array element becomes an entry, whatever its shape. A non-array is
/// read as no resumes.
fn lenient_resumes<'de, D>(deserializer: D) -> Result<Vec<ResumePayload>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.iter().map(ResumePayload::from_value).collect(),
        _ => Vec::new(),
    })
}

/// Name used for a resume that arrived without a filename. `position` is 1-based.
fn fallback_filename(position: usize) -> String {
    format!("resume-{position}")
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/rank
///
/// Ranks already-extracted resume texts against a job description.
pub async fn handle_rank(
    State(state): State<AppState>,
    payload: Result<Json<RankRequest>, JsonRejection>,
) -> Result<Json<RankResponse>, AppError> {
    let Json(request) = payload?;
    check_batch_size(&state, request.resumes.len())?;

    let resumes: Vec<ResumeInput> = request
        .resumes
        .into_iter()
        .enumerate()
        .map(|(i, r)| {
            let filename = r.filename.unwrap_or_else(|| fallback_filename(i + 1));
            ResumeInput::new(filename, r.text)
        })
        .collect();

    let response = run_ranking(
        &state,
        &request.job_description,
        &resumes,
        request.top_n,
        Vec::new(),
    );
    Ok(Json(response))
}

/// POST /api/v1/rank/upload
///
/// Multipart form: `job_description` (text), optional `top_n`, and one or more
/// `resumes` file fields. Files that fail extraction are listed in `skipped`
/// and do not count toward the per-request resume limit.
pub async fn handle_rank_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<RankResponse>, AppError> {
    let mut job_description = String::new();
    let mut top_n = None;
    let mut uploads = 0usize;
    let mut resumes = Vec::new();
    let mut skipped = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "job_description" => job_description = field.text().await?,
            "top_n" => {
                let raw = field.text().await?;
                let parsed = raw.trim().parse::<usize>().map_err(|_| {
                    AppError::Validation(format!("top_n must be a positive integer, got '{raw}'"))
                })?;
                top_n = Some(parsed);
            }
            "resumes" => {
                uploads += 1;

                let filename = field
                    .file_name()
                    .map(str::trim)
                    .filter(|f| !f.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| fallback_filename(uploads));
                let bytes = field.bytes().await?;

                match extract_text(&filename, bytes.to_vec()).await {
                    Ok(text) => {
                        resumes.push(ResumeInput::new(filename, text));
                        check_batch_size(&state, resumes.len())?;
                    }
                    Err(e) => {
                        warn!("Skipping {filename}: {e}");
                        skipped.push(SkippedFile {
                            filename,
                            reason: e.to_string(),
                        });
                    }
                }
            }
            other => debug!("Ignoring unknown multipart field '{other}'"),
        }
    }

    if uploads == 0 {
        return Err(AppError::Validation(
            "at least one resume file is required".to_string(),
        ));
    }
    if resumes.is_empty() {
        return Err(AppError::UnprocessableEntity(format!(
            "no text could be extracted from {uploads} uploaded file(s)"
        )));
    }

    Ok(Json(run_ranking(
        &state,
        &job_description,
        &resumes,
        top_n,
        skipped,
    )))
}

fn check_batch_size(state: &AppState, count: usize) -> Result<(), AppError> {
    if count == 0 {
        return Err(AppError::Validation(
            "at least one resume is required".to_string(),
        ));
    }
    if count > state.config.max_resumes {
        return Err(AppError::Validation(format!(
            "at most {} resumes can be ranked per request",
            state.config.max_resumes
        )));
    }
    Ok(())
}

fn run_ranking(
    state: &AppState,
    job_description: &str,
    resumes: &[ResumeInput],
    top_n: Option<usize>,
    skipped: Vec<SkippedFile>,
) -> RankResponse {
    let run_id = Uuid::new_v4();
    let _span = info_span!("rank", %run_id).entered();

    let n = state.config.clamp_top_n(top_n);
    let ranked = state.engine.rank(job_description, resumes);
    let buckets = partition(&ranked);
    let top = leaderboard(&ranked, n);

    info!(
        "Run complete: {} ranked, {} skipped, high={} medium={} low={}",
        ranked.len(),
        skipped.len(),
        buckets.high.len(),
        buckets.medium.len(),
        buckets.low.len()
    );

    RankResponse {
        run_id,
        ranked_at: Utc::now(),
        total: ranked.len(),
        ranked,
        buckets,
        top,
        skipped,
    }
}
