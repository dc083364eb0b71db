use crate::infra::{deserialize_optional_policy, AppState};
use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use gradebook::error::AppError;
use gradebook::gpa::{ComputedSemester, ConversionPolicy, Course, GpaEngine, Semester};
use gradebook::records::{gradebook_router, GradebookRepository, GradebookService};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct SemesterGpaRequest {
    pub(crate) courses: Vec<Course>,
    #[serde(default, deserialize_with = "deserialize_optional_policy")]
    pub(crate) policy: Option<ConversionPolicy>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SemesterGpaResponse {
    pub(crate) policy: ConversionPolicy,
    #[serde(flatten)]
    pub(crate) result: ComputedSemester,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) letter_grade: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CumulativeGpaRequest {
    pub(crate) semesters: Vec<Semester>,
    #[serde(default, deserialize_with = "deserialize_optional_policy")]
    pub(crate) policy: Option<ConversionPolicy>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CumulativeGpaResponse {
    pub(crate) policy: ConversionPolicy,
    pub(crate) cumulative_gpa10: f64,
    pub(crate) cumulative_gpa4: f64,
    pub(crate) total_credits: u64,
    pub(crate) semesters: Vec<ComputedSemester>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConvertQuery {
    #[serde(default)]
    pub(crate) score10: Option<f64>,
    #[serde(default)]
    pub(crate) score4: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_policy")]
    pub(crate) policy: Option<ConversionPolicy>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "direction", rename_all = "snake_case")]
pub(crate) enum ConvertResponse {
    TenToFour {
        policy: ConversionPolicy,
        score10: f64,
        score4: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        letter_grade: Option<&'static str>,
    },
    FourToTen {
        policy: ConversionPolicy,
        score4: f64,
        score10: String,
    },
}

pub(crate) fn with_gpa_routes<R>(service: Arc<GradebookService<R>>) -> axum::Router
where
    R: GradebookRepository + 'static,
{
    let engine = service.engine();
    gradebook_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/gpa/semester",
            axum::routing::post(semester_gpa_endpoint),
        )
        .route(
            "/api/v1/gpa/cumulative",
            axum::routing::post(cumulative_gpa_endpoint),
        )
        .route("/api/v1/gpa/convert", axum::routing::get(convert_endpoint))
        .layer(Extension(engine))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn semester_gpa_endpoint(
    Extension(engine): Extension<GpaEngine>,
    Json(payload): Json<SemesterGpaRequest>,
) -> Result<Json<SemesterGpaResponse>, AppError> {
    let SemesterGpaRequest { courses, policy } = payload;
    let engine = policy.map_or(engine, |policy| engine.with_policy(policy));

    let result = engine.semester(&courses)?;
    let letter_grade = engine.policy().letter_grade(result.semester_gpa10);

    Ok(Json(SemesterGpaResponse {
        policy: engine.policy(),
        result,
        letter_grade,
    }))
}

pub(crate) async fn cumulative_gpa_endpoint(
    Extension(engine): Extension<GpaEngine>,
    Json(payload): Json<CumulativeGpaRequest>,
) -> Result<Json<CumulativeGpaResponse>, AppError> {
    let CumulativeGpaRequest { semesters, policy } = payload;
    let engine = policy.map_or(engine, |policy| engine.with_policy(policy));

    let (computed, cumulative_gpa10) = engine.cumulative(&semesters)?;

    Ok(Json(CumulativeGpaResponse {
        policy: engine.policy(),
        cumulative_gpa10,
        cumulative_gpa4: engine.policy().gpa_to_four(cumulative_gpa10),
        total_credits: gradebook::gpa::total_credits(&semesters),
        semesters: computed,
    }))
}

pub(crate) async fn convert_endpoint(
    Extension(engine): Extension<GpaEngine>,
    Query(query): Query<ConvertQuery>,
) -> Result<Json<ConvertResponse>, (StatusCode, Json<serde_json::Value>)> {
    let policy = query.policy.unwrap_or_else(|| engine.policy());

    match (query.score10, query.score4) {
        (Some(score10), None) => Ok(Json(ConvertResponse::TenToFour {
            policy,
            score10,
            score4: policy.to_four(score10),
            letter_grade: policy.letter_grade(score10),
        })),
        (None, Some(score4)) => Ok(Json(ConvertResponse::FourToTen {
            policy,
            score4,
            score10: policy.to_ten(score4).to_string(),
        })),
        _ => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "provide exactly one of score10 or score4" })),
        )),
    }
}
