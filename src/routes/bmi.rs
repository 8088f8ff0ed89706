//! Handlers for BMI evaluation and the category reference table.

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query},
    Extension, Json,
};
use serde::Serialize;
use tracing::instrument;

use crate::bmi::{BmiResult, Category};
use crate::error::{AppErrorResponse, ResultExt, ValidationError};
use crate::extract::{MeasurementInput, QueryParams};
use crate::middleware::RequestId;

const INVALID_QUERY_DETAIL: &str = "invalid query string";

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T> Envelope<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CategorySummary {
    pub code: &'static str,
    pub level: &'static str,
    pub description: &'static str,
}

impl From<Category> for CategorySummary {
    fn from(category: Category) -> Self {
        Self {
            code: category.code(),
            level: category.label(),
            description: category.description(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub weight: f64,
    /// Height in meters
    pub height: f64,
    pub bmi: f64,
    pub category: CategorySummary,
    pub health_tips: &'static [&'static str],
    pub message: String,
}

impl From<BmiResult> for Evaluation {
    fn from(result: BmiResult) -> Self {
        Self {
            weight: result.weight_kg,
            height: result.height_m,
            bmi: result.bmi,
            category: result.category.into(),
            health_tips: result.category.advice(),
            message: result.summary(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryEntry {
    pub code: &'static str,
    pub level: &'static str,
    pub description: &'static str,
    /// Inclusive lower bound
    pub min_bmi: f64,
    /// Exclusive upper bound, absent for the highest band
    pub max_bmi: Option<f64>,
    pub health_tips: &'static [&'static str],
}

impl From<Category> for CategoryEntry {
    fn from(category: Category) -> Self {
        Self {
            code: category.code(),
            level: category.label(),
            description: category.description(),
            min_bmi: category.lower_bound(),
            max_bmi: category.upper_bound(),
            health_tips: category.advice(),
        }
    }
}

fn respond(
    input: MeasurementInput,
    request_id: &RequestId,
) -> Result<Json<Envelope<Evaluation>>, AppErrorResponse> {
    let result = input.evaluate().with_request_id(request_id)?;

    tracing::debug!(
        bmi = result.bmi,
        category = result.category.code(),
        "Evaluated BMI"
    );

    Ok(Envelope::ok(result.into()))
}

/// `GET /api/bmi?weight=..&height=..&unit=..`
#[instrument(name = "bmi::from_query", skip(request_id, query))]
pub async fn from_query(
    Extension(request_id): Extension<RequestId>,
    query: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Json<Envelope<Evaluation>>, AppErrorResponse> {
    let Query(params) = query
        .map_err(|e| {
            tracing::debug!(error = %e.body_text(), "Rejected query string");
            ValidationError::MalformedRequestBody(INVALID_QUERY_DETAIL.to_string())
        })
        .with_request_id(&request_id)?;

    respond(params.into(), &request_id)
}

/// `POST /api/bmi` with a JSON body carrying the same fields as the query.
#[instrument(name = "bmi::from_body", skip(request_id, body), fields(len = body.len()))]
pub async fn from_body(
    Extension(request_id): Extension<RequestId>,
    body: Bytes,
) -> Result<Json<Envelope<Evaluation>>, AppErrorResponse> {
    let input = MeasurementInput::from_json(&body).with_request_id(&request_id)?;
    respond(input, &request_id)
}

/// `GET /api/bmi/categories`
pub async fn categories() -> Json<Envelope<Vec<CategoryEntry>>> {
    Envelope::ok(Category::ALL.into_iter().map(CategoryEntry::from).collect())
}
