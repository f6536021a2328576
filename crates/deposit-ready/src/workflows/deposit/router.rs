use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use super::deadlines::DeadlineAnalysis;
use super::diagnosis::DiagnosisResult;
use super::integrations::{CheckoutRequest, LeadSink, TelemetrySink};
use super::landlord::RiskAssessment;
use super::requests::{DeadlineForm, DiagnosisForm, LandlordRiskForm};
use super::rules::StateRules;
use super::service::DepositService;
use crate::error::AppError;

/// Router builder exposing the state catalog and the deposit calculators.
pub fn deposit_router<T, L>(service: Arc<DepositService<T, L>>) -> Router
where
    T: TelemetrySink + 'static,
    L: LeadSink + 'static,
{
    Router::new()
        .route("/api/v1/states", get(states_handler::<T, L>))
        .route("/api/v1/states/:slug", get(state_handler::<T, L>))
        .route("/api/v1/deadlines", post(deadlines_handler::<T, L>))
        .route("/api/v1/diagnosis", post(diagnosis_handler::<T, L>))
        .route("/api/v1/landlord/risk", post(landlord_risk_handler::<T, L>))
        .route("/api/v1/checkout/payload", post(checkout_handler::<T, L>))
        .route("/api/v1/leads", post(lead_handler::<T, L>))
        .with_state(service)
}

pub(crate) async fn states_handler<T, L>(
    State(service): State<Arc<DepositService<T, L>>>,
) -> Json<Vec<StateRules>>
where
    T: TelemetrySink + 'static,
    L: LeadSink + 'static,
{
    Json(service.states().to_vec())
}

pub(crate) async fn state_handler<T, L>(
    State(service): State<Arc<DepositService<T, L>>>,
    Path(slug): Path<String>,
) -> Result<Json<StateRules>, AppError>
where
    T: TelemetrySink + 'static,
    L: LeadSink + 'static,
{
    service
        .state_by_slug(&slug)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("no deposit rules for '{slug}'")))
}

pub(crate) async fn deadlines_handler<T, L>(
    State(service): State<Arc<DepositService<T, L>>>,
    Json(form): Json<DeadlineForm>,
) -> Result<Json<DeadlineAnalysis>, AppError>
where
    T: TelemetrySink + 'static,
    L: LeadSink + 'static,
{
    Ok(Json(service.analyze(&form)?))
}

pub(crate) async fn diagnosis_handler<T, L>(
    State(service): State<Arc<DepositService<T, L>>>,
    Json(form): Json<DiagnosisForm>,
) -> Result<Json<DiagnosisResult>, AppError>
where
    T: TelemetrySink + 'static,
    L: LeadSink + 'static,
{
    Ok(Json(service.diagnose(&form)?))
}

pub(crate) async fn landlord_risk_handler<T, L>(
    State(service): State<Arc<DepositService<T, L>>>,
    Json(form): Json<LandlordRiskForm>,
) -> Result<Json<RiskAssessment>, AppError>
where
    T: TelemetrySink + 'static,
    L: LeadSink + 'static,
{
    Ok(Json(service.landlord_risk(&form)?))
}

pub(crate) async fn checkout_handler<T, L>(
    State(service): State<Arc<DepositService<T, L>>>,
    Json(form): Json<DiagnosisForm>,
) -> Result<Json<CheckoutRequest>, AppError>
where
    T: TelemetrySink + 'static,
    L: LeadSink + 'static,
{
    Ok(Json(service.checkout_request(&form)?))
}

pub(crate) async fn lead_handler<T, L>(
    State(service): State<Arc<DepositService<T, L>>>,
    Json(form): Json<DiagnosisForm>,
) -> (StatusCode, Json<Value>)
where
    T: TelemetrySink + 'static,
    L: LeadSink + 'static,
{
    let outcome = service.capture_lead(&form);
    (StatusCode::ACCEPTED, Json(json!({ "status": outcome.label() })))
}
