//! Dashboard report endpoints.
//!
//! Each handler clones the current snapshot out of the store and runs the
//! matching pure report builder over it, so one response never mixes
//! ingestion generations.

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::reports::financial::{financial_report, FinancialReport};
use crate::reports::operations::{operations_report, OperationsReport};
use crate::reports::overview::{overview_report, OverviewReport};
use crate::reports::quality::{quality_report, QualityReport};
use crate::reports::staff::{staff_report, StaffReport};
use crate::reports::strategic::{strategic_report, StrategicReport};

/// `GET /api/dashboard/overview`
pub async fn overview(
    State(ctx): State<ApiContext>,
) -> Result<Json<OverviewReport>, ApiError> {
    let snap = ctx.store.snapshot()?;
    Ok(Json(overview_report(&snap.data)))
}

/// `GET /api/dashboard/financial`
pub async fn financial(
    State(ctx): State<ApiContext>,
) -> Result<Json<FinancialReport>, ApiError> {
    let snap = ctx.store.snapshot()?;
    Ok(Json(financial_report(&snap.data)))
}

/// `GET /api/dashboard/operations`
pub async fn operations(
    State(ctx): State<ApiContext>,
) -> Result<Json<OperationsReport>, ApiError> {
    let snap = ctx.store.snapshot()?;
    Ok(Json(operations_report(&snap.data)))
}

/// `GET /api/dashboard/quality`
pub async fn quality(
    State(ctx): State<ApiContext>,
) -> Result<Json<QualityReport>, ApiError> {
    let snap = ctx.store.snapshot()?;
    Ok(Json(quality_report(&snap.data)))
}

/// `GET /api/dashboard/staff`
pub async fn staff(State(ctx): State<ApiContext>) -> Result<Json<StaffReport>, ApiError> {
    let snap = ctx.store.snapshot()?;
    Ok(Json(staff_report(&snap.data)))
}

/// `GET /api/dashboard/strategic`
pub async fn strategic(
    State(ctx): State<ApiContext>,
) -> Result<Json<StrategicReport>, ApiError> {
    let snap = ctx.store.snapshot()?;
    Ok(Json(strategic_report(&snap.data)))
}
