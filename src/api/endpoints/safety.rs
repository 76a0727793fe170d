//! Safety endpoints.
//!
//! Two endpoints:
//! - `GET /api/safety/rules`: loaded interaction table
//! - `POST /api/safety/check`: evaluate a prescription against a patient profile

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::safety::{InteractionRule, SafetyCheckRequest, SafetyReport};

#[derive(Serialize)]
pub struct RulesResponse {
    pub pairwise: Vec<InteractionRule>,
    /// Single-token entries. Listed for review; they never raise warnings.
    pub allergy_markers: Vec<InteractionRule>,
}

/// `GET /api/safety/rules`: the table in declaration order, split by arity.
pub async fn rules(State(ctx): State<ApiContext>) -> Json<RulesResponse> {
    Json(RulesResponse {
        pairwise: ctx.table.pairwise().map(|(_, _, rule)| rule.clone()).collect(),
        allergy_markers: ctx.table.allergy_markers().cloned().collect(),
    })
}

/// `POST /api/safety/check`: fresh evaluation on every call, nothing stored.
pub async fn check(
    State(ctx): State<ApiContext>,
    payload: Result<Json<SafetyCheckRequest>, JsonRejection>,
) -> Result<Json<SafetyReport>, ApiError> {
    let Json(request) = payload?;

    let report = request.evaluate(&ctx.table);

    // Counts only: drug names are patient data.
    tracing::debug!(
        contraindications = report.counts.contraindications,
        cautions = report.counts.cautions,
        processing_us = report.processing_time_us,
        "Safety check complete"
    );

    Ok(Json(report))
}
