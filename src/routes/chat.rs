use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
};
use serde::Deserialize;

use crate::{
    error::AppError,
    message::{ChatReply, ChatRequest},
    rules::{self, RiskDescriptor},
    services::{metrics_manager::MetricsData, relay::relay},
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, AppError> {
    let Json(request) = payload?;

    let outcome = relay(&state.gemini, state.config.api_key.as_deref(), &request).await;
    state.metrics.record_relay(&outcome).await;

    Ok(Json(ChatReply::Reply { reply: outcome? }))
}

#[derive(Debug, Deserialize)]
pub struct RiskQuery {
    pub location: Option<String>,
}

pub async fn risk_handler(
    State(state): State<SharedState>,
    Query(query): Query<RiskQuery>,
) -> Json<RiskDescriptor> {
    let descriptor = rules::lookup_opt(query.location.as_deref());
    state.metrics.record_lookup(descriptor.category).await;
    Json(descriptor)
}

pub async fn get_metrics_handler(State(state): State<SharedState>) -> Json<MetricsData> {
    Json(state.metrics.get_metrics().await)
}
