use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};

use crate::database::{StoreError, UserId};
use crate::types::{outcomes, StrategyVersion};
use super::{
    trend_strip, AppState, PredictRequest, PredictionResponse, RoutedResponse, SettleRequest,
    StrategyRequest, SureshotResponse, TREND_STRIP_LEN,
};

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({"status": "error", "message": message}))).into_response()
}

fn store_error(e: StoreError) -> Response {
    error!("Session store error: {}", e);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
}

// === Stateless prediction ===

/// Hash + confluence call for the live period, independent of any user.
pub async fn post_predict(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> Response {
    let (game, platform) = (req.game(), req.platform());
    let snapshot = state.service.fetch(game, platform).await;

    let Some(period) = snapshot.period else {
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "API Error");
    };

    let prediction = state
        .service
        .router()
        .hash_confluence()
        .evaluate(&period, platform, &outcomes(&snapshot.history));

    info!("{} {} period {}: {} ({})", platform, game, period, prediction.outcome, prediction.label);

    Json(PredictionResponse {
        status: "success",
        period: Some(period),
        prediction: prediction.outcome.to_string(),
        color: prediction.outcome.color(),
        pattern: prediction.label,
        digit: prediction.digit,
        trend: trend_strip(&snapshot.history, TREND_STRIP_LEN),
    })
    .into_response()
}

// === Per-user endpoints ===

pub async fn post_user_predict(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Json(req): Json<PredictRequest>,
) -> Response {
    match state.service.predict(user_id, req.game(), req.platform()).await {
        Ok(routed) => Json(RoutedResponse {
            status: "success",
            trend: trend_strip(&routed.history, TREND_STRIP_LEN),
            period: routed.period,
            prediction: routed.prediction.outcome.to_string(),
            color: routed.prediction.outcome.color(),
            pattern: routed.prediction.label,
            strategy: routed.strategy.to_string(),
            level: routed.level,
            stake: routed.stake,
        })
        .into_response(),
        Err(e) => store_error(e),
    }
}

pub async fn post_settle(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Json(req): Json<SettleRequest>,
) -> Response {
    if req.result > 9 {
        return error_response(StatusCode::BAD_REQUEST, "result must be between 0 and 9");
    }
    match state.service.settle(user_id, req.result).await {
        Ok(settlement) => Json(json!({"status": "success", "settlement": settlement})).into_response(),
        Err(e) => store_error(e),
    }
}

pub async fn put_strategy(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Json(req): Json<StrategyRequest>,
) -> Response {
    let Some(version) = StrategyVersion::parse(&req.version) else {
        let known: Vec<&str> = StrategyVersion::all().iter().map(|v| v.as_str()).collect();
        let message = format!("unknown strategy version, expected one of {}", known.join(", "));
        return error_response(StatusCode::BAD_REQUEST, &message);
    };
    match state.service.set_strategy(user_id, version).await {
        Ok(session) => Json(json!({"status": "success", "session": session})).into_response(),
        Err(e) => store_error(e),
    }
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Response {
    match state.service.session(user_id).await {
        Ok(session) => {
            let stake = state.service.ladder().stake_for_level(session.current_level);
            Json(json!({"status": "success", "session": session, "stake": stake})).into_response()
        }
        Err(e) => store_error(e),
    }
}

// === Sureshot ===

pub async fn post_sureshot(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> Response {
    let reading = state.service.sureshot(req.game(), req.platform()).await;
    Json(SureshotResponse {
        status: "success",
        period: reading.period,
        prediction: reading.call.outcome.to_string(),
        confident: reading.call.confident,
    })
    .into_response()
}

// === Health Check ===

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
