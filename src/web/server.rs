use axum::{
    response::Html,
    routing::{get, post, put},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use super::{api, AppState};

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Prediction page
        .route("/", get(serve_index))
        // API endpoints
        .route("/api/health", get(api::health_check))
        .route("/api/predict", post(api::post_predict))
        .route("/api/sureshot", post(api::post_sureshot))
        // Per-user session endpoints
        .route("/api/users/:user_id", get(api::get_session))
        .route("/api/users/:user_id/predict", post(api::post_user_predict))
        .route("/api/users/:user_id/settle", post(api::post_settle))
        .route("/api/users/:user_id/strategy", put(api::put_strategy))
        .layer(cors)
        .with_state(state)
}

pub async fn start_server(state: AppState, port: u16) -> anyhow::Result<()> {
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Prediction server starting on http://localhost:{}", port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Wingo Predictor</title>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: #0f1419;
            color: #e7e9ea;
            min-height: 100vh;
            display: flex;
            align-items: center;
            justify-content: center;
        }
        .card {
            background: #16202a;
            border-radius: 12px;
            padding: 2rem;
            border: 1px solid #2f3336;
            width: 360px;
            text-align: center;
        }
        h1 { font-size: 1.25rem; color: #1da1f2; margin-bottom: 1rem; }
        select, button {
            width: 100%;
            padding: 0.6rem;
            margin-top: 0.5rem;
            border-radius: 6px;
            border: 1px solid #2f3336;
            background: #1c2732;
            color: #e7e9ea;
            font-size: 0.9rem;
        }
        button { background: #1da1f2; border: none; font-weight: 600; cursor: pointer; }
        .period { color: #71767b; font-size: 0.85rem; margin-top: 1.25rem; }
        .prediction { font-size: 2.5rem; font-weight: 700; margin-top: 0.5rem; }
        .red { color: #f4212e; }
        .green { color: #00ba7c; }
        .pattern { color: #71767b; margin-top: 0.25rem; }
        .trend { font-size: 1.25rem; margin-top: 1rem; letter-spacing: 0.25rem; }
    </style>
</head>
<body>
    <div class="card">
        <h1>Wingo Predictor</h1>
        <select id="platform">
            <option value="primary">Primary</option>
            <option value="alternate">Alternate</option>
        </select>
        <select id="time">
            <option value="30s">30 seconds</option>
            <option value="1m">1 minute</option>
        </select>
        <button onclick="predict()">Predict</button>
        <div class="period" id="period">--</div>
        <div class="prediction" id="prediction">--</div>
        <div class="pattern" id="pattern"></div>
        <div class="trend" id="trend"></div>
    </div>
    <script>
        async function predict() {
            const body = {
                platform: document.getElementById('platform').value,
                time: document.getElementById('time').value
            };
            try {
                const response = await fetch('/api/predict', {
                    method: 'POST',
                    headers: { 'Content-Type': 'application/json' },
                    body: JSON.stringify(body)
                });
                const data = await response.json();
                if (data.status !== 'success') {
                    document.getElementById('period').textContent = data.message || 'Error';
                    return;
                }
                document.getElementById('period').textContent = 'Period ' + data.period;
                const el = document.getElementById('prediction');
                el.textContent = data.prediction;
                el.className = 'prediction ' + data.color;
                document.getElementById('pattern').textContent = data.pattern;
                document.getElementById('trend').textContent = data.trend.join(' ');
            } catch (e) {
                document.getElementById('period').textContent = 'Failed: ' + e.message;
            }
        }
    </script>
</body>
</html>
"##;
