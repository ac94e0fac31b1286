use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use cutplan_core::{plan_job, render_svg, JobPlan, PlanRequest, PlannerError, ShoppingPlan};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Panel Cut Planner</title>
</head>
<body>
    <h1>Panel Cut Planner API</h1>
    <h2>API Endpoints:</h2>
    <ul>
        <li>GET /api/health - Health check</li>
        <li>POST /api/plan - Plan stock panels and cut layouts for a job</li>
        <li>POST /api/generate/svg - Generate SVG cut diagrams from a plan</li>
    </ul>
</body>
</html>"#;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Panel Cut Planner API");

    let app = router();

    let addr = std::env::var("CUTPLAN_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("API server listening on http://{}", addr);
    info!("Try: curl http://{}/api/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn router() -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/api/health", get(health_check))
        .route("/api/plan", post(plan))
        .route("/api/generate/svg", post(generate_svg))
        .layer(CorsLayer::permissive())
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "cutplan-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Main planning endpoint
async fn plan(Json(request): Json<PlanRequest>) -> Result<Json<JobPlan>, AppError> {
    info!(
        "Received plan request with {} pieces in {}",
        request.pieces.len(),
        request.material
    );

    let job = plan_job(&request)?;

    if !job.plan.is_complete() {
        warn!("Plan is partial: {} issue(s)", job.plan.issues.len());
    }
    info!(
        "Planning complete: {} panels required, {:.2}% waste",
        job.plan.total_panels,
        job.plan.waste_percentage()
    );

    Ok(Json(job))
}

/// Generate SVG cut diagrams
async fn generate_svg(Json(plan): Json<ShoppingPlan>) -> Result<Response, AppError> {
    info!("Generating SVG for {} panels", plan.total_panels);

    let svg = render_svg(&plan)?;

    Ok((StatusCode::OK, [(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}

async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Application error type
struct AppError(anyhow::Error);

impl From<PlannerError> for AppError {
    fn from(err: PlannerError) -> Self {
        AppError(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request error: {}", self.0);

        let status = match self.0.downcast_ref::<PlannerError>() {
            Some(PlannerError::InvalidInput(_)) | Some(PlannerError::InvalidStockPanel(_)) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(json!({
                "error": self.0.to_string(),
            })),
        )
            .into_response()
    }
}
