// IFSC Registry - Web Server
// Read-only REST API with Axum

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use ifsc_registry::{BankDetails, Config, DatasetSummary, IfscError, IfscRegistry};
use serde::Serialize;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

/// Shared application state
///
/// The registry never changes after startup, so no lock is needed.
#[derive(Clone)]
struct AppState {
    registry: Arc<IfscRegistry>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn ok(data: T) -> Response {
        (
            StatusCode::OK,
            Json(ApiResponse {
                success: true,
                data: Some(data),
                error: None,
            }),
        )
            .into_response()
    }
}

fn error_response(e: IfscError) -> Response {
    let status = match &e {
        IfscError::InvalidCode(_) | IfscError::InvalidFormat(_) => StatusCode::BAD_REQUEST,
        IfscError::BankNameNotFound(_) => StatusCode::NOT_FOUND,
        IfscError::Dataset(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(e.to_string()),
        }),
    )
        .into_response()
}

fn not_found(message: String) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(message),
        }),
    )
        .into_response()
}

#[derive(Serialize)]
struct ValidateResponse {
    code: String,
    valid: bool,
}

#[derive(Serialize)]
struct NameResponse {
    code: String,
    name: String,
}

#[derive(Serialize)]
struct BankCodesResponse {
    bank_name: String,
    codes: Vec<String>,
}

#[derive(Serialize)]
struct IfscsResponse {
    bank_name: String,
    ifscs: Vec<String>,
}

#[derive(Serialize)]
struct BankMatchResponse {
    bank_name: String,
    ifsc: String,
    belongs: bool,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> Response {
    ApiResponse::ok("OK")
}

/// GET /api/summary - Loaded datasets
async fn get_summary(State(state): State<AppState>) -> Response {
    let summary: DatasetSummary = state.registry.summary().clone();
    ApiResponse::ok(summary)
}

/// GET /api/validate/:code - Check an IFSC code
async fn validate_code(State(state): State<AppState>, Path(code): Path<String>) -> Response {
    let valid = state.registry.validate(&code);
    ApiResponse::ok(ValidateResponse { code, valid })
}

/// GET /api/name/:code - Resolve a code to a bank name
async fn get_name(State(state): State<AppState>, Path(code): Path<String>) -> Response {
    match state.registry.get_bank_name(&code) {
        Ok(name) => ApiResponse::ok(NameResponse { code, name }),
        Err(e) => error_response(e),
    }
}

/// GET /api/details/:bank_code - Bank details
async fn get_details(State(state): State<AppState>, Path(bank_code): Path<String>) -> Response {
    match state.registry.get_bank_details(&bank_code) {
        Some(details) => ApiResponse::<BankDetails>::ok(details),
        None => not_found(format!("no details for bank code {}", bank_code)),
    }
}

/// GET /api/banks/:name/codes - Bank codes for a bank name
///
/// Path segments arrive percent-decoded, so "HDFC%20Bank" is "HDFC Bank".
async fn get_codes(State(state): State<AppState>, Path(bank_name): Path<String>) -> Response {
    match state.registry.get_bank_codes(&bank_name) {
        Ok(codes) => ApiResponse::ok(BankCodesResponse {
            codes: codes.to_vec(),
            bank_name,
        }),
        Err(e) => error_response(e),
    }
}

/// GET /api/banks/:name/ifscs - Head-office IFSCs for a bank name
async fn get_ifscs(State(state): State<AppState>, Path(bank_name): Path<String>) -> Response {
    match state.registry.get_ifscs_by_bank_name(&bank_name) {
        Ok(ifscs) => ApiResponse::ok(IfscsResponse { bank_name, ifscs }),
        Err(e) => error_response(e),
    }
}

/// GET /api/banks/:name/validate/:ifsc - Does the IFSC belong to the bank?
async fn validate_for_bank(
    State(state): State<AppState>,
    Path((bank_name, ifsc)): Path<(String, String)>,
) -> Response {
    match state.registry.validate_ifsc_for_bank(&bank_name, &ifsc) {
        Ok(belongs) => ApiResponse::ok(BankMatchResponse {
            bank_name,
            ifsc,
            belongs,
        }),
        Err(e) => error_response(e),
    }
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env();
    tracing::info!(data_dir = %config.data_dir.display(), "loading reference datasets");

    // Startup fails hard: there is no partial-availability mode
    let loader = config.loader();
    let registry = IfscRegistry::load(&*loader)?;

    let state = AppState {
        registry: Arc::new(registry),
    };

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/summary", get(get_summary))
        .route("/validate/:code", get(validate_code))
        .route("/name/:code", get(get_name))
        .route("/details/:bank_code", get(get_details))
        .route("/banks/:name/codes", get(get_codes))
        .route("/banks/:name/ifscs", get(get_ifscs))
        .route("/banks/:name/validate/:ifsc", get(validate_for_bank))
        .with_state(state);

    let app = Router::new().nest("/api", api_routes).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "🚀 server running");

    axum::serve(listener, app).await?;
    Ok(())
}
