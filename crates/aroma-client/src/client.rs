//! # Sales Client
//!
//! The HTTP client the terminal talks to the cloud API with.
//!
//! ## API Surface
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cloud API Surface                               │
//! │                                                                         │
//! │  GET  /products/{id}        ──► ProductRecord ──► ProductSnapshot      │
//! │  GET  /products/sku/{sku}   ──► ProductRecord ──► ProductSnapshot      │
//! │  POST /sales                ──► CreateSaleResponse                     │
//! │                                                                         │
//! │  Every request carries the configured bearer token (if any) and is     │
//! │  bounded by the configured timeout. Non-success statuses map to        │
//! │  typed ApiError variants; 400/409/422 bodies are surfaced verbatim     │
//! │  as rejections for the cashier.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The client holds no mutable state and is cheap to clone; `reqwest`
//! shares the underlying connection pool between clones.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use aroma_core::ProductSnapshot;

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::types::{CreateSaleRequest, CreateSaleResponse, ProductRecord};

/// Error body shape the API uses for non-success answers.
/// Lenient: accepts either `{"message": ...}` or `{"error": ...}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(alias = "error")]
    message: String,
}

// =============================================================================
// Sales Client
// =============================================================================

/// HTTP client for product lookup and sale submission.
#[derive(Debug, Clone)]
pub struct SalesClient {
    http: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
    device_id: String,
    store_name: String,
}

impl SalesClient {
    /// Builds a client from a validated configuration.
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        Ok(SalesClient {
            http,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            api_token: config.api.api_token.clone(),
            device_id: config.device.id.clone(),
            store_name: config.store.name.clone(),
        })
    }

    /// The device ID this client submits sales under.
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// The configured store name (for receipts).
    pub fn store_name(&self) -> &str {
        &self.store_name
    }

    // =========================================================================
    // Product Lookup
    // =========================================================================

    /// Fetches a product by its identifier.
    pub async fn fetch_product(&self, product_id: &str) -> ApiResult<ProductSnapshot> {
        let url = self.url(&format!("/products/{}", product_id));
        debug!(%url, "Fetching product");

        let response = self.authorized(self.http.get(&url)).send().await?;
        let record: ProductRecord = Self::handle_response(response).await?;
        Ok(record.into())
    }

    /// Fetches a product by SKU (barcode scans resolve through this).
    pub async fn fetch_product_by_sku(&self, sku: &str) -> ApiResult<ProductSnapshot> {
        let url = self.url(&format!("/products/sku/{}", sku));
        debug!(%url, "Fetching product by SKU");

        let response = self.authorized(self.http.get(&url)).send().await?;
        let record: ProductRecord = Self::handle_response(response).await?;
        Ok(record.into())
    }

    // =========================================================================
    // Sale Submission
    // =========================================================================

    /// Submits a completed sale.
    ///
    /// The API validates the payload against live stock and pricing; a
    /// refusal comes back as [`ApiError::Rejected`] with the API's own
    /// message. The caller decides what to do with the cart in either case.
    pub async fn create_sale(&self, request: &CreateSaleRequest) -> ApiResult<CreateSaleResponse> {
        let url = self.url("/sales");
        info!(
            request_id = %request.client_request_id,
            lines = request.lines.len(),
            payments = request.payments.len(),
            "Submitting sale"
        );

        let response = self
            .authorized(self.http.post(&url))
            .json(request)
            .send()
            .await?;
        let created: CreateSaleResponse = Self::handle_response(response).await?;

        info!(
            sale_id = %created.sale_id,
            document = %created.document_number,
            "Sale accepted"
        );
        Ok(created)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Maps an HTTP response to a typed result.
    ///
    /// ## Status Mapping
    /// - 2xx: parse the body as `T`
    /// - 401/403: [`ApiError::Unauthorized`]
    /// - 404: [`ApiError::NotFound`]
    /// - 400/409/422: [`ApiError::Rejected`] with the API's message
    /// - anything else: [`ApiError::ServerError`]
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();

        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ApiError::InvalidResponse(e.to_string()));
        }

        let message = Self::error_message(response).await;
        match status.as_u16() {
            401 | 403 => Err(ApiError::Unauthorized),
            404 => Err(ApiError::NotFound(message)),
            400 | 409 | 422 => Err(ApiError::Rejected { message }),
            code => Err(ApiError::ServerError {
                status: code,
                message,
            }),
        }
    }

    /// Extracts the best available error message from a failed response.
    async fn error_message(response: reqwest::Response) -> String {
        let status = response.status();
        match response.text().await {
            Ok(body) if !body.trim().is_empty() => {
                match serde_json::from_str::<ErrorBody>(&body) {
                    Ok(parsed) => parsed.message,
                    // Not the expected JSON shape: pass the raw body through
                    Err(_) => body,
                }
            }
            _ => status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        }
    }
}

// =============================================================================
// Unit Tests (loopback API server)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Path;
    use axum::http::{header, HeaderMap, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;

    use aroma_core::{Cart, Money, SettlementEngine, TenderMethod};

    async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn test_client(base_url: &str, token: Option<&str>) -> SalesClient {
        let mut config = ClientConfig::default();
        config.api.base_url = base_url.to_string();
        config.api.api_token = token.map(str::to_string);
        config.device.id = "test-device".to_string();
        config.store.name = "Test Store".to_string();
        SalesClient::new(&config).unwrap()
    }

    fn product_json() -> serde_json::Value {
        json!({
            "id": "prod-9",
            "sku": "ROS-100",
            "name": "Rose Water 100ml",
            "retailPrice": 6_500,
            "wholesalePrice": 4_800,
            "stockAvailable": 30
        })
    }

    fn settled_request() -> CreateSaleRequest {
        let mut cart = Cart::new();
        let product = aroma_core::ProductSnapshot {
            product_id: "prod-1".to_string(),
            sku: "LAV-330".to_string(),
            name: "Lavender Oil 330ml".to_string(),
            retail_price: Money::from_units(10_000),
            wholesale_price: Money::from_units(7_500),
            stock_available: 12,
        };
        cart.add_line(&product).unwrap();
        let total = cart.totals().total;

        let mut tenders = SettlementEngine::new();
        tenders
            .add_payment(total, TenderMethod::Cash, total)
            .unwrap();

        CreateSaleRequest::build(&cart, tenders.payments(), "test-device")
    }

    #[tokio::test]
    async fn test_create_sale_success() {
        let router = Router::new().route(
            "/sales",
            post(|Json(request): Json<CreateSaleRequest>| async move {
                if request.client_request_id.is_empty() || request.lines.is_empty() {
                    return (StatusCode::BAD_REQUEST, Json(json!({"message": "bad payload"})))
                        .into_response();
                }
                Json(json!({
                    "saleId": "sale-411",
                    "documentNumber": "B-000411",
                    "subtotal": 10_000,
                    "discountTotal": 0,
                    "total": 10_000,
                    "createdAt": "2026-03-14T10:30:00Z"
                }))
                .into_response()
            }),
        );
        let base = spawn_server(router).await;
        let client = test_client(&base, None);

        let response = client.create_sale(&settled_request()).await.unwrap();

        assert_eq!(response.sale_id, "sale-411");
        assert_eq!(response.document_number, "B-000411");
        assert_eq!(response.total, 10_000);
    }

    #[tokio::test]
    async fn test_create_sale_rejected_surfaces_api_message() {
        let router = Router::new().route(
            "/sales",
            post(|| async {
                (
                    StatusCode::CONFLICT,
                    Json(json!({"message": "Insufficient stock for LAV-330"})),
                )
            }),
        );
        let base = spawn_server(router).await;
        let client = test_client(&base, None);

        let err = client.create_sale(&settled_request()).await.unwrap_err();

        match err {
            ApiError::Rejected { ref message } => {
                assert_eq!(message, "Insufficient stock for LAV-330");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.is_rejection());
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let router = Router::new().route(
            "/sales",
            post(|| async { (StatusCode::UNAUTHORIZED, "token expired") }),
        );
        let base = spawn_server(router).await;
        let client = test_client(&base, None);

        let err = client.create_sale(&settled_request()).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_server_error_is_retryable() {
        let router = Router::new().route(
            "/sales",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base = spawn_server(router).await;
        let client = test_client(&base, None);

        let err = client.create_sale(&settled_request()).await.unwrap_err();
        assert!(matches!(err, ApiError::ServerError { status: 500, .. }));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_fetch_product() {
        let router = Router::new().route(
            "/products/{id}",
            get(|Path(id): Path<String>| async move {
                if id == "prod-9" {
                    Json(product_json()).into_response()
                } else {
                    (
                        StatusCode::NOT_FOUND,
                        Json(json!({"message": "no such product"})),
                    )
                        .into_response()
                }
            }),
        );
        let base = spawn_server(router).await;
        let client = test_client(&base, None);

        let snapshot = client.fetch_product("prod-9").await.unwrap();
        assert_eq!(snapshot.sku, "ROS-100");
        assert_eq!(snapshot.retail_price.units(), 6_500);
        assert_eq!(snapshot.stock_available, 30);

        let err = client.fetch_product("ghost").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_fetch_product_by_sku() {
        let router = Router::new().route(
            "/products/sku/{sku}",
            get(|Path(sku): Path<String>| async move {
                assert_eq!(sku, "ROS-100");
                Json(product_json())
            }),
        );
        let base = spawn_server(router).await;
        let client = test_client(&base, None);

        let snapshot = client.fetch_product_by_sku("ROS-100").await.unwrap();
        assert_eq!(snapshot.product_id, "prod-9");
    }

    #[tokio::test]
    async fn test_bearer_token_attached() {
        let router = Router::new().route(
            "/products/{id}",
            get(|headers: HeaderMap| async move {
                let auth = headers
                    .get(header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok());
                if auth == Some("Bearer test-token") {
                    Json(product_json()).into_response()
                } else {
                    (StatusCode::UNAUTHORIZED, "bad token").into_response()
                }
            }),
        );
        let base = spawn_server(router).await;

        let with_token = test_client(&base, Some("test-token"));
        assert!(with_token.fetch_product("prod-9").await.is_ok());

        let without_token = test_client(&base, None);
        let err = without_token.fetch_product("prod-9").await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Grab a free port, then close it again so nothing is listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = test_client(&format!("http://{}", addr), None);
        let err = client.fetch_product("prod-1").await.unwrap_err();

        assert!(matches!(err, ApiError::ConnectionFailed(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_plain_text_error_body_passes_through() {
        let router = Router::new().route(
            "/sales",
            post(|| async { (StatusCode::UNPROCESSABLE_ENTITY, "line 3: unknown product") }),
        );
        let base = spawn_server(router).await;
        let client = test_client(&base, None);

        let err = client.create_sale(&settled_request()).await.unwrap_err();
        match err {
            ApiError::Rejected { message } => assert_eq!(message, "line 3: unknown product"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
