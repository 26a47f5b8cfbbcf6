//! HTTP routes for per-session quotation lists.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
};
use quotations_core::{Quotation, QuotationId, QuotationStorage};
use quotations_session::{QuotationService, ServiceError};

use crate::protocol::{CreateQuotationRequest, ErrorBody, SessionQuery, ValidationError};

/// Error returned by the quotation routes.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl ApiError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Service(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::BadRequest(e.to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        Self::BadRequest(e.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(e: PathRejection) -> Self {
        Self::BadRequest(e.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self::BadRequest(e.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {self}");
        } else {
            tracing::warn!("Rejected request: {self}");
        }

        let body = ErrorBody {
            status_code: status.as_u16(),
            error: status.canonical_reason().unwrap_or_default().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Create the quotations router.
///
/// Routes are relative; the caller decides the prefix.
///
/// # Example
/// ```ignore
/// let app = Router::new()
///     .nest("/api", create_router(Arc::new(service)));
/// ```
#[must_use]
pub fn create_router<S>(service: Arc<QuotationService<S>>) -> Router
where
    S: QuotationStorage + 'static,
{
    Router::new()
        .route(
            "/quotations",
            get(list_quotations::<S>).post(create_quotation::<S>),
        )
        .route("/quotations/{id}", delete(delete_quotation::<S>))
        .with_state(service)
}

async fn list_quotations<S>(
    State(service): State<Arc<QuotationService<S>>>,
    query: Result<Query<SessionQuery>, QueryRejection>,
) -> Result<Json<Vec<Quotation>>, ApiError>
where
    S: QuotationStorage + 'static,
{
    let Query(query) = query?;
    let session = query.session()?;

    Ok(Json(service.list(session).await?))
}

async fn create_quotation<S>(
    State(service): State<Arc<QuotationService<S>>>,
    query: Result<Query<SessionQuery>, QueryRejection>,
    body: Result<Json<CreateQuotationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Quotation>), ApiError>
where
    S: QuotationStorage + 'static,
{
    let Query(query) = query?;
    let session = query.session()?;
    let Json(body) = body?;
    let new = body.validate()?;

    let quotation = service.create(session, new).await?;
    Ok((StatusCode::CREATED, Json(quotation)))
}

async fn delete_quotation<S>(
    State(service): State<Arc<QuotationService<S>>>,
    id: Result<Path<QuotationId>, PathRejection>,
    query: Result<Query<SessionQuery>, QueryRejection>,
) -> Result<StatusCode, ApiError>
where
    S: QuotationStorage + 'static,
{
    let Path(id) = id?;
    let Query(query) = query?;
    let session = query.session()?;

    service.delete(session, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
