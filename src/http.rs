use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::{result::Result as StdResult, sync::Arc};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::{
    core::{model as domain, Application},
    error::{Error, Result},
    infrastructure::Catalog,
};

pub mod model;

type ApiResult<A> = StdResult<A, ApiError>;

type ApplicationInner<C> = Arc<Application<C>>;
pub struct Api<C>(ApplicationInner<C>);

impl<C> Api<C>
where
    C: Catalog + Send + Sync + 'static,
{
    pub fn new(application: Application<C>) -> Self {
        Self(Arc::new(application))
    }

    pub fn router(self) -> Router {
        let Self(application) = self;
        routing_configuration()
            .with_state(application)
            .layer(TraceLayer::new_for_http())
    }

    pub async fn start(self, listener: TcpListener) -> Result<()> {
        let address = listener.local_addr()?;
        info!(%address, "serving book search");
        Ok(axum::serve(listener, self.router()).await?)
    }
}

fn routing_configuration<C>() -> Router<ApplicationInner<C>>
where
    C: Catalog + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(system_root))
        .route("/book/:code", get(books::by_code))
        .route("/books", get(books::search))
}

/// Every failure leaves as `{"message": ...}` under the status its kind
/// maps to.
struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(value: Error) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let Self(error) = self;
        let status =
            StatusCode::from_u16(error.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(%error, "request failed");
        }

        (
            status,
            Json(model::ErrorMessage {
                message: error.to_string(),
            }),
        )
            .into_response()
    }
}

mod books {
    use super::*;

    pub async fn by_code<C>(
        State(application): State<ApplicationInner<C>>,
        Path(code): Path<String>,
    ) -> ApiResult<Json<domain::BookRecord>>
    where
        C: Catalog + Send + Sync + 'static,
    {
        Ok(Json(application.resolve_book_by_code(&code).await?))
    }

    pub async fn search<C>(
        State(application): State<ApplicationInner<C>>,
        Query(pairs): Query<Vec<(String, String)>>,
    ) -> ApiResult<Json<domain::BooksResult>>
    where
        C: Catalog + Send + Sync + 'static,
    {
        let params: model::BooksParams = pairs.into_iter().collect();
        Ok(Json(application.resolve_books_query(params.into()).await?))
    }
}

async fn system_root<C>(State(_application): State<ApplicationInner<C>>) -> ApiResult<String>
where
    C: Catalog + Send + Sync + 'static,
{
    Ok(format!("Shelfmark {} running.", env!("CARGO_PKG_VERSION")))
}
