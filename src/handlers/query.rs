// POST /api/query handler

use std::convert::Infallible;
use std::sync::Arc;

use tracing::error;
use warp::http::StatusCode;

use crate::llm::orchestrator::OrchestratorError;
use crate::models::{ErrorResponse, QueryRequest, QueryResponse};
use crate::rag::RagSystem;

pub async fn query_handler(
    request: QueryRequest,
    rag: Arc<RagSystem>,
) -> Result<impl warp::Reply, Infallible> {
    if request.query.trim().is_empty() {
        return Ok(warp::reply::with_status(
            warp::reply::json(&ErrorResponse {
                error: "query must not be empty".to_string(),
            }),
            StatusCode::BAD_REQUEST,
        ));
    }

    let session_id = match request.session_id {
        Some(id) => id,
        None => rag.create_session(),
    };

    match rag.query(&request.query, &session_id).await {
        Ok(outcome) => Ok(warp::reply::with_status(
            warp::reply::json(&QueryResponse {
                answer: outcome.answer,
                sources: outcome.sources,
                session_id,
            }),
            StatusCode::OK,
        )),
        Err(OrchestratorError::EmptyQuery) => Ok(warp::reply::with_status(
            warp::reply::json(&ErrorResponse {
                error: "query must not be empty".to_string(),
            }),
            StatusCode::BAD_REQUEST,
        )),
        Err(e) => {
            error!(error = %e, "query failed");
            Ok(warp::reply::with_status(
                warp::reply::json(&ErrorResponse {
                    error: e.to_string(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}
