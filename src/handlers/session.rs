// DELETE /api/session/{session_id} handler

use std::convert::Infallible;
use std::sync::Arc;

use crate::models::ClearSessionResponse;
use crate::rag::RagSystem;

pub async fn clear_session_handler(
    session_id: String,
    rag: Arc<RagSystem>,
) -> Result<impl warp::Reply, Infallible> {
    rag.clear_session(&session_id);
    Ok(warp::reply::json(&ClearSessionResponse {
        status: "cleared".to_string(),
        session_id,
    }))
}
