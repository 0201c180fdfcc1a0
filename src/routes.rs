// Route definitions

use std::sync::Arc;

use warp::Filter;

use crate::handlers;
use crate::rag::RagSystem;

pub fn configure_routes(
    rag: Arc<RagSystem>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let api = warp::path("api");

    // POST /api/query
    let query = api
        .and(warp::path("query"))
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_rag(Arc::clone(&rag)))
        .and_then(handlers::query_handler);

    // GET /api/courses
    let courses = api
        .and(warp::path("courses"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with_rag(Arc::clone(&rag)))
        .and_then(handlers::courses_handler);

    // DELETE /api/session/{session_id}
    let clear_session = api
        .and(warp::path("session"))
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::delete())
        .and(with_rag(rag))
        .and_then(handlers::clear_session_handler);

    query.or(courses).or(clear_session)
}

fn with_rag(
    rag: Arc<RagSystem>,
) -> impl Filter<Extract = (Arc<RagSystem>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || Arc::clone(&rag))
}
