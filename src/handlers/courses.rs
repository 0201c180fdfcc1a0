// GET /api/courses handler

use std::convert::Infallible;
use std::sync::Arc;

use crate::models::CourseStatsResponse;
use crate::rag::RagSystem;

pub async fn courses_handler(rag: Arc<RagSystem>) -> Result<impl warp::Reply, Infallible> {
    let analytics = rag.analytics();
    Ok(warp::reply::json(&CourseStatsResponse {
        total_courses: analytics.total_courses,
        course_titles: analytics.course_titles,
    }))
}
