// API request/response types

use serde::{Deserialize, Serialize};

/// Body of POST /api/query
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    /// Omitted on the first turn; the server creates a session
    pub session_id: Option<String>,
}

/// Response of POST /api/query
#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse {
    pub answer: String,
    pub sources: Vec<String>,
    pub session_id: String,
}

/// Response of GET /api/courses
#[derive(Debug, Clone, Serialize)]
pub struct CourseStatsResponse {
    pub total_courses: usize,
    pub course_titles: Vec<String>,
}

/// Response of DELETE /api/session/{id}
#[derive(Debug, Clone, Serialize)]
pub struct ClearSessionResponse {
    pub status: String,
    pub session_id: String,
}

/// Generic error body
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
