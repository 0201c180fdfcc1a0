// Request handlers

mod courses;
mod query;
mod session;

pub use courses::courses_handler;
pub use query::query_handler;
pub use session::clear_session_handler;
