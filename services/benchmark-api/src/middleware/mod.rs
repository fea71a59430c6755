// Request context and logging middleware
pub mod request_context;

pub use request_context::{request_context_middleware, RequestContext, X_REQUEST_ID};
