pub mod session_middleware;
pub mod tracing_middleware;

pub use session_middleware::{SessionId, SessionMiddleware};
pub use tracing_middleware::TracingMiddleware;
