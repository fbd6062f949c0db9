pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use routes::{create_router, RouteEntry, ROUTE_TABLE};
pub use server::Server;
pub use state::AppState;
