// Application layer: HTTP routing and serving on top of the domain ports.

pub mod routes;
pub mod server;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
