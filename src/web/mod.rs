pub mod middleware;
pub mod router;
pub mod routes;

pub use router::build_router;
