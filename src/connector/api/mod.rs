pub mod container;
pub mod controller;
mod page;
pub mod rate_limit;
pub mod router;

pub use container::Container;
pub use router::{build_router, AppState};
