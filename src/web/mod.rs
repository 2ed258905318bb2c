pub mod account;
pub mod cors;
pub mod fallback;
pub mod health;
pub mod router;

pub use router::app_router;
