pub mod router;
pub mod service;

pub use router::*;
pub use service::*;
