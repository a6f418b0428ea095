//! Application surface: HTTP server and the analysis session it drives

pub mod http;
pub mod session;

pub use http::*;
pub use session::*;
