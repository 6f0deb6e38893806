// HTTP module exports

pub mod handler;
pub mod response;
pub mod server;
pub mod utils;

pub use response::{ApiError, ErrorResponse, ValueResponse};
pub use server::{router, HttpConfig, HttpServer};
