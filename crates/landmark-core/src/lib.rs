pub mod config;
pub mod consts;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod io;
pub mod landmark;
pub mod presentation;
pub mod registration;
pub mod render;
pub mod session;
pub mod transform;
pub mod viewport;
