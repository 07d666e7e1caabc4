pub mod animation;
pub mod error;
pub mod form;
pub mod geometry;
pub mod installation;
pub mod math;
pub mod operations;
pub mod tessellation;

pub use error::{LightformError, Result};
