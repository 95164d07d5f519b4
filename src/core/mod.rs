//! 核心类型：错误定义

pub mod error;

pub use error::{ClawError, FetchError};
