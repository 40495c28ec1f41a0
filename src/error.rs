//! # 错误类型模块
//!
//! 隐写核心的所有前置条件错误。每个操作在进行任何转换之前就会检查并返回这些错误，
//! 不会产生部分结果。

use thiserror::Error;

/// 隐写核心可能返回的错误。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StegoError {
    /// 输入网格不是矩形、需要至少一行时为空，或维度无法编码。
    #[error("Invalid shape: {reason}")]
    InvalidShape { reason: String },

    /// 载体图像的可嵌入像素数不足以容纳负载。
    #[error("Cover too small: need {needed} cells, have {capacity}")]
    CoverTooSmall { needed: usize, capacity: usize },

    /// 位数组头部声明的长度超过了实际提供的位数。
    #[error("Truncated payload: header requires {needed} bits, got {actual}")]
    TruncatedPayload { needed: usize, actual: usize },
}

impl StegoError {
    pub(crate) fn invalid_shape(reason: impl Into<String>) -> Self {
        StegoError::InvalidShape {
            reason: reason.into(),
        }
    }
}

/// 隐写核心使用的 `Result` 别名。
pub type Result<T> = std::result::Result<T, StegoError>;
