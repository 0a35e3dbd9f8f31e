//! 错误类型

use crate::Rect;
use thiserror::Error;

/// 组件库中所有可失败操作的错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GuiError {
    /// 互斥参数同时给出，或缺少必需参数
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// 请求的尺寸超出容器/组件边界
    #[error("size {width}x{height} exceeds bounds {max_width}x{max_height}")]
    Size {
        width: u32,
        height: u32,
        max_width: u32,
        max_height: u32,
    },

    /// 与已有子组件重叠且未允许覆盖
    #[error("placement {placement:?} overlaps widget at {existing:?}; change position/dimensions or allow overlap")]
    Overlap { placement: Rect, existing: Rect },

    /// 文本放不进组件
    #[error("text {text:?} ({width}x{height}) does not fit in {max_width}x{max_height}")]
    Validation {
        text: String,
        width: u32,
        height: u32,
        max_width: u32,
        max_height: u32,
    },

    /// 图片无法加载
    #[error("failed to load image {path}: {reason}")]
    Asset { path: String, reason: String },
}

impl GuiError {
    pub fn config(msg: impl Into<String>) -> Self {
        GuiError::Configuration(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, GuiError>;
