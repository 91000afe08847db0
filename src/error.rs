//! 目录错误类型

use thiserror::Error;

/// 目录构建与解析错误
///
/// 评估本身不产生错误：坏数据截断、空集合按未达标处理。
/// 只有目录的构建和 JSON 解析是可失败的。
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("成就代码不能为空")]
    EmptyCode,

    #[error("成就代码重复: {0}")]
    DuplicateCode(String),

    #[error("无效的夜读时段: start_hour={start_hour}, end_hour={end_hour}")]
    InvalidNightWindow { start_hour: u32, end_hour: u32 },

    #[error("JSON 序列化错误: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
