//! 错误处理

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // 标准库错误处理
    #[error("io error, {0}")]
    Io(#[from] std::io::Error),
    // std::sync::poison::mutex
    #[error("lock error, {0}")]
    LockError(String),

    #[error("json error, {0}")]
    Json(#[from] serde_json::Error),
    #[error("walkdir error, {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("strum error, {0}")]
    ParseEnumString(String),

    #[error("invalid json data, {0}")]
    InvalidCatalog(String),
    #[error("invalid template, missing 'name' or 'prompt' field at index {0}")]
    InvalidTemplate(usize),
    #[error("no template found with name '{0}'")]
    StyleNotFound(String),
    #[error("unknown style pack, {0}")]
    UnknownStylePack(String),
}
