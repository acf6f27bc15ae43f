//! 节点分类

/// 风格提示词
pub const CATEGORY_STYLE_PROMPTS: &str = "Style Prompts";
