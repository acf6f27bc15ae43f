//! 模板替换

use std::borrow::Cow;

/// 模板中的提示词占位符
pub const PROMPT_PLACEHOLDER: &str = "{prompt}";

/// 风格模板
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleTemplate<'a> {
    pub name: &'a str,
    pub prompt: &'a str,
    /// 缺省时为空字符串
    pub negative_prompt: Cow<'a, str>,
}

/// 风格化后的正负提示词
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StyledPrompt {
    pub positive: String,
    pub negative: String,
}

impl StyledPrompt {
    pub fn into_tuple(self) -> (String, String) {
        (self.positive, self.negative)
    }
}

impl StyleTemplate<'_> {
    /// 替换正向提示词占位符, 并合并负向提示词
    pub fn apply(&self, text_positive: &str, text_negative: &str) -> StyledPrompt {
        StyledPrompt {
            positive: self.prompt.replace(PROMPT_PLACEHOLDER, text_positive),
            negative: combine_negative(&self.negative_prompt, text_negative),
        }
    }
}

/// 合并模板与用户的负向提示词
///
/// 两者都非空时以 ", " 连接, 模板在前
pub fn combine_negative(template_negative: &str, text_negative: &str) -> String {
    match (template_negative.is_empty(), text_negative.is_empty()) {
        (_, true) => template_negative.to_string(),
        (true, false) => text_negative.to_string(),
        (false, false) => format!("{template_negative}, {text_negative}"),
    }
}
