//! 风格目录
//!
//! 目录文件为 JSON 列表, 每一项形如:
//! ```json
//! {"name": "sai-anime", "prompt": "anime artwork {prompt}", "negative_prompt": "photo"}
//! ```

use std::{borrow::Cow, fs, path::Path};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{
    error::Error,
    styler::template::{StyleTemplate, StyledPrompt},
};

/// 目录中的一项
///
/// 字段存在即为 `Some`, 值为 null 时是 `Some(Value::Null)`
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct StyleEntry {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub prompt: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub negative_prompt: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl StyleEntry {
    /// 字符串类型的名称
    pub fn name_str(&self) -> Option<&str> {
        self.name.as_ref().and_then(Value::as_str)
    }

    /// 字符串类型的模板
    pub fn prompt_str(&self) -> Option<&str> {
        self.prompt.as_ref().and_then(Value::as_str)
    }

    /// 负向提示词文本
    ///
    /// 缺失, null 或假值视为空, 其他非字符串值按文本输出
    pub fn negative_text(&self) -> Cow<'_, str> {
        match &self.negative_prompt {
            None | Some(Value::Null) | Some(Value::Bool(false)) => Cow::Borrowed(""),
            Some(Value::String(s)) => Cow::Borrowed(s),
            Some(Value::Bool(true)) => Cow::Borrowed("True"),
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Cow::Borrowed(""),
            Some(Value::Array(a)) if a.is_empty() => Cow::Borrowed(""),
            Some(Value::Object(o)) if o.is_empty() => Cow::Borrowed(""),
            Some(Value::Number(n)) => Cow::Owned(n.to_string()),
            Some(other) => Cow::Owned(other.to_string()),
        }
    }
}

/// 风格目录, 保持文件中的顺序
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StyleCatalog {
    entries: Vec<StyleEntry>,
}

impl StyleCatalog {
    pub fn from_value(value: Value) -> Result<Self, Error> {
        let Value::Array(items) = value else {
            return Err(Error::InvalidCatalog(
                "expected a list of templates".to_string(),
            ));
        };

        let mut entries = Vec::with_capacity(items.len());
        for item in items {
            // 非对象项保留为空项, 查找时越过它会报错
            let entry = if item.is_object() {
                serde_json::from_value(item)?
            } else {
                StyleEntry::default()
            };
            entries.push(entry);
        }
        Ok(Self { entries })
    }

    pub fn from_json_str(text: &str) -> Result<Self, Error> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    pub fn from_file(path: &Path) -> Result<Self, Error> {
        Self::from_value(read_json_file(path)?)
    }

    pub fn entries(&self) -> &[StyleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 风格名称列表, 缺少 name 或 name 不是字符串的项被跳过
    pub fn style_names(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter_map(|entry| entry.name_str().map(str::to_string))
            .collect()
    }

    /// 按名称查找模板, 首个匹配项生效
    ///
    /// 匹配项之前缺少 name 或 prompt 字段的项会中断查找,
    /// 字段存在但名称不匹配的项 (包括非字符串名称) 直接跳过.
    pub fn find(&self, style: &str) -> Result<StyleTemplate<'_>, Error> {
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.name.is_none() || entry.prompt.is_none() {
                return Err(Error::InvalidTemplate(index));
            }
            let Some(name) = entry.name_str().filter(|name| *name == style) else {
                continue;
            };
            // 匹配项的模板必须是字符串
            let prompt = entry.prompt_str().ok_or(Error::InvalidTemplate(index))?;
            return Ok(StyleTemplate {
                name,
                prompt,
                negative_prompt: entry.negative_text(),
            });
        }
        Err(Error::StyleNotFound(style.to_string()))
    }

    /// 查找模板并生成正负提示词
    pub fn apply(
        &self,
        style: &str,
        text_positive: &str,
        text_negative: &str,
    ) -> Result<StyledPrompt, Error> {
        Ok(self.find(style)?.apply(text_positive, text_negative))
    }
}

/// 读取 JSON 文件
///
/// 无法解码的 UTF-8 字节会被丢弃
pub fn read_json_file(path: &Path) -> Result<Value, Error> {
    let bytes = fs::read(path)?;
    let decoded = decode_utf8_ignore(&bytes);
    let text = decoded.strip_prefix('\u{feff}').unwrap_or(&decoded);
    Ok(serde_json::from_str(text)?)
}

fn decode_utf8_ignore(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const CATALOG: &str = r#"[
        {"name": "base", "prompt": "{prompt}"},
        {"name": "sai-anime", "prompt": "anime artwork {prompt} . vibrant", "negative_prompt": "photo, realism"},
        {"name": "sai-anime", "prompt": "shadowed duplicate {prompt}"},
        {"name": "nulls", "prompt": "{prompt} . nulls", "negative_prompt": null}
    ]"#;

    #[test]
    fn test_style_names_keep_order() -> anyhow::Result<()> {
        let catalog = StyleCatalog::from_json_str(CATALOG)?;
        assert_eq!(
            catalog.style_names(),
            vec!["base", "sai-anime", "sai-anime", "nulls"]
        );
        Ok(())
    }

    #[test]
    fn test_apply_first_match_wins() -> anyhow::Result<()> {
        let catalog = StyleCatalog::from_json_str(CATALOG)?;
        let styled = catalog.apply("sai-anime", "a fox", "blurry")?;
        assert_eq!(styled.positive, "anime artwork a fox . vibrant");
        assert_eq!(styled.negative, "photo, realism, blurry");
        Ok(())
    }

    #[test]
    fn test_apply_missing_negative_prompt() -> anyhow::Result<()> {
        let catalog = StyleCatalog::from_json_str(CATALOG)?;
        let styled = catalog.apply("base", "a fox", "")?;
        assert_eq!(styled.positive, "a fox");
        assert_eq!(styled.negative, "");

        let styled = catalog.apply("nulls", "a fox", "lowres")?;
        assert_eq!(styled.negative, "lowres");
        Ok(())
    }

    #[test]
    fn test_style_not_found() -> anyhow::Result<()> {
        let catalog = StyleCatalog::from_json_str(CATALOG)?;
        let err = catalog.apply("missing", "", "").unwrap_err();
        assert!(matches!(err, Error::StyleNotFound(ref name) if name == "missing"));
        Ok(())
    }

    #[test]
    fn test_empty_catalog() -> anyhow::Result<()> {
        let catalog = StyleCatalog::from_json_str("[]")?;
        assert!(catalog.is_empty());
        assert!(catalog.style_names().is_empty());
        assert!(matches!(
            catalog.find("base"),
            Err(Error::StyleNotFound(_))
        ));
        Ok(())
    }

    #[test]
    fn test_not_a_list() -> anyhow::Result<()> {
        let err = StyleCatalog::from_json_str(r#"{"name": "base"}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidCatalog(_)));
        Ok(())
    }

    #[test]
    fn test_malformed_entries() -> anyhow::Result<()> {
        let catalog = StyleCatalog::from_json_str(
            r#"[
                {"name": "ok", "prompt": "{prompt}"},
                "not an object",
                {"prompt": "nameless {prompt}"},
                {"name": "after", "prompt": "after {prompt}"}
            ]"#,
        )?;
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.style_names(), vec!["ok", "after"]);

        // 匹配项在无效项之前, 不受影响
        assert_eq!(catalog.apply("ok", "x", "")?.positive, "x");
        // 匹配项在无效项之后
        assert!(matches!(
            catalog.find("after"),
            Err(Error::InvalidTemplate(1))
        ));
        Ok(())
    }

    #[test]
    fn test_non_string_name_is_skipped() -> anyhow::Result<()> {
        let catalog = StyleCatalog::from_json_str(
            r#"[
                {"name": null, "prompt": "x {prompt}"},
                {"name": 7, "prompt": "seven {prompt}"},
                {"name": "after", "prompt": "after {prompt}"}
            ]"#,
        )?;
        assert_eq!(catalog.style_names(), vec!["after"]);

        let styled = catalog.apply("after", "fox", "")?;
        assert_eq!(styled.positive, "after fox");
        assert_eq!(styled.negative, "");
        Ok(())
    }

    #[test]
    fn test_non_string_prompt_on_match() -> anyhow::Result<()> {
        let catalog = StyleCatalog::from_json_str(
            r#"[
                {"name": "skipped", "prompt": 3},
                {"name": "broken", "prompt": null}
            ]"#,
        )?;
        assert!(matches!(
            catalog.find("broken"),
            Err(Error::InvalidTemplate(1))
        ));
        Ok(())
    }

    #[test]
    fn test_non_string_negative_prompt() -> anyhow::Result<()> {
        let catalog = StyleCatalog::from_json_str(
            r#"[
                {"name": "n", "prompt": "{prompt}", "negative_prompt": 5},
                {"name": "f", "prompt": "{prompt}", "negative_prompt": false},
                {"name": "t", "prompt": "{prompt}", "negative_prompt": true}
            ]"#,
        )?;
        assert_eq!(catalog.apply("n", "fox", "blur")?.negative, "5, blur");
        assert_eq!(catalog.apply("n", "fox", "")?.negative, "5");
        assert_eq!(catalog.apply("f", "fox", "blur")?.negative, "blur");
        assert_eq!(catalog.apply("t", "fox", "")?.negative, "True");
        Ok(())
    }

    #[test]
    fn test_read_json_file_drops_invalid_utf8() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"[{\"name\": \"caf\xff\xfee\", \"prompt\": \"{prompt}\"}]")?;
        file.flush()?;

        let catalog = StyleCatalog::from_file(file.path())?;
        assert_eq!(catalog.style_names(), vec!["cafe"]);
        Ok(())
    }

    #[test]
    fn test_read_json_file_with_bom() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all("\u{feff}[{\"name\": \"base\", \"prompt\": \"{prompt}\"}]".as_bytes())?;
        file.flush()?;

        let catalog = StyleCatalog::from_file(file.path())?;
        assert_eq!(catalog.style_names(), vec!["base"]);
        Ok(())
    }

    #[test]
    fn test_read_json_file_missing() -> anyhow::Result<()> {
        let err = read_json_file(Path::new("/nonexistent/sdxl_styles.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        Ok(())
    }
}
