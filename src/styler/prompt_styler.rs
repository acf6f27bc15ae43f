//! 风格提示词节点
//!
//! 所有风格包节点的输入输出完全一致, 仅目录文件不同,
//! 节点由 `prompt_styler_nodes!` 宏统一生成.

use log::{error, info};
use pyo3::{
    exceptions::PyRuntimeError,
    types::{PyDict, PyDictMethods},
    Py, PyErr, PyResult, Python,
};
use strum_macros::{Display, EnumString};

use crate::{
    core::{types::NODE_STRING, PromptServer},
    error::Error,
    styler::{pack::StylePack, store::CatalogStore, template::StyledPrompt},
};

/// 是否打印提示词
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
pub enum LogPrompt {
    No,
    Yes,
}

/// 风格提示词节点的公共逻辑
pub struct PromptStyler;

impl PromptStyler {
    /// 节点输入定义
    /// ```py
    /// {
    ///     "required": {
    ///         "text_positive": ("STRING", {"default": "", "multiline": True}),
    ///         "text_negative": ("STRING", {"default": "", "multiline": True}),
    ///         "style": ((styles), ),
    ///         "log_prompt": (["No", "Yes"], {"default":"No"}),
    ///     },
    /// }
    /// ```
    pub fn input_types(py: Python<'_>, pack: StylePack) -> PyResult<Py<PyDict>> {
        let styles = Self::style_names(pack).map_err(|e| {
            error!("{} load styles failed, {e}", pack.class_name());
            PyErr::new::<PyRuntimeError, _>(e.to_string())
        })?;

        let dict = PyDict::new(py);
        dict.set_item("required", {
            let required = PyDict::new(py);
            required.set_item(
                "text_positive",
                (NODE_STRING, {
                    let text_positive = PyDict::new(py);
                    text_positive.set_item("default", "")?;
                    text_positive.set_item("multiline", true)?;
                    text_positive
                }),
            )?;
            required.set_item(
                "text_negative",
                (NODE_STRING, {
                    let text_negative = PyDict::new(py);
                    text_negative.set_item("default", "")?;
                    text_negative.set_item("multiline", true)?;
                    text_negative
                }),
            )?;
            required.set_item("style", (styles,))?;
            required.set_item(
                "log_prompt",
                (
                    vec![LogPrompt::No.to_string(), LogPrompt::Yes.to_string()],
                    {
                        let log_prompt = PyDict::new(py);
                        log_prompt.set_item("default", LogPrompt::No.to_string())?;
                        log_prompt
                    },
                ),
            )?;
            required
        })?;
        Ok(dict.into())
    }

    /// 节点执行, 出错时通知前端并抛出 RuntimeError
    pub fn execute<T: PromptServer>(
        node: &T,
        py: Python<'_>,
        pack: StylePack,
        text_positive: &str,
        text_negative: &str,
        style: &str,
        log_prompt: &str,
    ) -> PyResult<(String, String)> {
        let results = Self::prompt_styler(pack, text_positive, text_negative, style, log_prompt);

        match results {
            Ok(v) => Ok(v.into_tuple()),
            Err(e) => {
                error!("{} error, {e}", pack.class_name());
                if let Err(e) = node.send_error(py, pack.class_name().to_string(), e.to_string()) {
                    error!("send error failed, {e}");
                    return Err(PyErr::new::<PyRuntimeError, _>(e.to_string()));
                };
                Err(PyErr::new::<PyRuntimeError, _>(e.to_string()))
            }
        }
    }

    /// 风格包中的风格名称
    pub fn style_names(pack: StylePack) -> Result<Vec<String>, Error> {
        let catalog = CatalogStore::global()?.load(pack)?;
        Ok(catalog.style_names())
    }

    /// 生成风格化提示词
    pub fn prompt_styler(
        pack: StylePack,
        text_positive: &str,
        text_negative: &str,
        style: &str,
        log_prompt: &str,
    ) -> Result<StyledPrompt, Error> {
        let log_prompt = log_prompt
            .parse::<LogPrompt>()
            .map_err(|e| Error::ParseEnumString(e.to_string()))?;

        let catalog = CatalogStore::global()?.load(pack)?;
        let styled = catalog.apply(style, text_positive, text_negative)?;

        if log_prompt == LogPrompt::Yes {
            info!("style: {style}");
            info!("text_positive: {text_positive}");
            info!("text_negative: {text_negative}");
            info!("positive_prompt: {}", styled.positive);
            info!("negative_prompt: {}", styled.negative);
        }

        Ok(styled)
    }
}

/// 为每个风格包生成一个节点
macro_rules! prompt_styler_nodes {
    ($($node:ident => $pack:ident),* $(,)?) => {
        $(
            #[allow(clippy::upper_case_acronyms)]
            #[pyo3::pyclass(subclass)]
            pub struct $node {}

            impl $crate::core::PromptServer for $node {}

            impl $node {
                pub const PACK: $crate::styler::pack::StylePack =
                    $crate::styler::pack::StylePack::$pack;
            }

            #[pyo3::pymethods]
            impl $node {
                #[new]
                fn new() -> Self {
                    Self {}
                }

                #[classattr]
                #[pyo3(name = "INPUT_IS_LIST")]
                fn input_is_list() -> bool {
                    false
                }

                #[classattr]
                #[pyo3(name = "RETURN_TYPES")]
                fn return_types() -> (&'static str, &'static str) {
                    (
                        $crate::core::types::NODE_STRING,
                        $crate::core::types::NODE_STRING,
                    )
                }

                #[classattr]
                #[pyo3(name = "RETURN_NAMES")]
                fn return_names() -> (&'static str, &'static str) {
                    ("positive_prompt_text_g", "negative_prompt_text_g")
                }

                #[classattr]
                #[pyo3(name = "OUTPUT_IS_LIST")]
                fn output_is_list() -> (bool, bool) {
                    (false, false)
                }

                #[classattr]
                #[pyo3(name = "CATEGORY")]
                const CATEGORY: &'static str =
                    $crate::core::category::CATEGORY_STYLE_PROMPTS;

                #[classattr]
                #[pyo3(name = "DESCRIPTION")]
                fn description() -> String {
                    format!(
                        "Apply a style from the {} catalog to the positive and negative prompts.",
                        Self::PACK.display_name()
                    )
                }

                #[classattr]
                #[pyo3(name = "FUNCTION")]
                const FUNCTION: &'static str = "prompt_styler";

                #[classmethod]
                #[pyo3(name = "INPUT_TYPES")]
                fn input_types(
                    _cls: &pyo3::Bound<'_, pyo3::types::PyType>,
                ) -> pyo3::PyResult<pyo3::Py<pyo3::types::PyDict>> {
                    pyo3::Python::with_gil(|py| {
                        $crate::styler::prompt_styler::PromptStyler::input_types(py, Self::PACK)
                    })
                }

                #[pyo3(name = "prompt_styler")]
                fn prompt_styler(
                    &self,
                    py: pyo3::Python<'_>,
                    text_positive: &str,
                    text_negative: &str,
                    style: &str,
                    log_prompt: &str,
                ) -> pyo3::PyResult<(String, String)> {
                    $crate::styler::prompt_styler::PromptStyler::execute(
                        self,
                        py,
                        Self::PACK,
                        text_positive,
                        text_negative,
                        style,
                        log_prompt,
                    )
                }
            }
        )*

        /// Style prompt node register
        pub fn node_register(
            py: pyo3::Python<'_>,
        ) -> pyo3::PyResult<Vec<$crate::core::node::NodeRegister<'_>>> {
            let nodes: Vec<$crate::core::node::NodeRegister> = vec![
                $(
                    $crate::core::node::NodeRegister(
                        $node::PACK.class_name(),
                        py.get_type::<$node>(),
                        $node::PACK.display_name(),
                    ),
                )*
            ];
            Ok(nodes)
        }

        /// 添加所有节点到模块
        pub(crate) fn add_classes(
            submodule: &pyo3::Bound<'_, pyo3::types::PyModule>,
        ) -> pyo3::PyResult<()> {
            use pyo3::types::PyModuleMethods;
            $(submodule.add_class::<$node>()?;)*
            Ok(())
        }

        /// (Rust 类型名称, 风格包)
        #[cfg(test)]
        const NODE_PACKS: &[(&str, $crate::styler::pack::StylePack)] = &[
            $((stringify!($node), $crate::styler::pack::StylePack::$pack),)*
        ];
    };
}

pub(crate) use prompt_styler_nodes;
