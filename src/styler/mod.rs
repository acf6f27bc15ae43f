//! 风格提示词相关的节点
use pyo3::{
    exceptions::PyRuntimeError,
    pyfunction,
    types::{PyModule, PyModuleMethods},
    wrap_pyfunction, Bound, PyErr, PyResult, Python,
};

pub mod catalog;
pub mod pack;
pub mod prompt_styler;
pub mod store;
pub mod template;

mod nodes;
pub use nodes::*;

pub use catalog::{StyleCatalog, StyleEntry};
pub use pack::StylePack;
pub use prompt_styler::{LogPrompt, PromptStyler};
pub use store::CatalogStore;
pub use template::{StyleTemplate, StyledPrompt};

use crate::error::Error;

fn to_py_err(e: Error) -> PyErr {
    PyErr::new::<PyRuntimeError, _>(e.to_string())
}

/// 风格包中的风格名称
#[pyfunction]
fn style_names(class_name: &str) -> PyResult<Vec<String>> {
    let pack = StylePack::from_class_name(class_name).map_err(to_py_err)?;
    PromptStyler::style_names(pack).map_err(to_py_err)
}

/// 应用风格, 返回 (正向提示词, 负向提示词)
#[pyfunction]
fn apply_style(
    class_name: &str,
    style: &str,
    text_positive: &str,
    text_negative: &str,
) -> PyResult<(String, String)> {
    let apply = || -> Result<StyledPrompt, Error> {
        let pack = StylePack::from_class_name(class_name)?;
        let catalog = CatalogStore::global()?.load(pack)?;
        catalog.apply(style, text_positive, text_negative)
    };
    apply().map(StyledPrompt::into_tuple).map_err(to_py_err)
}

/// 风格模块
pub fn submodule(py: Python<'_>) -> PyResult<Bound<'_, PyModule>> {
    let submodule = PyModule::new(py, "styler")?;
    submodule.add_function(wrap_pyfunction!(style_names, &submodule)?)?;
    submodule.add_function(wrap_pyfunction!(apply_style, &submodule)?)?;
    nodes::add_classes(&submodule)?;
    Ok(submodule)
}
