//! PyO3 bindings.
//!
//! The Python web layer calls into these functions and receives plain dicts
//! and lists shaped exactly like the JSON wire contract.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};
use serde::Serialize;
use serde_json::Value;

use crate::api::{handle_analyze, AnalyzeRequest, FileAnalysisResponse};
use crate::config::{current_config, install_config, reset_config as reset_active_config, AnalysisConfig};
use crate::error::AnalysisError;
use crate::logging::init_logger;
use crate::models::{ContentItem, ContentType};
use crate::pipeline::{Analyzer, BatchOptions};

fn build_analyzer() -> PyResult<Analyzer> {
    Analyzer::new(current_config()).map_err(|e| PyValueError::new_err(e.to_string()))
}

fn json_to_py(py: Python<'_>, value: &Value) -> PyResult<PyObject> {
    Ok(match value {
        Value::Null => py.None(),
        Value::Bool(b) => b.to_object(py),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_object(py)
            } else if let Some(u) = n.as_u64() {
                u.to_object(py)
            } else {
                n.as_f64().unwrap_or_default().to_object(py)
            }
        }
        Value::String(s) => s.to_object(py),
        Value::Array(items) => {
            let list = PyList::empty(py);
            for item in items {
                list.append(json_to_py(py, item)?)?;
            }
            list.to_object(py)
        }
        Value::Object(map) => {
            let dict = PyDict::new(py);
            for (key, val) in map {
                dict.set_item(key, json_to_py(py, val)?)?;
            }
            dict.to_object(py)
        }
    })
}

fn to_py<T: Serialize>(py: Python<'_>, value: &T) -> PyResult<PyObject> {
    let json = serde_json::to_value(value).map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
    json_to_py(py, &json)
}

/// Analyse one piece of content.
///
/// Returns the success envelope, or `{status, error, message}` when the
/// input is rejected.
#[pyfunction]
#[pyo3(signature = (content, content_type="general".to_string(), user_id=None, ml_score=None, include_pii=true))]
fn analyze_content(
    py: Python<'_>,
    content: String,
    content_type: String,
    user_id: Option<String>,
    ml_score: Option<f64>,
    include_pii: bool,
) -> PyResult<Py<PyAny>> {
    init_logger();

    let content_type = match content_type.parse::<ContentType>() {
        Ok(ct) => ct,
        Err(e) => return error_to_py(py, &e),
    };

    let request = AnalyzeRequest {
        content,
        content_type,
        user_id,
        include_pii,
        ml_score,
    };

    match handle_analyze(&build_analyzer()?, &request) {
        Ok(response) => to_py(py, &response),
        Err(err) => {
            let dict = PyDict::new(py);
            dict.set_item("status", err.status)?;
            dict.set_item("error", &err.body.error)?;
            dict.set_item("message", &err.body.message)?;
            Ok(dict.into())
        }
    }
}

fn error_to_py(py: Python<'_>, err: &AnalysisError) -> PyResult<Py<PyAny>> {
    let dict = PyDict::new(py);
    dict.set_item("status", err.status_code())?;
    dict.set_item("error", err.code())?;
    dict.set_item("message", err.to_string())?;
    Ok(dict.into())
}

/// Analyse uploaded documents whose text was extracted on the Python side.
///
/// # Arguments
/// * `documents` - (filename, extracted_text, extraction_error) per upload,
///   in upload order. A missing text marks that upload as failed.
/// * `content_type` - Content type applied to every document
/// * `workers` - Worker count; defaults to the configured batch_workers
///
/// # Returns
/// A single result dict for one successful upload, otherwise a list of
/// `{analysis}` / `{error}` dicts aligned with the upload order.
#[pyfunction]
#[pyo3(signature = (documents, content_type="document".to_string(), workers=None))]
fn analyze_documents(
    py: Python<'_>,
    documents: Vec<(String, Option<String>, Option<String>)>,
    content_type: String,
    workers: Option<usize>,
) -> PyResult<Py<PyAny>> {
    init_logger();

    let content_type = match content_type.parse::<ContentType>() {
        Ok(ct) => ct,
        Err(e) => return error_to_py(py, &e),
    };
    let analyzer = build_analyzer()?;
    let options = match workers {
        Some(workers) => BatchOptions::with_workers(workers),
        None => analyzer.batch_options(),
    };

    let items: Vec<Result<ContentItem, AnalysisError>> = documents
        .into_iter()
        .map(|(filename, text, error)| match text {
            Some(text) => Ok(ContentItem::new(text, content_type).with_filename(filename)),
            None => Err(AnalysisError::Extraction {
                filename,
                reason: error.unwrap_or_else(|| "no text extracted".to_string()),
            }),
        })
        .collect();

    let batch = analyzer.analyze_batch(&items, &options);
    to_py(py, &FileAnalysisResponse::from_batch(batch))
}

/// Install a JSON configuration for subsequent calls.
#[pyfunction]
fn load_config(config_json: String) -> PyResult<()> {
    init_logger();
    let config = AnalysisConfig::from_json_str(&config_json)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    install_config(config).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Restore the default configuration.
#[pyfunction]
fn reset_config() -> PyResult<()> {
    init_logger();
    reset_active_config();
    Ok(())
}

/// Get the active configuration as a dict.
#[pyfunction]
fn get_config(py: Python<'_>) -> PyResult<Py<PyAny>> {
    to_py(py, &current_config())
}

/// Python module definition
#[pymodule]
fn adshield_core(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(analyze_content, m)?)?;
    m.add_function(wrap_pyfunction!(analyze_documents, m)?)?;
    m.add_function(wrap_pyfunction!(load_config, m)?)?;
    m.add_function(wrap_pyfunction!(reset_config, m)?)?;
    m.add_function(wrap_pyfunction!(get_config, m)?)?;
    Ok(())
}
