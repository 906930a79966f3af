//! Python bindings for the scoring core

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::arabic::{normalize_arabic, strip_diacritics};
use crate::scoring::{ScoreResult, Scorer};
use crate::similarity::similarity;

/// Python module definition
#[pymodule]
fn iqra_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_normalize_arabic, m)?)?;
    m.add_function(wrap_pyfunction!(py_strip_diacritics, m)?)?;
    m.add_function(wrap_pyfunction!(py_similarity, m)?)?;
    m.add_function(wrap_pyfunction!(py_compute_score, m)?)?;
    m.add_function(wrap_pyfunction!(py_score_recitation, m)?)?;
    m.add_function(wrap_pyfunction!(py_batch_score_recitations, m)?)?;
    Ok(())
}

#[pyfunction]
#[pyo3(name = "normalize_arabic")]
fn py_normalize_arabic(text: &str) -> String {
    normalize_arabic(text)
}

#[pyfunction]
#[pyo3(name = "strip_diacritics")]
fn py_strip_diacritics(text: &str) -> String {
    strip_diacritics(text)
}

#[pyfunction]
#[pyo3(name = "similarity", signature = (text1, text2, normalize=None))]
fn py_similarity(text1: &str, text2: &str, normalize: Option<bool>) -> f64 {
    similarity(text1, text2, normalize.unwrap_or(true))
}

#[pyfunction]
#[pyo3(name = "compute_score")]
fn py_compute_score(expected: &str, actual: &str) -> f64 {
    Scorer::default().compute_score(expected, actual)
}

/// Score a recitation, returning `{"score", "diffs", "tajweedFlags"}`
#[pyfunction]
#[pyo3(name = "score_recitation")]
fn py_score_recitation<'py>(
    py: Python<'py>,
    expected: &str,
    actual: &str,
) -> PyResult<Bound<'py, PyDict>> {
    let result = Scorer::default().score_recitation(expected, actual);
    result_to_dict(py, &result)
}

/// Batch scoring for parallel processing, results in input order
#[pyfunction]
#[pyo3(name = "batch_score_recitations")]
fn py_batch_score_recitations<'py>(
    py: Python<'py>,
    pairs: Vec<(String, String)>,
) -> PyResult<Bound<'py, PyList>> {
    let results = py.allow_threads(|| Scorer::default().batch_score_recitations(&pairs));
    let list = PyList::empty_bound(py);
    for result in &results {
        list.append(result_to_dict(py, result)?)?;
    }
    Ok(list)
}

fn result_to_dict<'py>(py: Python<'py>, result: &ScoreResult) -> PyResult<Bound<'py, PyDict>> {
    let diffs = PyList::empty_bound(py);
    for op in &result.diffs {
        let entry = PyDict::new_bound(py);
        entry.set_item("op", op.op.as_str())?;
        entry.set_item("expected", &op.expected)?;
        entry.set_item("actual", &op.actual)?;
        entry.set_item("i1", op.i1)?;
        entry.set_item("i2", op.i2)?;
        entry.set_item("j1", op.j1)?;
        entry.set_item("j2", op.j2)?;
        diffs.append(entry)?;
    }

    let dict = PyDict::new_bound(py);
    dict.set_item("score", result.score)?;
    dict.set_item("diffs", diffs)?;
    dict.set_item("tajweedFlags", &result.tajweed_flags)?;
    Ok(dict)
}
