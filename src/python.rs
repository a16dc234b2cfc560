use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;
use std::sync::Arc;
use tokio::runtime::Runtime;

use crate::core::Candidate as RustCandidate;
use crate::error::RegistryError;
use crate::ranking::{Ranker, RankingStrategy};
use crate::service::CandidateService;

fn to_py_err(err: RegistryError) -> PyErr {
    if err.is_client_error() {
        PyValueError::new_err(err.to_string())
    } else {
        PyRuntimeError::new_err(err.to_string())
    }
}

/// Python wrapper for CandidateService
#[pyclass]
struct CandidateRegistry {
    service: Arc<CandidateService>,
    runtime: Arc<Runtime>,
}

#[pymethods]
impl CandidateRegistry {
    /// Open a registry over a SQLite database
    #[new]
    #[pyo3(signature = (db_path, ranker = None))]
    fn new(db_path: String, ranker: Option<String>) -> PyResult<Self> {
        let strategy = match ranker {
            Some(name) => name.parse::<RankingStrategy>().map_err(to_py_err)?,
            None => RankingStrategy::default(),
        };

        let runtime = Arc::new(Runtime::new().map_err(|e| PyRuntimeError::new_err(e.to_string()))?);

        let service = runtime
            .block_on(CandidateService::with_strategy(&db_path, strategy))
            .map_err(to_py_err)?;

        Ok(Self {
            service: Arc::new(service),
            runtime,
        })
    }

    /// Ranked candidates for a name query, as dicts
    fn search(&self, query: String) -> PyResult<Vec<PyObject>> {
        let service = self.service.clone();
        let results = self
            .runtime
            .block_on(async move { service.search(&query).await })
            .map_err(to_py_err)?;

        Python::with_gil(|py| results.iter().map(|c| candidate_to_py(py, c)).collect())
    }

    /// Number of stored candidates
    fn count(&self) -> PyResult<u64> {
        let service = self.service.clone();
        self.runtime
            .block_on(async move { service.count().await })
            .map_err(to_py_err)
    }
}

/// Rank plain names; returns indices into `names`, best match first
#[pyfunction]
#[pyo3(signature = (query, names, ranker = None))]
fn rank_names(query: &str, names: Vec<String>, ranker: Option<String>) -> PyResult<Vec<usize>> {
    let strategy = match ranker {
        Some(name) => name.parse::<RankingStrategy>().map_err(to_py_err)?,
        None => RankingStrategy::default(),
    };
    let names: Vec<&str> = names.iter().map(String::as_str).collect();

    strategy.build().rank_indices(query, &names).map_err(to_py_err)
}

/// Convert Candidate to Python dict
fn candidate_to_py(py: Python, candidate: &RustCandidate) -> PyResult<PyObject> {
    let dict = PyDict::new(py);
    dict.set_item("id", candidate.id)?;
    dict.set_item("name", &candidate.name)?;
    dict.set_item("age", candidate.age)?;
    dict.set_item("gender", candidate.gender.code())?;
    dict.set_item("email", &candidate.email)?;
    dict.set_item("phone_number", &candidate.phone_number)?;
    Ok(dict.into())
}

/// Python module
#[pymodule]
fn candidate_registry(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<CandidateRegistry>()?;
    m.add_function(wrap_pyfunction!(rank_names, m)?)?;
    m.add("__version__", crate::VERSION)?;
    Ok(())
}
