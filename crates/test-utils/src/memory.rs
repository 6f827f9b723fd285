//! In-memory implementation of the dataset traits.
//!
//! Lets aggregation tests run without writing NetCDF files.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use grid_common::{DatasetLoader, GridDataset, GridError, GridResult, GriddedVariable};

/// A set of named variables standing in for one file.
#[derive(Debug, Clone, Default)]
pub struct MemoryDataset {
    variables: HashMap<String, GriddedVariable>,
}

impl MemoryDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variable(mut self, var: GriddedVariable) -> Self {
        self.variables.insert(var.name.clone(), var);
        self
    }
}

impl GridDataset for MemoryDataset {
    fn variable_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.variables.keys().cloned().collect();
        names.sort();
        names
    }

    fn read_variable(&self, name: &str, _time_dim: &str) -> GridResult<GriddedVariable> {
        self.variables
            .get(name)
            .cloned()
            .ok_or_else(|| GridError::VariableNotFound(name.to_string()))
    }
}

/// Serves [`MemoryDataset`]s by path and records every open attempt.
#[derive(Debug, Default)]
pub struct MemoryLoader {
    datasets: HashMap<PathBuf, MemoryDataset>,
    opened: RefCell<Vec<PathBuf>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dataset(mut self, path: impl Into<PathBuf>, dataset: MemoryDataset) -> Self {
        self.datasets.insert(path.into(), dataset);
        self
    }

    /// Shorthand for a dataset holding a single variable.
    pub fn with_variable(self, path: impl Into<PathBuf>, var: GriddedVariable) -> Self {
        self.with_dataset(path, MemoryDataset::new().with_variable(var))
    }

    /// Paths passed to [`DatasetLoader::open`], in call order.
    pub fn opened(&self) -> Vec<PathBuf> {
        self.opened.borrow().clone()
    }
}

impl DatasetLoader for MemoryLoader {
    type Dataset = MemoryDataset;

    fn open(&self, path: &Path) -> GridResult<MemoryDataset> {
        self.opened.borrow_mut().push(path.to_path_buf());
        self.datasets
            .get(path)
            .cloned()
            .ok_or_else(|| GridError::open_failed(path.display().to_string(), "no such file"))
    }
}
