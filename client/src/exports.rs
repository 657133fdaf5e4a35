//! Export jobs the user started during this session.
//!
//! Plain ordered list: insertion order is kept, duplicates are allowed and
//! nothing is persisted.

use serde::{Deserialize, Serialize};

use crate::error::{ExportsError, ExportsResult};

/// One running or finished export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportJob {
    pub name: String,
    /// Requested output format, e.g. `"GeoJSON"`.
    pub output_format: String,
    /// Server-side task identifier.
    pub task_id: String,
}

impl ExportJob {
    pub fn new(name: impl Into<String>, output_format: impl Into<String>, task_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            output_format: output_format.into(),
            task_id: task_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportJobs {
    jobs: Vec<ExportJob>,
}

impl ExportJobs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a job at the end.
    pub fn add(&mut self, name: impl Into<String>, output_format: impl Into<String>, task_id: impl Into<String>) {
        let job = ExportJob::new(name, output_format, task_id);
        log::debug!("Export added: {} ({})", job.name, job.task_id);
        self.jobs.push(job);
    }

    /// Remove the job at `index`, shifting later jobs down.
    ///
    /// Out of range leaves the list as it was.
    pub fn remove(&mut self, index: usize) -> ExportsResult<ExportJob> {
        if index >= self.jobs.len() {
            return Err(ExportsError::IndexOutOfBounds {
                index,
                len: self.jobs.len(),
            });
        }
        Ok(self.jobs.remove(index))
    }

    pub fn jobs(&self) -> &[ExportJob] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn clear(&mut self) {
        self.jobs.clear();
    }
}
