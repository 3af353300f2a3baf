use crate::{partition::JobAssignment, sweep::ParameterSet};
use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

pub const SLICE_PREFIX: &str = "slice_";
pub const SLICE_EXTENSION: &str = "bin";

#[derive(Debug, Error)]
pub enum SliceError {
    #[error("Failed to access slice file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to (de)serialize slice file {path:?}")]
    Encoding {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },
}

/// path of the slice belonging to `job` inside the parameters folder
pub fn slice_path(folder: &Path, job: usize) -> PathBuf {
    folder.join(format!("{SLICE_PREFIX}{job}.{SLICE_EXTENSION}"))
}

/// write one slice per job, returns the written paths in job order
#[instrument(skip(jobs), level = "info")]
pub fn save_input_parameters(
    folder: &Path,
    jobs: &JobAssignment<ParameterSet>,
) -> Result<Vec<PathBuf>, SliceError> {
    info!("Save input parameters...");

    let written = jobs
        .iter()
        .map(|(job, tasks)| {
            let path = slice_path(folder, *job);
            save_slice(&path, tasks)?;
            debug!(path = ?path, tasks = tasks.len(), "Saved slice for job {job}");

            Ok::<_, SliceError>(path)
        })
        .collect::<Result<Vec<_>, _>>()?;

    remove_stale_slices(folder, jobs)?;
    info!("Input parameters saved.");

    Ok(written)
}

/// job index of a slice file name, `None` for anything else
pub fn slice_job(file_name: &str) -> Option<usize> {
    file_name
        .strip_prefix(SLICE_PREFIX)?
        .strip_suffix(SLICE_EXTENSION)?
        .strip_suffix('.')?
        .parse()
        .ok()
}

/// remove slices of jobs that no longer exist, e.g. after lowering the job count
fn remove_stale_slices(
    folder: &Path,
    jobs: &JobAssignment<ParameterSet>,
) -> Result<(), SliceError> {
    let io_error = |path: &Path, source| SliceError::Io {
        path: path.to_path_buf(),
        source,
    };

    for entry in fs::read_dir(folder).map_err(|source| io_error(folder, source))? {
        let path = entry.map_err(|source| io_error(folder, source))?.path();
        let stale = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(slice_job)
            .filter(|job| !jobs.contains_key(job));

        if let Some(job) = stale {
            warn!(path = ?path, "Removing slice of job {job} left over from a previous sweep");
            fs::remove_file(&path).map_err(|source| io_error(path.as_path(), source))?;
        }
    }

    Ok(())
}

pub fn save_slice(path: &Path, tasks: &[ParameterSet]) -> Result<(), SliceError> {
    let io_error = |source| SliceError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(File::create(path).map_err(io_error)?);

    bincode::serialize_into(&mut writer, tasks).map_err(|source| {
        error!(path = ?path, "Failed to encode slice: {source}");

        SliceError::Encoding {
            path: path.to_path_buf(),
            source,
        }
    })?;

    writer.flush().map_err(io_error)
}

/// read back the tasks of a single job, this is what a cluster job does on startup
pub fn load_slice(path: &Path) -> Result<Vec<ParameterSet>, SliceError> {
    let file = File::open(path).map_err(|source| SliceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    bincode::deserialize_from(BufReader::new(file)).map_err(|source| SliceError::Encoding {
        path: path.to_path_buf(),
        source,
    })
}
