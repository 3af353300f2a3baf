use crate::config::ScriptConfig;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read script template {path:?}")]
    ReadTemplate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write job script {path:?}")]
    WriteScript {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// substitutes the placeholders of a submission script template for a given job
#[derive(Debug, Clone)]
pub struct ScriptTemplate {
    content: String,
    slice_placeholder: String,
    job_placeholder: String,
    job_prefix: String,
}

impl ScriptTemplate {
    pub fn new(content: String, config: &ScriptConfig) -> Self {
        if !content.contains(&config.slice_placeholder) {
            warn!(
                "Template does not contain {}, every job would read the same slice",
                config.slice_placeholder
            );
        }

        Self {
            content,
            slice_placeholder: config.slice_placeholder.clone(),
            job_placeholder: format!("{}_0", config.job_prefix),
            job_prefix: config.job_prefix.clone(),
        }
    }

    pub fn load(path: &Path, config: &ScriptConfig) -> Result<Self, ScriptError> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Self::new(content, config)),
            Err(source) => {
                error!(path = ?path, "Failed to read script template: {source}");

                Err(ScriptError::ReadTemplate {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }

    /// file name of the script for `job`, e.g. `ecoBGModel-simulation_3.sh`
    pub fn file_name(&self, job: usize) -> String {
        format!("{}_{job}.sh", self.job_prefix)
    }

    pub fn render(&self, job: usize) -> String {
        let slice = self
            .slice_placeholder
            .strip_suffix('0')
            .map(|stem| format!("{stem}{job}"))
            .unwrap_or_else(|| format!("{}_{job}", self.slice_placeholder));

        self.content
            .replace(&self.slice_placeholder, &slice)
            .replace(&self.job_placeholder, &format!("{}_{job}", self.job_prefix))
    }
}

/// write one submission script per job into the scripts folder
#[instrument(skip_all, level = "info")]
pub fn create_scripts(
    scripts_dir: &Path,
    template: &ScriptTemplate,
    job_count: usize,
) -> Result<Vec<PathBuf>, ScriptError> {
    info!("Create scripts...");

    let scripts = (0..job_count)
        .map(|job| {
            let path = scripts_dir.join(template.file_name(job));
            write_script(&path, &template.render(job))?;
            debug!(path = ?path, "Created script for job {job}");

            Ok::<_, ScriptError>(path)
        })
        .collect::<Result<Vec<_>, _>>()?;

    info!("Scripts created.");

    Ok(scripts)
}

fn write_script(path: &Path, content: &str) -> Result<(), ScriptError> {
    let write_error = |source| ScriptError::WriteScript {
        path: path.to_path_buf(),
        source,
    };

    fs::write(path, content).map_err(write_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mut permissions = fs::metadata(path).map_err(write_error)?.permissions();
        permissions.set_mode(permissions.mode() | 0o111);
        fs::set_permissions(path, permissions).map_err(write_error)?;
    }

    Ok(())
}
