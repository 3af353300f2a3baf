use crate::{config::FolderConfig, prompt::Confirm};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{debug, info, instrument};

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Failed to remove folder {path:?}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to create folder {path:?}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to ask for confirmation")]
    Prompt(#[from] io::Error),
}

/// remove the outputs of a previous sweep
///
/// The data folder holds simulation results, so it is only removed after asking.
/// Old scripts and logs are always removed.
#[instrument(skip_all, level = "info")]
pub fn empty_scripts_folder<C: Confirm>(
    folders: &FolderConfig,
    confirm: &mut C,
) -> Result<(), WorkspaceError> {
    if folders.data.exists() {
        if confirm.confirm_removal("Do you want to remove data folder?")? {
            remove_folder(&folders.data)?;
            info!("Data folder has been erased.");
        } else {
            info!("Data folder has been conserved.");
        }
    }

    info!("Remove old scripts and logs...");
    remove_folder(&folders.scripts)?;
    remove_folder(&folders.logs)?;
    info!("Old scripts and logs have been removed.");

    Ok(())
}

/// create every configured folder that does not exist yet
pub fn create_folders(folders: &FolderConfig) -> Result<(), WorkspaceError> {
    for path in folders.all() {
        if !path.exists() {
            debug!(path = ?path, "Creating folder");

            fs::create_dir_all(path).map_err(|source| WorkspaceError::Create {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }

    Ok(())
}

fn remove_folder(path: &Path) -> Result<(), WorkspaceError> {
    if path.exists() {
        debug!(path = ?path, "Removing folder");

        fs::remove_dir_all(path).map_err(|source| WorkspaceError::Remove {
            path: path.to_path_buf(),
            source,
        })?;
    }

    Ok(())
}
