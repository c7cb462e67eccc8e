use std::{env, path::PathBuf};

use once_cell::sync::Lazy;

use crate::constants::{defaults, envvars};

pub static DATA_DIR: Lazy<PathBuf> = Lazy::new(|| {
    if let Ok(data_dir) = env::var(envvars::DATA_DIR) {
        return data_dir.into();
    }
    PathBuf::from(".").join(defaults::DATA_DIR)
});
