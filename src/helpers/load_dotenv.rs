use std::path::PathBuf;

use crate::helpers::base_path;

/// Loads `.env` from the working directory, then `$HUBCFG_DATA_DIR/.env`.
///
/// Runs before the logger is set up (the files may set `LOG_LEVEL`), so the
/// loaded paths are returned for the caller to log.
pub fn load_dotenv() -> Vec<PathBuf> {
    let mut loaded = Vec::new();
    if let Ok(path) = dotenv::dotenv() {
        loaded.push(path);
    }
    let data_dir_dotenv = base_path::DATA_DIR.join(".env");
    if dotenv::from_path(&data_dir_dotenv).is_ok() {
        loaded.push(data_dir_dotenv);
    }
    loaded
}
