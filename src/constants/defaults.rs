use std::time::Duration;

pub const API_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
pub const API_VERSION: &str = "2020-05-31-preview";
pub const LOG_LEVEL: &str = "warn";
pub const DATA_DIR: &str = "data";
pub const LIST_TOP: i64 = 10;
pub const QUERY_PAGE_SIZE: usize = 100;
