pub const DATA_DIR: &str = "HUBCFG_DATA_DIR";
pub const HUB_URL: &str = "HUBCFG_HUB_URL";
pub const AUTH_TOKEN: &str = "HUBCFG_AUTH_TOKEN";

pub const LOG_LEVEL: &str = "LOG_LEVEL";
