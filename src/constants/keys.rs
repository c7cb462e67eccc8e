// Settings store keys
pub const HUB_URL: &str = "hub_url";
pub const AUTH_TOKEN: &str = "auth_token";

// Wire document keys
pub const CONTENT: &str = "content";
pub const METRICS: &str = "metrics";
pub const QUERIES: &str = "queries";
pub const SYSTEM_METRICS: &str = "systemMetrics";
pub const DEVICE_CONTENT: &str = "deviceContent";
pub const MODULE_CONTENT: &str = "moduleContent";
pub const MODULES_CONTENT: &str = "modulesContent";
pub const TARGET_CONDITION: &str = "targetCondition";
pub const PRIORITY: &str = "priority";
pub const LABELS: &str = "labels";
