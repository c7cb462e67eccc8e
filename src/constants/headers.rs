pub const IF_MATCH: &str = "If-Match";
pub const AUTHORIZATION: &str = "Authorization";
pub const CONTINUATION: &str = "x-ms-continuation";
pub const MAX_ITEM_COUNT: &str = "x-ms-max-item-count";
