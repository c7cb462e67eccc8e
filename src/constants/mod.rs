pub mod defaults;
pub mod envvars;
pub mod headers;
pub mod keys;
