pub(crate) mod config;
pub(crate) mod manifest;
pub(crate) mod reconcile;
