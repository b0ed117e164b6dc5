pub(crate) mod mode;
pub(crate) mod readiness;
pub(crate) mod slot;
