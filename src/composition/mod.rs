pub(crate) mod declaration;
pub(crate) mod folder;
pub(crate) mod record;
pub(crate) mod registry;
