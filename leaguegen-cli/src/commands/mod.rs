pub(crate) mod build;
pub(crate) mod diff;
pub(crate) mod patches;
