pub(crate) mod position;
pub(crate) mod region;
pub(crate) mod tracker;
