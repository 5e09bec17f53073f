pub(crate) mod animation_engine;
pub(crate) mod frame;
pub(crate) mod presentation;
pub(crate) mod scope;
