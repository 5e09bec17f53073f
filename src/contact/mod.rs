pub(crate) mod submit;
pub(crate) mod validate;
