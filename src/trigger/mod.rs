pub(crate) mod counter;
pub(crate) mod swap;
