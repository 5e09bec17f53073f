pub(crate) mod fps;
pub(crate) mod throttle;
