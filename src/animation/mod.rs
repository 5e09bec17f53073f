pub(crate) mod curve;
pub(crate) mod ease;
pub(crate) mod playhead;
pub(crate) mod sequencer;
pub(crate) mod timeline;
