use std::collections::BTreeMap;

use crate::{
    animation::sequencer::ElementValues, foundation::core::ElementId, scroll::region::PinState,
};

/// Everything the rendering layer needs to draw the current frame.
///
/// Only numbers, indices and pin states; markup and styling stay with the renderer.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Presentation {
    /// Interpolated property values per element.
    pub properties: ElementValues,
    /// Active content index per swap target.
    pub active: BTreeMap<ElementId, usize>,
    /// Displayed counter values.
    pub counters: BTreeMap<ElementId, u64>,
    /// Pin state per pinned trigger element.
    pub pins: BTreeMap<ElementId, PinState>,
}

impl Presentation {
    /// Property value for `element`.
    pub fn property(&self, element: &str, property: &str) -> Option<f64> {
        self.properties
            .get(&ElementId::new(element))
            .and_then(|props| props.get(property))
            .copied()
    }

    /// Active index for a swap target.
    pub fn active(&self, element: &str) -> Option<usize> {
        self.active.get(&ElementId::new(element)).copied()
    }

    /// Counter value for `element`.
    pub fn counter(&self, element: &str) -> Option<u64> {
        self.counters.get(&ElementId::new(element)).copied()
    }

    /// Pin state for a trigger element.
    pub fn pin(&self, element: &str) -> Option<PinState> {
        self.pins.get(&ElementId::new(element)).copied()
    }

    /// `true` when nothing has been published.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
            && self.active.is_empty()
            && self.counters.is_empty()
            && self.pins.is_empty()
    }

    pub(crate) fn remove_property(&mut self, element: &ElementId, property: &str) {
        if let Some(props) = self.properties.get_mut(element) {
            props.remove(property);
            if props.is_empty() {
                self.properties.remove(element);
            }
        }
    }
}
