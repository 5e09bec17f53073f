use crate::engine::animation_engine::BindingId;

/// Everything one component mounted on the engine.
///
/// Pass it to [`crate::AnimationEngine::revert`] on unmount; that removes every region, binding and
/// pending frame callback it owns in one step.
#[derive(Debug)]
#[must_use = "a scope must be reverted to release its listeners"]
pub struct Scope {
    name: String,
    bindings: Vec<BindingId>,
}

impl Scope {
    /// Create an empty scope.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bindings: Vec::new(),
        }
    }

    /// Scope name, used in logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bindings mounted through this scope, in mount order.
    pub fn bindings(&self) -> &[BindingId] {
        &self.bindings
    }

    /// `true` when nothing was mounted.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub(crate) fn push(&mut self, id: BindingId) {
        self.bindings.push(id);
    }

    pub(crate) fn into_bindings(self) -> Vec<BindingId> {
        self.bindings
    }
}
