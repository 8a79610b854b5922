//! Provider registry for authentication modules.
//! This provides a minimal type-erased container for initialized provider state.

use std::any::{Any, TypeId};
use std::fmt::Debug;

/// Marker trait for provider state that can be shared across threads.
pub trait ProviderSlice: Any + Debug + Send + Sync {
    /// Unique identifier of the provider (e.g. `totp`).
    fn identifier(&self) -> &'static str;

    /// Helper to allow downcasting from the trait object.
    fn as_any(&self) -> &dyn Any;
}

/// A container for an initialized provider.
#[derive(Debug)]
pub struct InitializedProvider {
    pub id: &'static str,
    pub type_id: TypeId,
    pub state: Box<dyn ProviderSlice>,
}

impl InitializedProvider {
    /// Create a new initialized provider from a concrete state.
    pub fn new<T: ProviderSlice>(state: T) -> Self {
        Self { id: state.identifier(), type_id: TypeId::of::<T>(), state: Box::new(state) }
    }

    /// Borrows the concrete provider state, if it is a `T`.
    #[must_use]
    pub fn downcast_ref<T: ProviderSlice>(&self) -> Option<&T> {
        self.state.as_any().downcast_ref::<T>()
    }
}
