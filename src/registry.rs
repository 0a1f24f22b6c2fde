use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::*;

#[derive(Debug)]
enum RegistryEntry {
    Mock(Box<dyn Any>),
    Concrete(Box<dyn Any>),
}

enum RegistryContent<'a, I: ?Sized + Interface> {
    None,
    Mismatch(&'static str),
    Mock(&'a MockHandle<I>),
    Concrete(&'a Arc<I>),
}

/// Store at most one mock or concrete instance for each interface
#[derive(Default)]
pub struct MockRegistry(HashMap<TypeId, RegistryEntry>);

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieve a stored entry if it exists
    fn get<I: ?Sized + Interface>(&self) -> RegistryContent<'_, I> {
        match self.0.get(&TypeId::of::<I>()) {
            None => RegistryContent::None,
            Some(RegistryEntry::Mock(b)) => match b.downcast_ref::<MockHandle<I>>() {
                None => RegistryContent::Mismatch("mock handle"),
                Some(h) => RegistryContent::Mock(h),
            },
            Some(RegistryEntry::Concrete(b)) => match b.downcast_ref::<Arc<I>>() {
                None => RegistryContent::Mismatch("concrete instance"),
                Some(c) => RegistryContent::Concrete(c),
            },
        }
    }

    /// Obtain the mock handle for an interface, creating it if needed.
    ///
    /// Fails if a concrete instance is registered for the interface.
    pub fn mock<I: ?Sized + Interface>(&mut self) -> Result<MockHandle<I>, AutoMockError> {
        let type_name = type_name::<I>();
        match self.get::<I>() {
            RegistryContent::Mock(h) => {
                trace!(type_name, "Reusing registered mock");
                return Ok(h.clone());
            }
            RegistryContent::None => (),
            RegistryContent::Concrete(_) => {
                return Err(AutoMockError::TypeMismatch {
                    type_name,
                    expected: "mock handle",
                })
            }
            RegistryContent::Mismatch(expected) => {
                return Err(AutoMockError::TypeMismatch {
                    type_name,
                    expected,
                })
            }
        }

        let handle = MockHandle::<I>::create()?;
        self.0.insert(
            TypeId::of::<I>(),
            RegistryEntry::Mock(Box::new(handle.clone())),
        );
        debug!(type_name, "Created mock");
        Ok(handle)
    }

    /// The mock handle registered for an interface, without creating it
    pub fn existing_mock<I: ?Sized + Interface>(&self) -> Option<MockHandle<I>> {
        match self.get::<I>() {
            RegistryContent::Mock(h) => Some(h.clone()),
            _ => None,
        }
    }

    /// Replace the entry of an interface with the given mock handle
    pub fn inject<I: ?Sized + Interface>(&mut self, handle: MockHandle<I>) {
        let previous = self
            .0
            .insert(TypeId::of::<I>(), RegistryEntry::Mock(Box::new(handle)));
        debug!(
            type_name = type_name::<I>(),
            replaced = previous.is_some(),
            "Injected mock"
        );
    }

    /// Replace the entry of an interface with a concrete instance
    pub fn implement<I: ?Sized + Interface>(&mut self, instance: Arc<I>) {
        let previous = self
            .0
            .insert(TypeId::of::<I>(), RegistryEntry::Concrete(Box::new(instance)));
        debug!(
            type_name = type_name::<I>(),
            replaced = previous.is_some(),
            "Registered concrete implementation"
        );
    }

    /// Obtain the value given to constructors for an interface.
    ///
    /// This is the concrete instance if one was registered, or the object of the (possibly new) mock.
    pub fn resolve<I: ?Sized + Interface>(&mut self) -> Result<Arc<I>, AutoMockError> {
        if let RegistryContent::Concrete(c) = self.get::<I>() {
            trace!(type_name = type_name::<I>(), "Resolved concrete implementation");
            return Ok(c.clone());
        }
        Ok(self.mock::<I>()?.object())
    }

    pub fn contains<I: ?Sized + Interface>(&self) -> bool {
        self.0.contains_key(&TypeId::of::<I>())
    }

    /// Remove the entry of an interface, if any
    pub fn remove<I: ?Sized + Interface>(&mut self) -> bool {
        let removed = self.0.remove(&TypeId::of::<I>()).is_some();
        debug!(type_name = type_name::<I>(), removed, "Reset registry entry");
        removed
    }

    /// Remove all entries
    pub fn clear(&mut self) {
        let count = self.0.len();
        self.0.clear();
        debug!(entry_count = count, "Cleared mock registry");
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
