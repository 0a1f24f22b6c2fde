use std::any::{type_name, TypeId};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::*;

/// Automatic mocking container.
///
/// Builds instances of [Constructible] types by giving a mock (or a registered implementation)
/// to each interface parameter of their most specific constructor.
/// The container is meant to live in a single test: it is neither [Send] nor [Sync].
#[derive(Default)]
pub struct AutoMocker {
    registry: MockRegistry,
    activations: ActivationRegistry,
    selection: ConstructorSelection,
}

impl AutoMocker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a container using a specific constructor selection strategy
    pub fn with_selection(selection: ConstructorSelection) -> Self {
        Self {
            selection,
            ..Self::default()
        }
    }

    pub fn selection(&self) -> ConstructorSelection {
        self.selection
    }

    /// Build an instance of the target type with mocked dependencies.
    ///
    /// All parameters are resolved first, then the activations of each parameter type run,
    /// and finally the selected constructor is called.
    pub fn create<T: Constructible>(&mut self) -> Result<T, AutoMockError> {
        let target = type_name::<T>();
        let constructors = T::constructors();
        let selected = self.selection.select(&constructors)?;
        debug!(
            target,
            constructor = selected.name(),
            arity = selected.arity(),
            "Selected constructor"
        );

        let pending = selected.resolve_params(self)?;
        self.activate_params(selected.params())?;
        let instance = pending(self)?;
        debug!(target, "Created instance");
        Ok(instance)
    }

    /// Obtain the mock of an interface, creating it if needed
    pub fn mock<I: ?Sized + Interface>(&mut self) -> Result<MockHandle<I>, AutoMockError> {
        self.registry.mock::<I>()
    }

    /// Obtain the mock of an interface and configure it before returning it
    pub fn mock_with<I, F>(&mut self, configure: F) -> Result<MockHandle<I>, AutoMockError>
    where
        I: ?Sized + Interface,
        F: FnOnce(&MockHandle<I>),
    {
        let handle = self.registry.mock::<I>()?;
        configure(&handle);
        Ok(handle)
    }

    /// Use the given mock for an interface from now on.
    ///
    /// Instances created earlier keep the mock they received.
    pub fn inject<I: ?Sized + Interface>(
        &mut self,
        handle: impl Into<Option<MockHandle<I>>>,
    ) -> Result<(), AutoMockError> {
        let Some(handle) = handle.into() else {
            return Err(AutoMockError::NullArgument {
                type_name: type_name::<I>(),
            });
        };
        self.registry.inject(handle);
        Ok(())
    }

    /// Use a concrete instance instead of a mock for an interface
    pub fn implement<I: ?Sized + Interface>(&mut self, instance: Arc<I>) {
        self.registry.implement(instance);
    }

    /// Register a callback configuring the mock of an interface each time it is given to a constructor.
    ///
    /// Callbacks registered for the same interface run in registration order.
    pub fn activate<I, F>(&mut self, callback: F)
    where
        I: ?Sized + Interface,
        F: Fn(&MockHandle<I>) + 'static,
    {
        self.activations.register(callback);
    }

    /// The value given to a constructor parameter of type ```Arc<I>```
    pub fn resolve<I: ?Sized + Interface>(&mut self) -> Result<Arc<I>, AutoMockError> {
        self.registry.resolve::<I>()
    }

    pub fn contains<I: ?Sized + Interface>(&self) -> bool {
        self.registry.contains::<I>()
    }

    /// Forget all registered mocks and implementations. Activations are kept.
    pub fn reset(&mut self) {
        self.registry.clear();
    }

    /// Forget the mock or implementation registered for a single interface
    pub fn reset_type<I: ?Sized + Interface>(&mut self) {
        self.registry.remove::<I>();
    }

    pub fn registry(&self) -> &MockRegistry {
        &self.registry
    }

    pub fn activations(&self) -> &ActivationRegistry {
        &self.activations
    }

    /// Run the activations of each distinct parameter type
    fn activate_params(&mut self, params: &[ParamDescriptor]) -> Result<(), AutoMockError> {
        let mut seen = HashSet::<TypeId>::new();
        for param in params {
            if !seen.insert(param.type_id()) {
                continue;
            }
            if let Some(activate) = param.activation() {
                activate(self)?;
            }
        }
        Ok(())
    }

    pub(crate) fn activate_dependency<I: ?Sized + Interface>(
        &mut self,
    ) -> Result<(), AutoMockError> {
        let handle = match self.registry.existing_mock::<I>() {
            Some(handle) => handle,
            None if self.registry.contains::<I>() => {
                trace!(
                    type_name = type_name::<I>(),
                    "No mock to activate, using the concrete implementation"
                );
                return Ok(());
            }
            None => self.registry.mock::<I>()?,
        };
        self.activations.run(&handle)?;
        Ok(())
    }
}
