use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use tracing::{debug, trace};

use crate::*;

/// Callback configuring a mock right before it is given to a constructor
pub type Activation<I> = Box<dyn Fn(&MockHandle<I>)>;

/// Ordered activation callbacks for each interface.
///
/// Registering a new activation never replaces the previous ones: they all run in registration order.
#[derive(Default)]
pub struct ActivationRegistry(HashMap<TypeId, Vec<Box<dyn Any>>>);

impl ActivationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an activation to the chain of an interface
    pub fn register<I, F>(&mut self, callback: F)
    where
        I: ?Sized + Interface,
        F: Fn(&MockHandle<I>) + 'static,
    {
        let activation: Activation<I> = Box::new(callback);
        let chain = self.0.entry(TypeId::of::<I>()).or_default();
        chain.push(Box::new(activation));
        debug!(
            type_name = type_name::<I>(),
            chain_length = chain.len(),
            "Registered activation"
        );
    }

    /// Run the chain of an interface against a mock handle.
    ///
    /// Return the number of activations that were called.
    pub fn run<I: ?Sized + Interface>(
        &self,
        handle: &MockHandle<I>,
    ) -> Result<usize, AutoMockError> {
        let Some(chain) = self.0.get(&TypeId::of::<I>()) else {
            return Ok(0);
        };

        for activation in chain {
            let Some(activation) = activation.downcast_ref::<Activation<I>>() else {
                return Err(AutoMockError::TypeMismatch {
                    type_name: type_name::<I>(),
                    expected: "activation",
                });
            };
            activation(handle);
        }
        trace!(
            type_name = type_name::<I>(),
            count = chain.len(),
            "Ran activations"
        );
        Ok(chain.len())
    }

    /// Number of activations registered for an interface
    pub fn chain_length<I: ?Sized + Interface>(&self) -> usize {
        self.0.get(&TypeId::of::<I>()).map_or(0, Vec::len)
    }
}
