//! Traits and structs describing mockable dependencies
//!
//! An interface is a trait object type (```dyn Trait```) that knows how to build a mock of itself.
//!
//! * The [Interface] trait links the trait object to its mock type and to the factory creating new mocks.
//!   This factory is the only place where mock objects are synthesised, the registry only caches them.
//! * A [MockHandle] is a shared reference to one mock object. Cloning it keeps the identity of the mock,
//!   which is how tests configure and verify the very object received by a constructed instance.
//! * The [Parameter] trait describes one constructor parameter: either an interface resolved by the
//!   container (```Arc<dyn Trait>```), or a concrete value that cannot be mocked.

use std::any::{type_name, TypeId};
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;
use std::sync::Arc;
use thiserror::Error;

use crate::AutoMocker;

/// A capability contract that can be replaced by a mock.
///
/// This trait is meant to be implemented for trait object types, usually through
/// the [mock_interface](crate::mock_interface) macro.
pub trait Interface: 'static {
    /// The mock object standing in for the interface
    type Mock: 'static;

    /// Create a new mock object.
    ///
    /// Return [AutoMockError::UnsupportedType] if this interface can not be mocked.
    fn new_mock() -> Result<Self::Mock, AutoMockError>;

    /// View a shared mock as the interface it implements
    fn upcast(mock: Arc<Self::Mock>) -> Arc<Self>;
}

/// Shared handle on the mock object registered for an interface.
///
/// All clones of a handle refer to the same mock object.
pub struct MockHandle<I: ?Sized + Interface>(Arc<I::Mock>);

impl<I: ?Sized + Interface> MockHandle<I> {
    pub fn new(mock: I::Mock) -> Self {
        Self(Arc::new(mock))
    }

    /// Build a new mock using the factory of the interface
    pub fn create() -> Result<Self, AutoMockError> {
        I::new_mock().map(Self::new)
    }

    /// The mock object seen through its interface, as given to constructors
    pub fn object(&self) -> Arc<I> {
        I::upcast(self.0.clone())
    }

    /// Check if two handles refer to the same mock object
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.0, &other.0)
    }
}

impl<I: ?Sized + Interface> Clone for MockHandle<I> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<I: ?Sized + Interface> Deref for MockHandle<I> {
    type Target = I::Mock;

    fn deref(&self) -> &I::Mock {
        &self.0
    }
}

impl<I: ?Sized + Interface> fmt::Debug for MockHandle<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MockHandle")
            .field(&type_name::<I>())
            .field(&Arc::as_ptr(&self.0))
            .finish()
    }
}

/// Run the activations registered for an interface against its resolved mock
pub(crate) type ActivateFn = fn(&mut AutoMocker) -> Result<(), AutoMockError>;

/// Static description of a constructor parameter
#[derive(Clone, Copy)]
pub struct ParamDescriptor {
    type_id: TypeId,
    type_name: &'static str,
    activate: Option<ActivateFn>,
}

impl ParamDescriptor {
    /// Describe a parameter resolved through the registry
    pub fn interface<I: ?Sized + Interface>() -> Self {
        Self {
            type_id: TypeId::of::<I>(),
            type_name: type_name::<I>(),
            activate: Some(AutoMocker::activate_dependency::<I>),
        }
    }

    /// Describe a parameter which can not be mocked
    pub fn concrete<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            activate: None,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is_interface(&self) -> bool {
        self.activate.is_some()
    }

    pub(crate) fn activation(&self) -> Option<ActivateFn> {
        self.activate
    }
}

impl fmt::Debug for ParamDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamDescriptor")
            .field("type_name", &self.type_name)
            .field("interface", &self.is_interface())
            .finish()
    }
}

/// A value that can appear in the parameter list of a constructor
pub trait Parameter: Sized + 'static {
    fn descriptor() -> ParamDescriptor;

    /// Obtain the value to pass to the constructor.
    fn resolve(mocker: &mut AutoMocker) -> Result<Self, AutoMockError>;
}

impl<I: ?Sized + Interface> Parameter for Arc<I> {
    fn descriptor() -> ParamDescriptor {
        ParamDescriptor::interface::<I>()
    }

    fn resolve(mocker: &mut AutoMocker) -> Result<Self, AutoMockError> {
        mocker.resolve::<I>()
    }
}

/// Declare types that may appear as constructor parameters but can not be mocked.
///
/// Constructors using these types are never eligible. If such a constructor is selected anyway,
/// resolving the parameter fails with [AutoMockError::UnsupportedType].
#[macro_export]
macro_rules! concrete_parameter {
    ($($Type:ty),+ $(,)?) => {
        $(
        impl $crate::Parameter for $Type {
            fn descriptor() -> $crate::ParamDescriptor {
                $crate::ParamDescriptor::concrete::<$Type>()
            }

            fn resolve(_mocker: &mut $crate::AutoMocker) -> Result<Self, $crate::AutoMockError> {
                Err($crate::AutoMockError::unsupported::<$Type>())
            }
        }
        )+
    };
}

concrete_parameter!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, String,
    &'static str
);

// Generic containers of the standard library are never interfaces
macro_rules! concrete_container {
    ($($Container:ident),+) => {
        $(
        impl<T: 'static> Parameter for $Container<T> {
            fn descriptor() -> ParamDescriptor {
                ParamDescriptor::concrete::<Self>()
            }

            fn resolve(_mocker: &mut AutoMocker) -> Result<Self, AutoMockError> {
                Err(AutoMockError::unsupported::<Self>())
            }
        }
        )+
    };
}

concrete_container!(Vec, Option, Box, Rc);

/// Errors triggered while mocking dependencies and constructing instances
#[derive(Error, Debug)]
pub enum AutoMockError {
    #[error("AutoMocker could not find constructors that consist entirely of interfaces")]
    NoValidConstructors { target: &'static str },
    #[error("Null argument: no mock handle was given for {type_name}")]
    NullArgument { type_name: &'static str },
    #[error("Unsupported type: {type_name} can not be mocked")]
    UnsupportedType { type_name: &'static str },
    #[error("Type mismatch: the entry registered for {type_name} is not a {expected}")]
    TypeMismatch {
        type_name: &'static str,
        expected: &'static str,
    },
    /// Error returned by the body of a constructor, kept as is
    #[error("{0}")]
    Constructor(Box<dyn std::error::Error + Send + Sync>),
}

impl AutoMockError {
    pub fn unsupported<T: ?Sized>() -> Self {
        Self::UnsupportedType {
            type_name: type_name::<T>(),
        }
    }
}
