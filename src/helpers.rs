/// Declare that a trait object can be replaced by a mock type.
///
/// The mock type must implement the trait and [Default], which is used to create new mocks.
#[macro_export]
macro_rules! mock_interface {
    ($($Interface:ty => $Mock:ty),+ $(,)?) => {
        $(
        impl $crate::Interface for $Interface {
            type Mock = $Mock;

            fn new_mock() -> Result<Self::Mock, $crate::AutoMockError> {
                Ok(<$Mock as Default>::default())
            }

            fn upcast(mock: ::std::sync::Arc<Self::Mock>) -> ::std::sync::Arc<Self> {
                mock
            }
        }
        )+
    };
}

/// Declare the constructors available to build the target type.
///
/// Each constructor is an associated function of the target type. All its parameters must implement
/// [Parameter](crate::Parameter), which is the case of ```Arc<dyn Trait>``` for mockable traits.
///
/// Without a list of constructors, the target type is built using its [Default] implementation.
#[macro_export]
macro_rules! constructors {
    ($Target:ty) => {
        impl $crate::Constructible for $Target {
            fn constructors() -> Vec<$crate::Constructor<Self>> {
                vec![$crate::Constructor::new("default", <$Target as Default>::default)]
            }
        }
    };
    ($Target:ty $(, $constructor:ident)+ $(,)?) => {
        impl $crate::Constructible for $Target {
            fn constructors() -> Vec<$crate::Constructor<Self>> {
                vec![$($crate::Constructor::new(stringify!($constructor), <$Target>::$constructor),)+]
            }
        }
    };
}
