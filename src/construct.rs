use std::any::type_name;
use std::error::Error;
use std::fmt;
use std::rc::Rc;

use crate::*;

/// A type that can be built by [AutoMocker::create].
///
/// Rust offers no runtime reflection on constructors: each target type lists them explicitly,
/// usually through the [constructors](crate::constructors) macro.
pub trait Constructible: Sized + 'static {
    fn constructors() -> Vec<Constructor<Self>>;
}

/// Strategy used to pick a constructor among the declared ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConstructorSelection {
    /// Use the eligible constructor with the most parameters
    #[default]
    MostSpecificEligible,
    /// Use the declared constructor with the most parameters, even if it is not eligible.
    ///
    /// Resolution then fails on its first non-interface parameter.
    MostSpecificDeclared,
}

/// Constructor invocation waiting for activations to run
pub(crate) type Pending<T> = Box<dyn FnOnce(&mut AutoMocker) -> Result<T, AutoMockError>>;

type ResolveFn<T> = Box<dyn Fn(&mut AutoMocker) -> Result<Pending<T>, AutoMockError>>;

/// Description of a constructor of the target type along with a way to call it
pub struct Constructor<T> {
    name: &'static str,
    params: Vec<ParamDescriptor>,
    resolve: ResolveFn<T>,
}

impl<T: 'static> Constructor<T> {
    /// Describe an infallible constructor.
    ///
    /// The parameter descriptors are derived from the signature of the constructor function.
    pub fn new<P, F>(name: &'static str, constructor: F) -> Self
    where
        P: Params,
        F: Callable<P, T> + 'static,
    {
        let constructor = Rc::new(constructor);
        Self {
            name,
            params: P::descriptors(),
            resolve: Box::new(move |mocker: &mut AutoMocker| {
                let args = P::resolve(mocker)?;
                let constructor = constructor.clone();
                let pending: Pending<T> =
                    Box::new(move |_: &mut AutoMocker| Ok(constructor.call(args)));
                Ok(pending)
            }),
        }
    }

    /// Describe a constructor returning an error.
    ///
    /// Errors are wrapped in [AutoMockError::Constructor] without any other change.
    pub fn fallible<P, F, E>(name: &'static str, constructor: F) -> Self
    where
        P: Params,
        F: Callable<P, Result<T, E>> + 'static,
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        let constructor = Rc::new(constructor);
        Self {
            name,
            params: P::descriptors(),
            resolve: Box::new(move |mocker: &mut AutoMocker| {
                let args = P::resolve(mocker)?;
                let constructor = constructor.clone();
                let pending: Pending<T> = Box::new(move |_: &mut AutoMocker| {
                    constructor
                        .call(args)
                        .map_err(|e| AutoMockError::Constructor(e.into()))
                });
                Ok(pending)
            }),
        }
    }

    /// Describe a constructor from explicit parameter descriptors.
    ///
    /// This is needed when a parameter type can not implement [Parameter], such as ```Arc<Config>```
    /// for a struct ```Config```. Describe such parameters with [ParamDescriptor::concrete].
    /// The constructor body obtains its interfaces from the container with [AutoMocker::resolve],
    /// after their activations ran. Concrete parameters can not be resolved: if such a constructor
    /// is selected, creation fails with [AutoMockError::UnsupportedType].
    pub fn from_descriptors<F>(
        name: &'static str,
        params: Vec<ParamDescriptor>,
        constructor: F,
    ) -> Self
    where
        F: Fn(&mut AutoMocker) -> Result<T, AutoMockError> + 'static,
    {
        let concrete = params
            .iter()
            .find(|p| !p.is_interface())
            .map(ParamDescriptor::type_name);
        let constructor = Rc::new(constructor);
        Self {
            name,
            params,
            resolve: Box::new(move |_: &mut AutoMocker| {
                if let Some(type_name) = concrete {
                    return Err(AutoMockError::UnsupportedType { type_name });
                }
                let constructor = constructor.clone();
                let pending: Pending<T> =
                    Box::new(move |mocker: &mut AutoMocker| (*constructor)(mocker));
                Ok(pending)
            }),
        }
    }
}

impl<T> Constructor<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn params(&self) -> &[ParamDescriptor] {
        &self.params
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// A constructor is eligible if all its parameters are interfaces
    pub fn is_eligible(&self) -> bool {
        self.params.iter().all(ParamDescriptor::is_interface)
    }

    /// Resolve all parameters, returning the invocation to perform
    pub(crate) fn resolve_params(
        &self,
        mocker: &mut AutoMocker,
    ) -> Result<Pending<T>, AutoMockError> {
        (self.resolve)(mocker)
    }
}

impl<T> fmt::Debug for Constructor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("target", &type_name::<T>())
            .field("name", &self.name)
            .field("params", &self.params)
            .finish()
    }
}

impl ConstructorSelection {
    /// Pick the constructor to use among the declared ones.
    ///
    /// Fail if no constructor is eligible. Ties go to the first declared constructor.
    pub fn select<T>(
        self,
        constructors: &[Constructor<T>],
    ) -> Result<&Constructor<T>, AutoMockError> {
        if !constructors.iter().any(Constructor::is_eligible) {
            return Err(AutoMockError::NoValidConstructors {
                target: type_name::<T>(),
            });
        }

        let candidates = constructors.iter().filter(|c| match self {
            ConstructorSelection::MostSpecificEligible => c.is_eligible(),
            ConstructorSelection::MostSpecificDeclared => true,
        });

        let mut selected: Option<&Constructor<T>> = None;
        for c in candidates {
            match selected {
                Some(best) if best.arity() >= c.arity() => (),
                _ => selected = Some(c),
            }
        }

        selected.ok_or(AutoMockError::NoValidConstructors {
            target: type_name::<T>(),
        })
    }
}

/*
 * The following is used to call constructors with up to 10 parameters
 * inspired by https://nickbryan.co.uk/software/using-a-type-map-for-dependency-injection-in-rust/
 */

/// A Callable has a ```call``` function with a single argument and a single return type.
///
/// This trait is implemented for all functions with up to 10 arguments, using a tuple to
/// wrap them all in a single type.
pub trait Callable<Args, Ret> {
    fn call(&self, args: Args) -> Ret;
}

/// Parameter list of a constructor
///
/// This trait is implemented for tuples of [Parameter] types
pub trait Params: Sized + 'static {
    fn descriptors() -> Vec<ParamDescriptor>;
    fn resolve(mocker: &mut AutoMocker) -> Result<Self, AutoMockError>;
}

macro_rules! callable_tuple ({ $($param:ident)* } => {
    impl<Func, Ret, $($param,)*> Callable<($($param,)*), Ret> for Func
    where
        Func: Fn($($param),*) -> Ret,
    {
        #[inline]
        #[allow(non_snake_case)]
        fn call(&self, ($($param,)*): ($($param,)*)) -> Ret {
            (self)($($param,)*)
        }
    }

    // Resolve the parameters in declaration order
    #[allow(clippy::unused_unit)]
    impl<$($param: Parameter,)*> Params for ($($param,)*) {
        #[inline]
        fn descriptors() -> Vec<ParamDescriptor> {
            vec![$($param::descriptor(),)*]
        }

        #[inline]
        fn resolve(_mocker: &mut AutoMocker) -> Result<Self, AutoMockError> {
            Ok(($($param::resolve(_mocker)?,)*))
        }
    }
});

callable_tuple! {}
callable_tuple! { A }
callable_tuple! { A B }
callable_tuple! { A B C }
callable_tuple! { A B C D }
callable_tuple! { A B C D E }
callable_tuple! { A B C D E F }
callable_tuple! { A B C D E F G }
callable_tuple! { A B C D E F G H }
callable_tuple! { A B C D E F G H I }
callable_tuple! { A B C D E F G H I J }
