//! Automatic mocking container: build the type under test with a mock for each of its dependencies.
//!
//! # Simple use case
//!
//! ```
//! # use std::sync::{Arc, Mutex};
//! # use automocker::*;
//! // Define traits and a type depending on them
//! trait Clock {
//!     fn now(&self) -> u64;
//! }
//!
//! struct Greeter {
//!     clock: Arc<dyn Clock>,
//! }
//!
//! impl Greeter {
//!     fn new(clock: Arc<dyn Clock>) -> Self {
//!         Self { clock }
//!     }
//!
//!     fn greet(&self) -> String {
//!         format!("hello at {}", self.clock.now())
//!     }
//! }
//!
//! // Define a mock for the trait and declare the constructors of the tested type
//! #[derive(Default)]
//! struct MockClock(Mutex<u64>);
//!
//! impl Clock for MockClock {
//!     fn now(&self) -> u64 {
//!         *self.0.lock().unwrap()
//!     }
//! }
//!
//! mock_interface!(dyn Clock => MockClock);
//! constructors!(Greeter, new);
//!
//! # fn main() -> Result<(), AutoMockError> {
//! let mut mocker = AutoMocker::new();
//! mocker.activate::<dyn Clock, _>(|clock| *clock.0.lock().unwrap() = 42);
//!
//! let greeter: Greeter = mocker.create()?;
//! assert_eq!(greeter.greet(), "hello at 42");
//! # Ok(())
//! # }
//! ```
//!
//! # Mechanism
//!
//! The container combines a registry of mocks keyed by ```TypeId``` and stored as ```Any```
//! with constructor descriptors declared by the tested types, as Rust has no runtime reflection.
//!
//! * The ```Interface``` trait marks a trait object as mockable and provides the factory for its mock.
//! * The ```Constructible``` trait lists the constructors of a tested type. Each ```Constructor``` knows
//!   the types of its parameters, derived from the signature of the constructor function.
//!   A constructor is eligible if all its parameters are interfaces (```Arc<dyn Trait>```).
//! * The ```MockRegistry``` caches a single mock handle (or a concrete implementation) for each interface.
//! * The ```ActivationRegistry``` keeps callbacks configuring a mock each time it is given to a constructor.
//! * The ```AutoMocker``` combines both registries to build instances using their most specific eligible constructor.

mod activation;
mod construct;
mod helpers;
mod mocker;
mod registry;
mod resolve;

pub use activation::{Activation, ActivationRegistry};
pub use construct::{Callable, Constructible, Constructor, ConstructorSelection, Params};
pub use mocker::AutoMocker;
pub use registry::MockRegistry;
pub use resolve::{AutoMockError, Interface, MockHandle, ParamDescriptor, Parameter};
