//! Runtime optics targeted by generated lens factories.
//!
//! # Available Optics
//!
//! - [`ReadLens`]: read access to a focused value
//! - [`ReadWriteLens`]: read and in-place write access
//! - [`FocusMut`]: mutable navigation used to thread a write through read steps
//! - [`AndThen`]: sequential composition; takes the capability of its right side
//!
//! # Example
//!
//! ```
//! use lensmith::optics::{Lenses, ReadLens, ReadWriteLens};
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Address { street: String, city: String }
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Person { name: String, address: Address }
//!
//! let street = Lenses::field_read_lens(
//!     |person: &Person| &person.address,
//!     |person: &mut Person| &mut person.address,
//! )
//! .and_then(Lenses::read_write_lens(
//!     |address: &Address| &address.street,
//!     |address: &mut Address, street: String| address.street = street,
//! ));
//!
//! let mut person = Person {
//!     name: "Alice".to_string(),
//!     address: Address {
//!         street: "Main St".to_string(),
//!         city: "Tokyo".to_string(),
//!     },
//! };
//!
//! assert_eq!(street.get(&person), "Main St");
//!
//! street.set(&mut person, "Oak Ave".to_string());
//! assert_eq!(person.address.street, "Oak Ave");
//! assert_eq!(person.address.city, "Tokyo");
//! ```

mod and_then;
mod lens;
mod lenses;

pub use and_then::AndThen;
pub use lens::{
    FieldReadLens, FocusMut, FunctionReadLens, FunctionReadWriteLens, ReadLens, ReadWriteLens,
};
pub use lenses::Lenses;
