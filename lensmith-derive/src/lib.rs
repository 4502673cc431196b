//! Procedural macros for lensmith.
//!
//! This crate provides the `lens_factory!` macro, which generates a factory
//! of composed lenses from a list of property paths.
//!
//! # Example
//!
//! ```rust,ignore
//! use lensmith::lens_factory;
//! use lensmith::optics::{ReadLens, ReadWriteLens};
//!
//! struct Address { city: String }
//! struct Person { name: String, address: Address }
//!
//! lens_factory! {
//!     PersonLenses {
//!         read name_length = Person.name: String;
//!         read_write city = Person.address: Address, Address.city: String;
//!     }
//! }
//!
//! // Generated:
//! // - PersonLenses::name_length() -> impl ReadLens<Person, String> + Clone
//! // - PersonLenses::city() -> impl ReadWriteLens<Person, String> + Clone
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod factory;

use proc_macro::TokenStream;

/// Generates a lens factory from declarative property paths.
///
/// Each declaration names a lens, its capability and the chain of property
/// steps it traverses. A step is written `SourceType.property: PropertyType`.
/// Consecutive steps must line up: the property type of one step is the
/// source type of the next.
///
/// # Generated Code
///
/// ```rust,ignore
/// pub struct PersonLenses;
///
/// impl PersonLenses {
///     pub fn city() -> impl ::lensmith::optics::ReadWriteLens<Person, String> + Clone { ... }
/// }
/// ```
///
/// Intermediate steps are always read. For a `read_write` lens only the last
/// step is written; the steps before it merely navigate to it.
///
/// # Attributes
///
/// - `#[lens_package = "path"]`: recorded in the generated documentation
/// - `#[lens_crate = "path"]`: path of the runtime crate (default `::lensmith`)
///
/// # Errors
///
/// Mismatched step types, repeated lens names, names that are not
/// identifiers and malformed declarations are reported as compile errors
/// pointing at the offending lens.
///
/// ```rust,ignore
/// lens_factory! {
///     PersonLenses {
///         // error: step 0 produces `Address` but step 1 is applied to `Company`
///         read broken = Person.address: Address, Company.name: String;
///     }
/// }
/// ```
#[proc_macro]
pub fn lens_factory(input: TokenStream) -> TokenStream {
    factory::lens_factory_impl(input)
}
