//! # lensmith
//!
//! Build-time generation of composed property lenses.
//!
//! ## Overview
//!
//! A lens factory is declared once, as a list of property paths, and the
//! `lens_factory!` macro generates one statically typed accessor per path:
//!
//! - **Optics**: the runtime lens types generated code targets
//!   ([`optics::ReadLens`], [`optics::ReadWriteLens`], [`optics::AndThen`])
//! - **Macro**: `lens_factory!`, re-exported from `lensmith-derive`
//!
//! Intermediate steps of a path are always read; only the last step of a
//! read-write lens is written.
//!
//! ## Feature Flags
//!
//! - `derive`: re-export the `lens_factory!` macro (enabled by default)
//!
//! ## Example
//!
//! ```rust
//! # #[cfg(feature = "derive")]
//! # {
//! use lensmith::lens_factory;
//! use lensmith::optics::{ReadLens, ReadWriteLens};
//!
//! pub struct Address { pub city: String }
//! pub struct Person { pub name: String, pub address: Address }
//!
//! lens_factory! {
//!     pub PersonLenses {
//!         read name = Person.name: String;
//!         read_write city = Person.address: Address, Address.city: String;
//!     }
//! }
//!
//! let mut person = Person {
//!     name: "Alice".to_string(),
//!     address: Address { city: "Tokyo".to_string() },
//! };
//!
//! assert_eq!(PersonLenses::name().get(&person), "Alice");
//! PersonLenses::city().set(&mut person, "Osaka".to_string());
//! assert_eq!(person.address.city, "Osaka");
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// ```rust
/// use lensmith::prelude::*;
/// ```
pub mod prelude {
    pub use crate::optics::*;

    #[cfg(feature = "derive")]
    pub use crate::lens_factory;
}

pub mod optics;

#[cfg(feature = "derive")]
pub use lensmith_derive::lens_factory;

#[cfg(test)]
mod tests {
    use crate::optics::{Lenses, ReadLens};

    fn assert_send_sync<T: Send + Sync>(_: &T) {}

    #[test]
    fn runtime_lenses_are_thread_safe() {
        let lens = Lenses::read_lens(|source: &(u8, String)| &source.1)
            .and_then(Lenses::read_lens(|name: &String| name));
        assert_send_sync(&lens);
        assert_eq!(lens.get(&(1, "a".to_string())), "a");
    }

    static_assertions::assert_impl_all!(Lenses: Send, Sync, Copy);
}
