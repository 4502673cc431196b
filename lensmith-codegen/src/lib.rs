//! # lensmith-codegen
//!
//! Build-time composition of lens accessors.
//!
//! Given metadata describing chains of property accesses, this crate decides
//! the shape and static type of the composed accessor for each chain and
//! renders it as Rust tokens for the `lensmith` runtime.
//!
//! ## Modules
//!
//! - [`meta`]: the metadata model (`FactorySpec`, `LensSpec`, `PropertyStep`)
//! - [`compose`]: the lens composer
//! - [`expr`]: accessor expression trees and signatures
//! - [`validate`]: explicit adjacency and naming checks
//! - [`factory`]: factory assembly (sequential, lenient, parallel)
//! - [`emit`]: token emission
//! - [`error`]: error types
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for the metadata model
//! - `rayon`: parallel factory assembly
//!
//! ## Example
//!
//! ```rust
//! use lensmith_codegen::factory::assemble;
//! use lensmith_codegen::meta::{Capability, FactorySpec, LensSpec, PropertyStep};
//! use lensmith_codegen::validate::validate_factory;
//!
//! let factory = FactorySpec::builder("model", "PersonLenses")
//!     .lens(LensSpec::new(
//!         "name_length",
//!         vec![
//!             PropertyStep::new("Person", "name", "String"),
//!             PropertyStep::new("String", "length", "int"),
//!         ],
//!         Capability::Read,
//!     ))
//!     .build();
//!
//! validate_factory(&factory).unwrap();
//! let artifact = assemble(&factory).unwrap();
//! let accessor = artifact.accessor("name_length").unwrap();
//! assert_eq!(accessor.signature().to_string(), "(Person, int, read)");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod compose;
pub mod emit;
pub mod error;
pub mod expr;
pub mod factory;
pub mod meta;
pub mod validate;

pub use compose::compose;
pub use error::{
    AdjacencyViolation, AssemblyError, ComposeError, EmitError, MalformedSpec, ValidationError,
};
pub use expr::{AccessorExpr, ComposedAccessor, PropertyAccess, Signature};
pub use factory::{FactoryArtifact, LenientArtifact, NamedAccessor, assemble, assemble_lenient};
pub use meta::{Capability, FactorySpec, LensSpec, PropertyStep, TypeName, Visibility};

#[cfg(feature = "rayon")]
pub use factory::assemble_parallel;

#[cfg(test)]
mod tests {
    use super::*;

    static_assertions::assert_impl_all!(FactorySpec: Send, Sync, Clone);
    static_assertions::assert_impl_all!(ComposedAccessor: Send, Sync, Clone);
    static_assertions::assert_impl_all!(AssemblyError: Send, Sync, std::error::Error);
}
