//! The lens composer.
//!
//! [`compose`] turns one [`LensSpec`] into one [`ComposedAccessor`]:
//!
//! 1. A single-step lens becomes one primitive node carrying the requested
//!    capability.
//! 2. In a longer chain every step except the last becomes a `read` node and
//!    the last step carries the requested capability. The nodes are folded
//!    left to right with `andThen`, so the write half of a read-write lens
//!    only ever touches the terminal step.
//! 3. The signature is taken from the endpoints of the chain. Intermediate
//!    types do not appear in it.
//!
//! The composer trusts that consecutive steps line up (step `i`'s property
//! type is step `i + 1`'s source type). Use
//! [`check_adjacency`](crate::validate::check_adjacency) beforehand when the
//! metadata comes from an untrusted source.
//!
//! # Example
//!
//! ```
//! use lensmith_codegen::compose::compose;
//! use lensmith_codegen::meta::{Capability, LensSpec, PropertyStep};
//!
//! let spec = LensSpec::new(
//!     "city",
//!     vec![
//!         PropertyStep::new("Person", "address", "Address"),
//!         PropertyStep::new("Address", "city", "String"),
//!     ],
//!     Capability::ReadWrite,
//! );
//!
//! let accessor = compose(&spec).unwrap();
//! assert_eq!(accessor.signature().to_string(), "(Person, String, read_write)");
//! assert_eq!(
//!     accessor.expression().to_string(),
//!     "andThen(read(Person,\"address\",Address), readWrite(Address,\"city\",String))"
//! );
//! ```

use tracing::debug;

use crate::error::{ComposeError, MalformedSpec};
use crate::expr::{AccessorExpr, ComposedAccessor, PropertyAccess, Signature};
use crate::meta::{Capability, LensSpec, PropertyStep};

/// Composes a lens specification into a typed accessor expression.
///
/// # Errors
///
/// Returns [`ComposeError::MalformedSpec`] when the specification has no
/// steps.
pub fn compose(spec: &LensSpec) -> Result<ComposedAccessor, ComposeError> {
    let (last, intermediate) = spec
        .steps()
        .split_last()
        .ok_or(ComposeError::MalformedSpec(MalformedSpec::EmptyChain))?;
    let first = spec.steps().first().unwrap_or(last);

    let terminal = AccessorExpr::primitive(PropertyAccess::from(last), spec.capability());
    let expression = match intermediate.split_first() {
        None => terminal,
        Some((head, rest)) => rest
            .iter()
            .fold(read_node(head), |chain, step| chain.and_then(read_node(step)))
            .and_then(terminal),
    };

    let signature = Signature::new(
        first.source_type().clone(),
        last.property_type().clone(),
        spec.capability(),
    );

    debug!(
        lens = spec.name(),
        steps = spec.steps().len(),
        %signature,
        "composed lens"
    );

    Ok(ComposedAccessor::new(signature, expression))
}

fn read_node(step: &PropertyStep) -> AccessorExpr {
    AccessorExpr::primitive(PropertyAccess::from(step), Capability::Read)
}
