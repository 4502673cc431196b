//! Explicit checks over lens metadata.
//!
//! The composer assumes its input is well formed. These functions turn the
//! implicit preconditions into a separate pass that a driver runs before
//! assembly:
//!
//! - [`check_adjacency`]: consecutive steps line up.
//! - [`check_lens`]: non-blank name, non-empty chain, adjacency.
//! - [`validate_names`]: lens names are unique within the factory.
//! - [`validate_factory`]: all of the above, first failure wins.

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::error::{AdjacencyViolation, ComposeError, MalformedSpec, ValidationError};
use crate::meta::{FactorySpec, LensSpec, PropertyStep};

/// Checks that step `i`'s property type equals step `i + 1`'s source type.
///
/// # Errors
///
/// Returns the first mismatching pair as an [`AdjacencyViolation`].
///
/// # Example
///
/// ```
/// use lensmith_codegen::meta::PropertyStep;
/// use lensmith_codegen::validate::check_adjacency;
///
/// let steps = vec![
///     PropertyStep::new("Person", "address", "Address"),
///     PropertyStep::new("Address", "city", "String"),
/// ];
/// assert!(check_adjacency(&steps).is_ok());
///
/// let broken = vec![
///     PropertyStep::new("Person", "address", "Address"),
///     PropertyStep::new("Company", "name", "String"),
/// ];
/// assert_eq!(check_adjacency(&broken).unwrap_err().step_index, 0);
/// ```
pub fn check_adjacency(steps: &[PropertyStep]) -> Result<(), AdjacencyViolation> {
    steps
        .windows(2)
        .enumerate()
        .find_map(|(step_index, pair)| {
            let (current, next) = (&pair[0], &pair[1]);
            (current.property_type() != next.source_type()).then(|| AdjacencyViolation {
                step_index,
                expected: current.property_type().clone(),
                found: next.source_type().clone(),
            })
        })
        .map_or(Ok(()), Err)
}

/// Runs the per-lens checks.
///
/// # Errors
///
/// Returns [`MalformedSpec::BlankName`], [`MalformedSpec::EmptyChain`] or an
/// adjacency violation, in that order of precedence.
pub fn check_lens(lens: &LensSpec) -> Result<(), ComposeError> {
    if lens.name().trim().is_empty() {
        return Err(MalformedSpec::BlankName.into());
    }
    if lens.steps().is_empty() {
        return Err(MalformedSpec::EmptyChain.into());
    }
    check_adjacency(lens.steps())?;
    Ok(())
}

/// Checks that every lens name appears at most once.
///
/// # Errors
///
/// Returns [`ValidationError::DuplicateLensName`] for the first repeat in
/// declaration order.
pub fn validate_names(factory: &FactorySpec) -> Result<(), ValidationError> {
    let mut seen: FxHashMap<&str, usize> = FxHashMap::default();
    for (index, lens) in factory.lenses().iter().enumerate() {
        if let Some(&first_index) = seen.get(lens.name()) {
            warn!(
                factory = factory.factory_name(),
                lens = lens.name(),
                "duplicate lens name"
            );
            return Err(ValidationError::DuplicateLensName {
                name: lens.name().to_string(),
                first_index,
                duplicate_index: index,
            });
        }
        seen.insert(lens.name(), index);
    }
    Ok(())
}

/// Validates a whole factory: per-lens checks in declaration order, then
/// name uniqueness.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found.
pub fn validate_factory(factory: &FactorySpec) -> Result<(), ValidationError> {
    for (index, lens) in factory.lenses().iter().enumerate() {
        check_lens(lens).map_err(|error| ValidationError::Lens {
            index,
            name: lens.name().to_string(),
            error,
        })?;
    }
    validate_names(factory)?;
    debug!(
        factory = factory.factory_name(),
        lenses = factory.lenses().len(),
        "factory metadata validated"
    );
    Ok(())
}
