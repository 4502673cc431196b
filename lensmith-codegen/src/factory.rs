//! Factory assembly.
//!
//! Applies the composer to every lens of a [`FactorySpec`] and collects the
//! results, in declaration order, into a [`FactoryArtifact`] ready for an
//! emitter.
//!
//! Three policies are available:
//!
//! - [`assemble`]: sequential, fail-fast on the first failing lens.
//! - [`assemble_lenient`]: composes everything and reports failures next to
//!   the successful lenses.
//! - `assemble_parallel` (feature `rayon`): fail-fast like [`assemble`], with
//!   the lenses composed on the rayon pool.

use tracing::{debug, instrument};

use crate::compose::compose;
use crate::error::{AssemblyError, ComposeError};
use crate::expr::ComposedAccessor;
use crate::meta::{FactorySpec, LensSpec, Visibility};

/// A composed lens paired with the name it was declared under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedAccessor {
    name: String,
    accessor: ComposedAccessor,
}

impl NamedAccessor {
    /// The lens name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The composed accessor.
    pub const fn accessor(&self) -> &ComposedAccessor {
        &self.accessor
    }
}

/// The output of assembling one factory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactoryArtifact {
    package_id: String,
    factory_name: String,
    visibility: Visibility,
    accessors: Vec<NamedAccessor>,
}

impl FactoryArtifact {
    fn from_spec(factory: &FactorySpec, accessors: Vec<NamedAccessor>) -> Self {
        Self {
            package_id: factory.package_id().to_string(),
            factory_name: factory.factory_name().to_string(),
            visibility: factory.visibility(),
            accessors,
        }
    }

    /// Package the factory belongs to.
    pub fn package_id(&self) -> &str {
        &self.package_id
    }

    /// Name of the factory.
    pub fn factory_name(&self) -> &str {
        &self.factory_name
    }

    /// Visibility of the factory.
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Composed lenses in declaration order.
    pub fn accessors(&self) -> &[NamedAccessor] {
        &self.accessors
    }

    /// Looks up a composed lens by name.
    pub fn accessor(&self, name: &str) -> Option<&ComposedAccessor> {
        self.accessors
            .iter()
            .find(|named| named.name == name)
            .map(NamedAccessor::accessor)
    }
}

/// Result of [`assemble_lenient`]: the lenses that composed and the ones
/// that did not.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LenientArtifact {
    /// Artifact holding only the successfully composed lenses.
    pub artifact: FactoryArtifact,
    /// Failures in declaration order.
    pub failures: Vec<AssemblyError>,
}

impl LenientArtifact {
    /// Returns `true` if every lens composed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

fn compose_named(index: usize, lens: &LensSpec) -> Result<NamedAccessor, AssemblyError> {
    compose(lens)
        .map(|accessor| NamedAccessor {
            name: lens.name().to_string(),
            accessor,
        })
        .map_err(|error: ComposeError| AssemblyError {
            index,
            name: lens.name().to_string(),
            error,
        })
}

/// Composes every lens of the factory in declaration order.
///
/// # Errors
///
/// Returns the first failing lens as an [`AssemblyError`]. No partial
/// artifact is produced.
///
/// # Example
///
/// ```
/// use lensmith_codegen::factory::assemble;
/// use lensmith_codegen::meta::{Capability, FactorySpec, LensSpec, PropertyStep};
///
/// let factory = FactorySpec::builder("model", "PersonLenses")
///     .lens(LensSpec::new(
///         "name",
///         vec![PropertyStep::new("Person", "name", "String")],
///         Capability::Read,
///     ))
///     .lens(LensSpec::new("broken", Vec::new(), Capability::Read))
///     .build();
///
/// let error = assemble(&factory).unwrap_err();
/// assert_eq!(error.name, "broken");
/// assert_eq!(error.index, 1);
/// ```
#[instrument(skip_all, fields(factory = factory.factory_name()))]
pub fn assemble(factory: &FactorySpec) -> Result<FactoryArtifact, AssemblyError> {
    let accessors = factory
        .lenses()
        .iter()
        .enumerate()
        .map(|(index, lens)| compose_named(index, lens))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(lenses = accessors.len(), "factory assembled");
    Ok(FactoryArtifact::from_spec(factory, accessors))
}

/// Composes every lens, keeping the successes and collecting the failures.
#[instrument(skip_all, fields(factory = factory.factory_name()))]
pub fn assemble_lenient(factory: &FactorySpec) -> LenientArtifact {
    let (accessors, failures): (Vec<_>, Vec<_>) = factory
        .lenses()
        .iter()
        .enumerate()
        .map(|(index, lens)| compose_named(index, lens))
        .partition(Result::is_ok);

    let accessors: Vec<NamedAccessor> = accessors.into_iter().filter_map(Result::ok).collect();
    let failures: Vec<AssemblyError> = failures.into_iter().filter_map(Result::err).collect();

    debug!(
        composed = accessors.len(),
        failed = failures.len(),
        "factory assembled leniently"
    );
    LenientArtifact {
        artifact: FactoryArtifact::from_spec(factory, accessors),
        failures,
    }
}

/// Composes every lens on the rayon pool.
///
/// Results are gathered by index, so the artifact keeps declaration order
/// and the reported failure is the first one in declaration order, exactly
/// as with [`assemble`].
///
/// # Errors
///
/// Returns the first failing lens in declaration order.
#[cfg(feature = "rayon")]
#[instrument(skip_all, fields(factory = factory.factory_name()))]
pub fn assemble_parallel(factory: &FactorySpec) -> Result<FactoryArtifact, AssemblyError> {
    use rayon::prelude::*;

    let results: Vec<Result<NamedAccessor, AssemblyError>> = factory
        .lenses()
        .par_iter()
        .enumerate()
        .map(|(index, lens)| compose_named(index, lens))
        .collect();

    let accessors = results.into_iter().collect::<Result<Vec<_>, _>>()?;

    debug!(lenses = accessors.len(), "factory assembled in parallel");
    Ok(FactoryArtifact::from_spec(factory, accessors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MalformedSpec;
    use crate::meta::{Capability, PropertyStep};

    fn valid(name: &str) -> LensSpec {
        LensSpec::new(
            name,
            vec![
                PropertyStep::new("Person", "address", "Address"),
                PropertyStep::new("Address", "city", "String"),
            ],
            Capability::ReadWrite,
        )
    }

    fn malformed(name: &str) -> LensSpec {
        LensSpec::new(name, Vec::new(), Capability::Read)
    }

    fn factory(lenses: Vec<LensSpec>) -> FactorySpec {
        FactorySpec::new("model", "PersonLenses", Visibility::Crate, lenses)
    }

    #[test]
    fn assemble_preserves_declaration_order() {
        let artifact = assemble(&factory(vec![valid("c"), valid("a"), valid("b")])).unwrap();

        let names: Vec<&str> = artifact.accessors().iter().map(NamedAccessor::name).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
        assert_eq!(artifact.factory_name(), "PersonLenses");
        assert_eq!(artifact.package_id(), "model");
        assert_eq!(artifact.visibility(), Visibility::Crate);
    }

    #[test]
    fn assemble_fails_fast_on_the_malformed_lens() {
        let result = assemble(&factory(vec![valid("l1"), malformed("l2"), valid("l3")]));

        assert_eq!(
            result,
            Err(AssemblyError {
                index: 1,
                name: "l2".to_string(),
                error: MalformedSpec::EmptyChain.into(),
            })
        );
    }

    #[test]
    fn assemble_reports_first_failure() {
        let error = assemble(&factory(vec![malformed("first"), malformed("second")])).unwrap_err();
        assert_eq!(error.name, "first");
    }

    #[test]
    fn lenient_assembly_keeps_successes_and_failures() {
        let result = assemble_lenient(&factory(vec![valid("l1"), malformed("l2"), valid("l3")]));

        assert!(!result.is_complete());
        let names: Vec<&str> = result
            .artifact
            .accessors()
            .iter()
            .map(NamedAccessor::name)
            .collect();
        assert_eq!(names, vec!["l1", "l3"]);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].name, "l2");
        assert_eq!(result.failures[0].index, 1);
    }

    #[test]
    fn empty_factory_assembles_to_empty_artifact() {
        let artifact = assemble(&factory(Vec::new())).unwrap();
        assert!(artifact.accessors().is_empty());
    }

    #[test]
    fn accessor_lookup_by_name() {
        let artifact = assemble(&factory(vec![valid("city")])).unwrap();
        assert!(artifact.accessor("city").is_some());
        assert!(artifact.accessor("missing").is_none());
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn parallel_assembly_matches_sequential() {
        let lenses: Vec<LensSpec> = (0..64).map(|index| valid(&format!("lens{index}"))).collect();
        let spec = factory(lenses);

        assert_eq!(assemble_parallel(&spec), assemble(&spec));
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn parallel_assembly_reports_first_failure_in_declaration_order() {
        let mut lenses: Vec<LensSpec> = (0..32)
            .map(|index| valid(&format!("lens{index}")))
            .collect();
        lenses[20] = malformed("late");
        lenses[5] = malformed("early");

        let error = assemble_parallel(&factory(lenses)).unwrap_err();
        assert_eq!(error.name, "early");
        assert_eq!(error.index, 5);
    }
}
