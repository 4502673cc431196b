//! Property-based tests for the lens composer.
//!
//! - Single-step lenses keep the step's endpoints and the requested capability
//! - Multi-step lenses take their signature from the chain endpoints
//! - Every non-terminal node is `read`, whatever the requested capability
//! - Any bracketing of `andThen` yields the same signature as the left fold

use lensmith_codegen::compose::compose;
use lensmith_codegen::expr::{AccessorExpr, PropertyAccess};
use lensmith_codegen::meta::{Capability, LensSpec, PropertyStep};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn capability() -> impl Strategy<Value = Capability> {
    prop_oneof![Just(Capability::Read), Just(Capability::ReadWrite)]
}

fn type_name() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{0,6}"
}

/// Produces an adjacent chain: each step's source is the previous step's
/// property type.
fn chain(max_length: usize) -> impl Strategy<Value = Vec<PropertyStep>> {
    prop::collection::vec((type_name(), "[a-z][a-z_]{0,6}"), 2..=max_length + 1).prop_map(
        |hops| {
            hops.windows(2)
                .map(|pair| {
                    PropertyStep::new(pair[0].0.as_str(), pair[1].1.as_str(), pair[1].0.as_str())
                })
                .collect()
        },
    )
}

fn bracket(nodes: &[AccessorExpr], splits: &[usize], depth: usize) -> AccessorExpr {
    if nodes.len() == 1 {
        return nodes[0].clone();
    }
    let choice = splits.get(depth % splits.len().max(1)).copied().unwrap_or(0);
    let split = choice % (nodes.len() - 1) + 1;
    let (left, right) = nodes.split_at(split);
    bracket(left, splits, depth + 1).and_then(bracket(right, splits, depth + 1))
}

// =============================================================================
// Laws
// =============================================================================

proptest! {
    /// A single-step lens has the step's endpoints and the requested capability.
    #[test]
    fn prop_single_step_signature(
        source in type_name(),
        target in type_name(),
        capability in capability()
    ) {
        let spec = LensSpec::new(
            "lens",
            vec![PropertyStep::new(source.as_str(), "value", target.as_str())],
            capability,
        );

        let accessor = compose(&spec).unwrap();

        prop_assert_eq!(accessor.source_type().as_str(), source.as_str());
        prop_assert_eq!(accessor.target_type().as_str(), target.as_str());
        prop_assert_eq!(accessor.capability(), capability);
        prop_assert_eq!(accessor.expression().combinator_count(), 0);
    }

    /// The composed signature depends only on the chain endpoints.
    #[test]
    fn prop_signature_from_endpoints(steps in chain(8), capability in capability()) {
        let spec = LensSpec::new("lens", steps.clone(), capability);

        let accessor = compose(&spec).unwrap();

        prop_assert_eq!(accessor.source_type(), steps[0].source_type());
        prop_assert_eq!(accessor.target_type(), steps[steps.len() - 1].property_type());
        prop_assert_eq!(accessor.capability(), capability);
        prop_assert_eq!(accessor.expression().signature(), accessor.signature().clone());
        prop_assert_eq!(accessor.expression().combinator_count(), steps.len() - 1);
    }

    /// Only the terminal node may be read-write.
    #[test]
    fn prop_non_terminal_nodes_are_read(steps in chain(8), capability in capability()) {
        let spec = LensSpec::new("lens", steps.clone(), capability);

        let accessor = compose(&spec).unwrap();
        let primitives = accessor.expression().primitives();

        prop_assert_eq!(primitives.len(), steps.len());
        let (last, rest) = primitives.split_last().unwrap();
        prop_assert!(rest.iter().all(|(_, node)| *node == Capability::Read));
        prop_assert_eq!(last.1, capability);
        for ((access, _), step) in primitives.iter().zip(&steps) {
            prop_assert_eq!(access.property_name(), step.property_name());
        }
    }

    /// Re-bracketing the primitives never changes the observable signature.
    #[test]
    fn prop_bracketing_preserves_signature(
        steps in chain(8),
        capability in capability(),
        splits in prop::collection::vec(any::<usize>(), 1..8)
    ) {
        let spec = LensSpec::new("lens", steps.clone(), capability);
        let accessor = compose(&spec).unwrap();

        let last_index = steps.len() - 1;
        let nodes: Vec<AccessorExpr> = steps
            .iter()
            .enumerate()
            .map(|(index, step)| {
                let node_capability = if index == last_index {
                    capability
                } else {
                    Capability::Read
                };
                AccessorExpr::primitive(PropertyAccess::from(step), node_capability)
            })
            .collect();
        let rebracketed = bracket(&nodes, &splits, 0);

        prop_assert_eq!(rebracketed.signature(), accessor.signature().clone());
        prop_assert_eq!(rebracketed.primitives(), accessor.expression().primitives());
    }
}

// =============================================================================
// Worked Examples
// =============================================================================

#[test]
fn person_name_length_example() {
    let spec = LensSpec::new(
        "name_length",
        vec![
            PropertyStep::new("Person", "name", "String"),
            PropertyStep::new("String", "length", "int"),
        ],
        Capability::Read,
    );

    let accessor = compose(&spec).unwrap();

    assert_eq!(accessor.signature().to_string(), "(Person, int, read)");
    assert_eq!(
        accessor.expression(),
        &AccessorExpr::Read(PropertyAccess::new("Person", "name", "String"))
            .and_then(AccessorExpr::Read(PropertyAccess::new("String", "length", "int")))
    );
}

#[test]
fn person_city_example() {
    let spec = LensSpec::new(
        "city",
        vec![
            PropertyStep::new("Person", "address", "Address"),
            PropertyStep::new("Address", "city", "String"),
        ],
        Capability::ReadWrite,
    );

    let accessor = compose(&spec).unwrap();

    assert_eq!(accessor.signature().to_string(), "(Person, String, read_write)");
    assert_eq!(
        accessor.expression(),
        &AccessorExpr::Read(PropertyAccess::new("Person", "address", "Address"))
            .and_then(AccessorExpr::ReadWrite(PropertyAccess::new("Address", "city", "String")))
    );
}
