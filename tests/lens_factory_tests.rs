//! Tests for factories generated by `lens_factory!`.
//!
//! - Read chains thread through every step
//! - Read-write chains write only the terminal step
//! - Single-step, generic and tuple-field lenses
//! - Generated factories are uninhabited namespaces

#![cfg(feature = "derive")]

use lensmith::lens_factory;
use lensmith::optics::{ReadLens, ReadWriteLens};
use rstest::rstest;

// =============================================================================
// Test Structures
// =============================================================================

#[derive(Clone, PartialEq, Debug)]
struct Zip {
    code: String,
}

#[derive(Clone, PartialEq, Debug)]
struct Address {
    street: String,
    city: String,
    zip: Zip,
}

#[derive(Clone, PartialEq, Debug)]
struct Person {
    name: String,
    age: u32,
    address: Address,
}

#[derive(Clone, PartialEq, Debug)]
struct Container<T> {
    value: T,
    label: String,
}

#[derive(Clone, PartialEq, Debug)]
struct Pair(i32, String);

#[derive(Clone, PartialEq, Debug)]
struct Holder {
    pair: Pair,
}

fn alice() -> Person {
    Person {
        name: "Alice".to_string(),
        age: 30,
        address: Address {
            street: "Main St".to_string(),
            city: "Tokyo".to_string(),
            zip: Zip {
                code: "100-0001".to_string(),
            },
        },
    }
}

// =============================================================================
// Factories
// =============================================================================

lens_factory! {
    #[lens_package = "tests::people"]
    PersonLenses {
        read name = Person.name: String;
        read_write age = Person.age: u32;
        read city = Person.address: Address, Address.city: String;
        read_write street = Person.address: Address, Address.street: String;
        read zip_code = Person.address: Address, Address.zip: Zip, Zip.code: String;
        read_write zip_code_mut = Person.address: Address, Address.zip: Zip, Zip.code: String;
    }
}

lens_factory! {
    pub(crate) GenericLenses {
        read_write value = Container<u64>.value: u64;
        read label = Container<u64>.label: String;
        read_write second = Holder.pair: Pair, Pair.1: String;
    }
}

// =============================================================================
// Read Lenses
// =============================================================================

#[test]
fn test_single_step_read() {
    assert_eq!(PersonLenses::name().get(&alice()), "Alice");
}

#[test]
fn test_two_step_read() {
    assert_eq!(PersonLenses::city().get(&alice()), "Tokyo");
}

#[test]
fn test_three_step_read() {
    assert_eq!(PersonLenses::zip_code().get(&alice()), "100-0001");
}

#[test]
fn test_read_lens_get_cloned() {
    let city: String = PersonLenses::city().get_cloned(&alice());
    assert_eq!(city, "Tokyo");
}

// =============================================================================
// Read-Write Lenses
// =============================================================================

#[test]
fn test_single_step_read_write() {
    let mut person = alice();
    PersonLenses::age().set(&mut person, 31);
    assert_eq!(person.age, 31);
}

#[test]
fn test_two_step_write_changes_only_the_target() {
    let mut person = alice();
    PersonLenses::street().set(&mut person, "Oak Ave".to_string());

    let mut expected = alice();
    expected.address.street = "Oak Ave".to_string();
    assert_eq!(person, expected);
}

#[test]
fn test_three_step_write() {
    let lens = PersonLenses::zip_code_mut();
    let mut person = alice();

    lens.modify(&mut person, |code| code.replace('-', ""));

    assert_eq!(person.address.zip.code, "1000001");
    assert_eq!(lens.get(&person), "1000001");
}

#[rstest]
#[case("Elm St")]
#[case("")]
#[case("Broadway")]
fn test_replace_returns_previous(#[case] street: &str) {
    let mut person = alice();
    let previous = PersonLenses::street().replace(&mut person, street.to_string());

    assert_eq!(previous, "Main St");
    assert_eq!(person.address.street, street);
}

// =============================================================================
// Generics and Tuple Fields
// =============================================================================

#[test]
fn test_generic_container_lenses() {
    let mut container = Container {
        value: 7_u64,
        label: "seven".to_string(),
    };

    GenericLenses::value().set(&mut container, 8);

    assert_eq!(container.value, 8);
    assert_eq!(GenericLenses::label().get(&container), "seven");
}

#[test]
fn test_tuple_field_lens() {
    let mut holder = Holder {
        pair: Pair(1, "one".to_string()),
    };

    GenericLenses::second().set(&mut holder, "uno".to_string());

    assert_eq!(holder.pair, Pair(1, "uno".to_string()));
}

// =============================================================================
// Generated Factory Shape
// =============================================================================

#[test]
fn test_lenses_are_cloneable() {
    let lens = PersonLenses::street();
    let cloned = lens.clone();
    let person = alice();

    assert_eq!(lens.get(&person), cloned.get(&person));
}

#[test]
fn test_factory_is_uninhabited() {
    fn absurd(factory: GenericLenses) -> std::convert::Infallible {
        match factory {}
    }

    let _: fn(GenericLenses) -> std::convert::Infallible = absurd;
    assert_eq!(std::mem::size_of::<PersonLenses>(), 0);
}
