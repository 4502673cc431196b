//! Constructors used by generated lens factories.

use super::lens::{FieldReadLens, FunctionReadLens, FunctionReadWriteLens};

/// Entry points for building primitive lenses.
///
/// Generated factories call these; they are equally usable by hand.
///
/// # Example
///
/// ```
/// use lensmith::optics::{Lenses, ReadLens};
///
/// struct Person { name: String }
///
/// let name = Lenses::read_lens(|person: &Person| &person.name);
/// assert_eq!(name.get(&Person { name: "Alice".to_string() }), "Alice");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Lenses;

impl Lenses {
    /// A read lens from a getter.
    #[must_use]
    pub const fn read_lens<S, A, G>(getter: G) -> FunctionReadLens<S, A, G>
    where
        G: Fn(&S) -> &A,
    {
        FunctionReadLens::new(getter)
    }

    /// A read lens from a getter and a mutable navigation, usable in front
    /// of a read-write lens.
    #[must_use]
    pub const fn field_read_lens<S, A, G, M>(getter: G, navigate: M) -> FieldReadLens<S, A, G, M>
    where
        G: Fn(&S) -> &A,
        M: Fn(&mut S) -> &mut A,
    {
        FieldReadLens::new(getter, navigate)
    }

    /// A read-write lens from a getter and a setter.
    #[must_use]
    pub const fn read_write_lens<S, A, G, St>(
        getter: G,
        setter: St,
    ) -> FunctionReadWriteLens<S, A, G, St>
    where
        G: Fn(&S) -> &A,
        St: Fn(&mut S, A),
    {
        FunctionReadWriteLens::new(getter, setter)
    }
}
