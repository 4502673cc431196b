//! Sequential composition of lenses.
//!
//! `AndThen<L1, L2, A>` applies `L1` and then `L2` to the focus of `L1`. Its
//! capability is the capability of `L2`: reads thread through both lenses,
//! writes are performed by `L2` alone after `L1` has navigated to the
//! intermediate value.

use std::marker::PhantomData;

use super::lens::{FocusMut, ReadLens, ReadWriteLens};

/// Two lenses applied one after the other.
///
/// # Type Parameters
///
/// - `L1`: The outer lens
/// - `L2`: The inner lens
/// - `A`: The intermediate type (target of `L1`, source of `L2`)
///
/// # Example
///
/// ```
/// use lensmith::optics::{ReadLens, ReadWriteLens};
/// use lensmith::{lens, read_lens};
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Address { city: String }
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Person { name: String, address: Address }
///
/// let city = read_lens!(Person, address).and_then(lens!(Address, city));
///
/// let mut person = Person {
///     name: "Alice".to_string(),
///     address: Address { city: "Tokyo".to_string() },
/// };
/// city.set(&mut person, "Kyoto".to_string());
///
/// assert_eq!(city.get(&person), "Kyoto");
/// assert_eq!(person.name, "Alice");
/// ```
pub struct AndThen<L1, L2, A> {
    first: L1,
    second: L2,
    _marker: PhantomData<fn() -> A>,
}

impl<L1, L2, A> AndThen<L1, L2, A> {
    /// Creates a new composition.
    #[must_use]
    pub const fn new(first: L1, second: L2) -> Self {
        Self {
            first,
            second,
            _marker: PhantomData,
        }
    }

    /// The outer lens.
    pub const fn first(&self) -> &L1 {
        &self.first
    }

    /// The inner lens.
    pub const fn second(&self) -> &L2 {
        &self.second
    }
}

impl<S, A, B, L1, L2> ReadLens<S, B> for AndThen<L1, L2, A>
where
    L1: ReadLens<S, A>,
    L2: ReadLens<A, B>,
    A: 'static,
{
    fn get<'a>(&self, source: &'a S) -> &'a B {
        self.second.get(self.first.get(source))
    }
}

impl<S, A, B, L1, L2> ReadWriteLens<S, B> for AndThen<L1, L2, A>
where
    L1: ReadLens<S, A> + FocusMut<S, A>,
    L2: ReadWriteLens<A, B>,
    A: 'static,
{
    fn set(&self, source: &mut S, value: B) {
        self.second.set(self.first.focus_mut(source), value);
    }
}

impl<S, A, B, L1, L2> FocusMut<S, B> for AndThen<L1, L2, A>
where
    L1: FocusMut<S, A>,
    L2: FocusMut<A, B>,
    A: 'static,
{
    fn focus_mut<'a>(&self, source: &'a mut S) -> &'a mut B {
        self.second.focus_mut(self.first.focus_mut(source))
    }
}

impl<L1: Clone, L2: Clone, A> Clone for AndThen<L1, L2, A> {
    fn clone(&self) -> Self {
        Self::new(self.first.clone(), self.second.clone())
    }
}

impl<L1: std::fmt::Debug, L2: std::fmt::Debug, A> std::fmt::Debug for AndThen<L1, L2, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("AndThen")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}
