//! Read and read-write lenses.
//!
//! A [`ReadLens`] focuses on a value inside a larger structure and can only
//! read it. A [`ReadWriteLens`] can also overwrite the focus in place.
//! [`FocusMut`] is the mutable navigation a read step needs so that a
//! read-write lens composed after it can reach its target; it never replaces
//! the intermediate value itself.
//!
//! # Laws
//!
//! Every [`ReadWriteLens`] must satisfy:
//!
//! 1. **GetSet Law**: Writing back what was read leaves the source unchanged.
//!    ```text
//!    lens.set(&mut source, lens.get(&source).clone()); source == before
//!    ```
//!
//! 2. **SetGet Law**: Reading after a write yields the written value.
//!    ```text
//!    lens.set(&mut source, value.clone()); lens.get(&source) == &value
//!    ```
//!
//! 3. **SetSet Law**: The last of two consecutive writes wins.
//!
//! # Examples
//!
//! ```
//! use lensmith::optics::{Lenses, ReadLens, ReadWriteLens};
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Address { city: String }
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Person { address: Address }
//!
//! let city = Lenses::field_read_lens(
//!     |person: &Person| &person.address,
//!     |person: &mut Person| &mut person.address,
//! )
//! .and_then(Lenses::read_write_lens(
//!     |address: &Address| &address.city,
//!     |address: &mut Address, city: String| address.city = city,
//! ));
//!
//! let mut person = Person { address: Address { city: "Tokyo".to_string() } };
//! assert_eq!(city.get(&person), "Tokyo");
//!
//! city.set(&mut person, "Osaka".to_string());
//! assert_eq!(person.address.city, "Osaka");
//! ```

use std::marker::PhantomData;

use super::and_then::AndThen;

/// A lens that can read its focus.
///
/// # Type Parameters
///
/// - `S`: The source type (the whole structure)
/// - `A`: The target type (the focused value)
pub trait ReadLens<S, A> {
    /// Gets a reference to the focused value.
    fn get<'a>(&self, source: &'a S) -> &'a A;

    /// Reads the focused value and clones it.
    fn get_cloned(&self, source: &S) -> A
    where
        A: Clone,
    {
        self.get(source).clone()
    }

    /// Composes this lens with `next`, which is applied to this lens's focus.
    ///
    /// The result can read when both sides can read. It can write when this
    /// lens is a [`FocusMut`] and `next` is a [`ReadWriteLens`]; only `next`
    /// performs the write.
    ///
    /// # Example
    ///
    /// ```
    /// use lensmith::optics::{Lenses, ReadLens};
    ///
    /// struct Inner { value: i32 }
    /// struct Outer { inner: Inner }
    ///
    /// let value = Lenses::read_lens(|outer: &Outer| &outer.inner)
    ///     .and_then(Lenses::read_lens(|inner: &Inner| &inner.value));
    ///
    /// let data = Outer { inner: Inner { value: 42 } };
    /// assert_eq!(*value.get(&data), 42);
    /// ```
    fn and_then<B, L>(self, next: L) -> AndThen<Self, L, A>
    where
        Self: Sized,
        L: ReadLens<A, B>,
    {
        AndThen::new(self, next)
    }
}

/// A lens that can also overwrite its focus.
pub trait ReadWriteLens<S, A>: ReadLens<S, A> {
    /// Replaces the focused value.
    fn set(&self, source: &mut S, value: A);

    /// Replaces the focused value with `function` applied to the current one.
    ///
    /// # Example
    ///
    /// ```
    /// use lensmith::optics::ReadWriteLens;
    /// use lensmith::lens;
    ///
    /// struct Counter { count: u32 }
    ///
    /// let count = lens!(Counter, count);
    /// let mut counter = Counter { count: 1 };
    /// count.modify(&mut counter, |count| count + 1);
    /// assert_eq!(counter.count, 2);
    /// ```
    fn modify<F>(&self, source: &mut S, function: F)
    where
        F: FnOnce(&A) -> A,
    {
        let new_value = function(self.get(source));
        self.set(source, new_value);
    }

    /// Replaces the focused value and returns the previous one.
    fn replace(&self, source: &mut S, value: A) -> A
    where
        A: Clone,
    {
        let previous = self.get(source).clone();
        self.set(source, value);
        previous
    }
}

/// Mutable navigation from a source to its focus.
///
/// Read steps of a read-write chain implement this so the terminal write can
/// reach its target through them.
pub trait FocusMut<S, A> {
    /// Gets a mutable reference to the focused value.
    fn focus_mut<'a>(&self, source: &'a mut S) -> &'a mut A;
}

/// A read lens backed by a getter function.
///
/// # Example
///
/// ```
/// use lensmith::optics::{FunctionReadLens, ReadLens};
///
/// struct Person { name: String }
///
/// let name = FunctionReadLens::new(|person: &Person| &person.name);
/// let person = Person { name: "Alice".to_string() };
/// assert_eq!(name.get(&person), "Alice");
/// ```
pub struct FunctionReadLens<S, A, G>
where
    G: Fn(&S) -> &A,
{
    getter: G,
    _marker: PhantomData<fn(&S) -> &A>,
}

impl<S, A, G> FunctionReadLens<S, A, G>
where
    G: Fn(&S) -> &A,
{
    /// Creates a new `FunctionReadLens` from a getter.
    #[must_use]
    pub const fn new(getter: G) -> Self {
        Self {
            getter,
            _marker: PhantomData,
        }
    }
}

impl<S, A, G> ReadLens<S, A> for FunctionReadLens<S, A, G>
where
    G: Fn(&S) -> &A,
{
    fn get<'a>(&self, source: &'a S) -> &'a A {
        (self.getter)(source)
    }
}

impl<S, A, G> Clone for FunctionReadLens<S, A, G>
where
    G: Fn(&S) -> &A + Clone,
{
    fn clone(&self) -> Self {
        Self::new(self.getter.clone())
    }
}

impl<S, A, G> std::fmt::Debug for FunctionReadLens<S, A, G>
where
    G: Fn(&S) -> &A,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("FunctionReadLens")
            .finish_non_exhaustive()
    }
}

/// A read lens over a field: a getter plus mutable navigation.
///
/// It reads like [`FunctionReadLens`], and additionally implements
/// [`FocusMut`] so a read-write lens can be composed after it.
pub struct FieldReadLens<S, A, G, M>
where
    G: Fn(&S) -> &A,
    M: Fn(&mut S) -> &mut A,
{
    getter: G,
    navigate: M,
    _marker: PhantomData<fn(&S) -> &A>,
}

impl<S, A, G, M> FieldReadLens<S, A, G, M>
where
    G: Fn(&S) -> &A,
    M: Fn(&mut S) -> &mut A,
{
    /// Creates a new `FieldReadLens` from a getter and a mutable navigation.
    #[must_use]
    pub const fn new(getter: G, navigate: M) -> Self {
        Self {
            getter,
            navigate,
            _marker: PhantomData,
        }
    }
}

impl<S, A, G, M> ReadLens<S, A> for FieldReadLens<S, A, G, M>
where
    G: Fn(&S) -> &A,
    M: Fn(&mut S) -> &mut A,
{
    fn get<'a>(&self, source: &'a S) -> &'a A {
        (self.getter)(source)
    }
}

impl<S, A, G, M> FocusMut<S, A> for FieldReadLens<S, A, G, M>
where
    G: Fn(&S) -> &A,
    M: Fn(&mut S) -> &mut A,
{
    fn focus_mut<'a>(&self, source: &'a mut S) -> &'a mut A {
        (self.navigate)(source)
    }
}

impl<S, A, G, M> Clone for FieldReadLens<S, A, G, M>
where
    G: Fn(&S) -> &A + Clone,
    M: Fn(&mut S) -> &mut A + Clone,
{
    fn clone(&self) -> Self {
        Self::new(self.getter.clone(), self.navigate.clone())
    }
}

impl<S, A, G, M> std::fmt::Debug for FieldReadLens<S, A, G, M>
where
    G: Fn(&S) -> &A,
    M: Fn(&mut S) -> &mut A,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("FieldReadLens")
            .finish_non_exhaustive()
    }
}

/// A read-write lens backed by a getter and a setter.
///
/// # Example
///
/// ```
/// use lensmith::optics::{FunctionReadWriteLens, ReadLens, ReadWriteLens};
///
/// struct Point { x: i32, y: i32 }
///
/// let x = FunctionReadWriteLens::new(
///     |point: &Point| &point.x,
///     |point: &mut Point, x: i32| point.x = x,
/// );
///
/// let mut point = Point { x: 10, y: 20 };
/// x.set(&mut point, 100);
/// assert_eq!(*x.get(&point), 100);
/// assert_eq!(point.y, 20);
/// ```
pub struct FunctionReadWriteLens<S, A, G, St>
where
    G: Fn(&S) -> &A,
    St: Fn(&mut S, A),
{
    getter: G,
    setter: St,
    _marker: PhantomData<fn(&S) -> &A>,
}

impl<S, A, G, St> FunctionReadWriteLens<S, A, G, St>
where
    G: Fn(&S) -> &A,
    St: Fn(&mut S, A),
{
    /// Creates a new `FunctionReadWriteLens` from a getter and a setter.
    #[must_use]
    pub const fn new(getter: G, setter: St) -> Self {
        Self {
            getter,
            setter,
            _marker: PhantomData,
        }
    }
}

impl<S, A, G, St> ReadLens<S, A> for FunctionReadWriteLens<S, A, G, St>
where
    G: Fn(&S) -> &A,
    St: Fn(&mut S, A),
{
    fn get<'a>(&self, source: &'a S) -> &'a A {
        (self.getter)(source)
    }
}

impl<S, A, G, St> ReadWriteLens<S, A> for FunctionReadWriteLens<S, A, G, St>
where
    G: Fn(&S) -> &A,
    St: Fn(&mut S, A),
{
    fn set(&self, source: &mut S, value: A) {
        (self.setter)(source, value);
    }
}

impl<S, A, G, St> Clone for FunctionReadWriteLens<S, A, G, St>
where
    G: Fn(&S) -> &A + Clone,
    St: Fn(&mut S, A) + Clone,
{
    fn clone(&self) -> Self {
        Self::new(self.getter.clone(), self.setter.clone())
    }
}

impl<S, A, G, St> std::fmt::Debug for FunctionReadWriteLens<S, A, G, St>
where
    G: Fn(&S) -> &A,
    St: Fn(&mut S, A),
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("FunctionReadWriteLens")
            .finish_non_exhaustive()
    }
}

/// Creates a read-write lens for a struct field.
///
/// # Syntax
///
/// ```text
/// lens!(StructType, field_name)
/// ```
///
/// # Example
///
/// ```
/// use lensmith::optics::{ReadLens, ReadWriteLens};
/// use lensmith::lens;
///
/// struct Point { x: i32, y: i32 }
///
/// let x = lens!(Point, x);
/// let mut point = Point { x: 10, y: 20 };
/// x.set(&mut point, 100);
/// assert_eq!(*x.get(&point), 100);
/// ```
#[macro_export]
macro_rules! lens {
    ($struct_type:ident < $($generic:tt),+ >, $field:tt) => {
        $crate::optics::FunctionReadWriteLens::new(
            |source: &$struct_type<$($generic),+>| &source.$field,
            |source: &mut $struct_type<$($generic),+>, value| source.$field = value,
        )
    };
    ($struct_type:path, $field:tt) => {
        $crate::optics::FunctionReadWriteLens::new(
            |source: &$struct_type| &source.$field,
            |source: &mut $struct_type, value| source.$field = value,
        )
    };
}

/// Creates a read lens for a struct field that can precede a read-write
/// lens in a composition.
///
/// # Example
///
/// ```
/// use lensmith::optics::{ReadLens, ReadWriteLens};
/// use lensmith::{lens, read_lens};
///
/// struct Inner { value: i32 }
/// struct Outer { inner: Inner }
///
/// let value = read_lens!(Outer, inner).and_then(lens!(Inner, value));
/// let mut data = Outer { inner: Inner { value: 1 } };
/// value.set(&mut data, 2);
/// assert_eq!(*value.get(&data), 2);
/// ```
#[macro_export]
macro_rules! read_lens {
    ($struct_type:ident < $($generic:tt),+ >, $field:tt) => {
        $crate::optics::FieldReadLens::new(
            |source: &$struct_type<$($generic),+>| &source.$field,
            |source: &mut $struct_type<$($generic),+>| &mut source.$field,
        )
    };
    ($struct_type:path, $field:tt) => {
        $crate::optics::FieldReadLens::new(
            |source: &$struct_type| &source.$field,
            |source: &mut $struct_type| &mut source.$field,
        )
    };
}
