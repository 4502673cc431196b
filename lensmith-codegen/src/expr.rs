//! Accessor expression trees produced by the composer.
//!
//! A tree has two primitive node kinds, [`AccessorExpr::Read`] and
//! [`AccessorExpr::ReadWrite`], and one combinator, [`AccessorExpr::AndThen`].
//! The combinator threads the output of its left operand into its right
//! operand and takes the capability of the right operand.

use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::meta::{Capability, PropertyStep, TypeName};

/// A single property access carried by a primitive node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertyAccess {
    source_type: TypeName,
    property_name: String,
    property_type: TypeName,
}

impl PropertyAccess {
    /// Creates a property access.
    pub fn new(
        source_type: impl Into<TypeName>,
        property_name: impl Into<String>,
        property_type: impl Into<TypeName>,
    ) -> Self {
        Self {
            source_type: source_type.into(),
            property_name: property_name.into(),
            property_type: property_type.into(),
        }
    }

    /// The type the access is applied to.
    pub const fn source_type(&self) -> &TypeName {
        &self.source_type
    }

    /// The accessed property.
    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    /// The type of the property.
    pub const fn property_type(&self) -> &TypeName {
        &self.property_type
    }
}

impl From<&PropertyStep> for PropertyAccess {
    fn from(step: &PropertyStep) -> Self {
        Self::new(
            step.source_type().clone(),
            step.property_name(),
            step.property_type().clone(),
        )
    }
}

/// An accessor expression tree.
///
/// Traversals, comparison, cloning and dropping walk the tree with an
/// explicit stack, so a chain of any length is handled without recursion.
pub enum AccessorExpr {
    /// `read(source, property, type)`
    Read(PropertyAccess),
    /// `readWrite(source, property, type)`
    ReadWrite(PropertyAccess),
    /// `andThen(left, right)`: apply `left`, then `right` to its result.
    AndThen(Box<AccessorExpr>, Box<AccessorExpr>),
}

enum Visit<'a> {
    Enter(&'a AccessorExpr),
    Combine,
}

impl AccessorExpr {
    /// Builds a primitive node with the given capability.
    pub fn primitive(access: PropertyAccess, capability: Capability) -> Self {
        match capability {
            Capability::Read => Self::Read(access),
            Capability::ReadWrite => Self::ReadWrite(access),
        }
    }

    /// Sequentially composes `self` with `next`.
    #[must_use]
    pub fn and_then(self, next: Self) -> Self {
        Self::AndThen(Box::new(self), Box::new(next))
    }

    /// The capability of the expression; for `AndThen` this is the
    /// capability of the right operand.
    pub fn capability(&self) -> Capability {
        match self.rightmost() {
            Self::ReadWrite(_) => Capability::ReadWrite,
            Self::Read(_) | Self::AndThen(..) => Capability::Read,
        }
    }

    /// The type the expression is applied to (leftmost primitive).
    pub fn source_type(&self) -> &TypeName {
        let mut node = self;
        loop {
            match node {
                Self::Read(access) | Self::ReadWrite(access) => return access.source_type(),
                Self::AndThen(left, _) => node = &**left,
            }
        }
    }

    /// The type the expression focuses on (rightmost primitive).
    pub fn target_type(&self) -> &TypeName {
        match self.rightmost() {
            Self::Read(access) | Self::ReadWrite(access) => access.property_type(),
            Self::AndThen(..) => unreachable!("rightmost node is a primitive"),
        }
    }

    fn rightmost(&self) -> &Self {
        let mut node = self;
        while let Self::AndThen(_, right) = node {
            node = &**right;
        }
        node
    }

    /// The signature derived from the endpoints of the tree.
    pub fn signature(&self) -> Signature {
        Signature::new(
            self.source_type().clone(),
            self.target_type().clone(),
            self.capability(),
        )
    }

    /// Number of `AndThen` nodes in the tree.
    pub fn combinator_count(&self) -> usize {
        self.nodes()
            .filter(|node| matches!(node, Self::AndThen(..)))
            .count()
    }

    /// Depth of nested `AndThen` nodes; a primitive has depth zero.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 0)];
        while let Some((node, level)) = pending.pop() {
            if let Self::AndThen(left, right) = node {
                deepest = deepest.max(level + 1);
                pending.push((&**right, level + 1));
                pending.push((&**left, level + 1));
            }
        }
        deepest
    }

    /// Primitive nodes in access order, paired with their capability.
    pub fn primitives(&self) -> Vec<(&PropertyAccess, Capability)> {
        self.nodes()
            .filter_map(|node| match node {
                Self::Read(access) => Some((access, Capability::Read)),
                Self::ReadWrite(access) => Some((access, Capability::ReadWrite)),
                Self::AndThen(..) => None,
            })
            .collect()
    }

    /// Nodes in pre-order: every `AndThen` before its operands, left
    /// operand before right.
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            pending: vec![self],
        }
    }

    /// Folds the tree bottom-up, primitives in access order.
    ///
    /// `primitive` is called for each leaf and `combine` for each `AndThen`
    /// with the results of its left and right operands.
    ///
    /// # Errors
    ///
    /// Stops at the first error returned by either callback.
    pub fn try_fold<T, E>(
        &self,
        mut primitive: impl FnMut(&PropertyAccess, Capability) -> Result<T, E>,
        mut combine: impl FnMut(T, T) -> Result<T, E>,
    ) -> Result<T, E> {
        let mut pending = vec![Visit::Enter(self)];
        let mut folded = Vec::new();
        while let Some(visit) = pending.pop() {
            match visit {
                Visit::Enter(Self::Read(access)) => {
                    folded.push(primitive(access, Capability::Read)?);
                }
                Visit::Enter(Self::ReadWrite(access)) => {
                    folded.push(primitive(access, Capability::ReadWrite)?);
                }
                Visit::Enter(Self::AndThen(left, right)) => {
                    pending.push(Visit::Combine);
                    pending.push(Visit::Enter(&**right));
                    pending.push(Visit::Enter(&**left));
                }
                Visit::Combine => match (folded.pop(), folded.pop()) {
                    (Some(right), Some(left)) => folded.push(combine(left, right)?),
                    _ => unreachable!("combine follows both operands"),
                },
            }
        }
        match folded.pop() {
            Some(result) => Ok(result),
            None => unreachable!("a tree folds to one value"),
        }
    }

    fn placeholder() -> Self {
        Self::Read(PropertyAccess {
            source_type: TypeName::default(),
            property_name: String::new(),
            property_type: TypeName::default(),
        })
    }

    fn detach_nested(child: &mut Self, detached: &mut Vec<Self>) {
        if matches!(child, Self::AndThen(..)) {
            detached.push(std::mem::replace(child, Self::placeholder()));
        }
    }
}

/// Pre-order iterator over the nodes of an [`AccessorExpr`].
pub struct Nodes<'a> {
    pending: Vec<&'a AccessorExpr>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a AccessorExpr;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.pending.pop()?;
        if let AccessorExpr::AndThen(left, right) = node {
            self.pending.push(&**right);
            self.pending.push(&**left);
        }
        Some(node)
    }
}

impl Drop for AccessorExpr {
    fn drop(&mut self) {
        let mut detached = Vec::new();
        if let Self::AndThen(left, right) = self {
            Self::detach_nested(left, &mut detached);
            Self::detach_nested(right, &mut detached);
        }
        while let Some(mut node) = detached.pop() {
            if let Self::AndThen(left, right) = &mut node {
                Self::detach_nested(left, &mut detached);
                Self::detach_nested(right, &mut detached);
            }
        }
    }
}

impl Clone for AccessorExpr {
    fn clone(&self) -> Self {
        let cloned = self.try_fold(
            |access, capability| Ok::<_, Infallible>(Self::primitive(access.clone(), capability)),
            |left, right| Ok(left.and_then(right)),
        );
        match cloned {
            Ok(expression) => expression,
            Err(never) => match never {},
        }
    }
}

impl PartialEq for AccessorExpr {
    fn eq(&self, other: &Self) -> bool {
        let mut left = self.nodes();
        let mut right = other.nodes();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return true,
                (Some(Self::Read(a)), Some(Self::Read(b)))
                | (Some(Self::ReadWrite(a)), Some(Self::ReadWrite(b)))
                    if a == b => {}
                (Some(Self::AndThen(..)), Some(Self::AndThen(..))) => {}
                _ => return false,
            }
        }
    }
}

impl Eq for AccessorExpr {}

impl Hash for AccessorExpr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for node in self.nodes() {
            std::mem::discriminant(node).hash(state);
            if let Self::Read(access) | Self::ReadWrite(access) = node {
                access.hash(state);
            }
        }
    }
}

impl fmt::Debug for AccessorExpr {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("AccessorExpr")
            .field(&format_args!("{self}"))
            .finish()
    }
}

impl fmt::Display for AccessorExpr {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Piece<'a> {
            Node(&'a AccessorExpr),
            Text(&'static str),
        }

        let mut pending = vec![Piece::Node(self)];
        while let Some(piece) = pending.pop() {
            match piece {
                Piece::Text(text) => formatter.write_str(text)?,
                Piece::Node(Self::Read(access)) => write!(
                    formatter,
                    "read({},\"{}\",{})",
                    access.source_type, access.property_name, access.property_type
                )?,
                Piece::Node(Self::ReadWrite(access)) => write!(
                    formatter,
                    "readWrite({},\"{}\",{})",
                    access.source_type, access.property_name, access.property_type
                )?,
                Piece::Node(Self::AndThen(left, right)) => {
                    formatter.write_str("andThen(")?;
                    pending.push(Piece::Text(")"));
                    pending.push(Piece::Node(&**right));
                    pending.push(Piece::Text(", "));
                    pending.push(Piece::Node(&**left));
                }
            }
        }
        Ok(())
    }
}

/// The static type of a composed accessor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    source_type: TypeName,
    target_type: TypeName,
    capability: Capability,
}

impl Signature {
    /// Creates a signature.
    pub const fn new(source_type: TypeName, target_type: TypeName, capability: Capability) -> Self {
        Self {
            source_type,
            target_type,
            capability,
        }
    }

    /// The type the accessor is applied to.
    pub const fn source_type(&self) -> &TypeName {
        &self.source_type
    }

    /// The type the accessor focuses on.
    pub const fn target_type(&self) -> &TypeName {
        &self.target_type
    }

    /// Read or read-write.
    pub const fn capability(&self) -> Capability {
        self.capability
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "({}, {}, {})",
            self.source_type, self.target_type, self.capability
        )
    }
}

/// The composer's output: an expression tree with its static signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposedAccessor {
    signature: Signature,
    expression: AccessorExpr,
}

impl ComposedAccessor {
    pub(crate) const fn new(signature: Signature, expression: AccessorExpr) -> Self {
        Self {
            signature,
            expression,
        }
    }

    /// The static signature.
    pub const fn signature(&self) -> &Signature {
        &self.signature
    }

    /// The expression tree.
    pub const fn expression(&self) -> &AccessorExpr {
        &self.expression
    }

    /// Shorthand for `signature().source_type()`.
    pub const fn source_type(&self) -> &TypeName {
        self.signature.source_type()
    }

    /// Shorthand for `signature().target_type()`.
    pub const fn target_type(&self) -> &TypeName {
        self.signature.target_type()
    }

    /// Shorthand for `signature().capability()`.
    pub const fn capability(&self) -> Capability {
        self.signature.capability()
    }
}
