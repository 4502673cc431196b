//! Error types for composition, validation, assembly and emission.

use std::fmt;

use crate::meta::TypeName;

/// A structural defect in a lens specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedSpec {
    /// The lens has no steps.
    EmptyChain,
    /// The lens name is empty or only whitespace.
    BlankName,
}

impl fmt::Display for MalformedSpec {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyChain => formatter.write_str("lens has no property steps"),
            Self::BlankName => formatter.write_str("lens name is blank"),
        }
    }
}

impl std::error::Error for MalformedSpec {}

/// Two consecutive steps whose types do not line up.
///
/// `expected` is the property type of step `step_index`, `found` is the
/// source type of step `step_index + 1`.
///
/// # Examples
///
/// ```rust
/// use lensmith_codegen::error::AdjacencyViolation;
/// use lensmith_codegen::meta::TypeName;
///
/// let violation = AdjacencyViolation {
///     step_index: 0,
///     expected: TypeName::new("Address"),
///     found: TypeName::new("Person"),
/// };
/// assert_eq!(
///     violation.to_string(),
///     "step 0 produces `Address` but step 1 is applied to `Person`"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyViolation {
    /// Index of the step whose property type does not match.
    pub step_index: usize,
    /// Property type of the step at `step_index`.
    pub expected: TypeName,
    /// Source type of the step at `step_index + 1`.
    pub found: TypeName,
}

impl fmt::Display for AdjacencyViolation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "step {} produces `{}` but step {} is applied to `{}`",
            self.step_index,
            self.expected,
            self.step_index + 1,
            self.found
        )
    }
}

impl std::error::Error for AdjacencyViolation {}

/// Errors raised while composing a single lens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    /// The specification violates a structural invariant.
    MalformedSpec(MalformedSpec),
    /// Consecutive steps do not line up.
    AdjacencyViolation(AdjacencyViolation),
}

impl fmt::Display for ComposeError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedSpec(error) => write!(formatter, "malformed lens spec: {error}"),
            Self::AdjacencyViolation(error) => write!(formatter, "adjacency violation: {error}"),
        }
    }
}

impl std::error::Error for ComposeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MalformedSpec(error) => Some(error),
            Self::AdjacencyViolation(error) => Some(error),
        }
    }
}

impl From<MalformedSpec> for ComposeError {
    fn from(error: MalformedSpec) -> Self {
        Self::MalformedSpec(error)
    }
}

impl From<AdjacencyViolation> for ComposeError {
    fn from(error: AdjacencyViolation) -> Self {
        Self::AdjacencyViolation(error)
    }
}

/// Errors raised by the validation pass over a factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A lens failed a per-lens check.
    Lens {
        /// Position of the lens in the factory.
        index: usize,
        /// Name of the lens.
        name: String,
        /// What went wrong.
        error: ComposeError,
    },
    /// Two lenses share a name.
    DuplicateLensName {
        /// The repeated name.
        name: String,
        /// Position of the first lens with that name.
        first_index: usize,
        /// Position of the repeat.
        duplicate_index: usize,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lens { index, name, error } => {
                write!(formatter, "lens `{name}` (#{index}): {error}")
            }
            Self::DuplicateLensName {
                name,
                first_index,
                duplicate_index,
            } => write!(
                formatter,
                "lens name `{name}` is declared at #{first_index} and again at #{duplicate_index}"
            ),
        }
    }
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lens { error, .. } => Some(error),
            Self::DuplicateLensName { .. } => None,
        }
    }
}

/// A factory assembly failure, naming the lens that could not be composed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyError {
    /// Position of the failing lens in the factory.
    pub index: usize,
    /// Name of the failing lens.
    pub name: String,
    /// The composition error.
    pub error: ComposeError,
}

impl fmt::Display for AssemblyError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "failed to compose lens `{}` (#{}): {}",
            self.name, self.index, self.error
        )
    }
}

impl std::error::Error for AssemblyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Errors raised while turning an artifact into tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitError {
    /// A factory, lens or property name is not a Rust identifier.
    InvalidIdentifier(String),
    /// A type name does not parse as a Rust type.
    InvalidType(TypeName),
    /// A lens could not be emitted.
    Lens {
        /// Position of the failing lens in the factory.
        index: usize,
        /// Name of the failing lens.
        name: String,
        /// The underlying emission error.
        error: Box<EmitError>,
    },
}

impl fmt::Display for EmitError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIdentifier(name) => {
                write!(formatter, "`{name}` is not a valid identifier")
            }
            Self::InvalidType(name) => write!(formatter, "`{name}` is not a valid type"),
            Self::Lens { index, name, error } => {
                write!(formatter, "failed to emit lens `{name}` (#{index}): {error}")
            }
        }
    }
}

impl EmitError {
    /// Position of the lens the error belongs to, if any.
    pub const fn lens_index(&self) -> Option<usize> {
        match self {
            Self::Lens { index, .. } => Some(*index),
            Self::InvalidIdentifier(_) | Self::InvalidType(_) => None,
        }
    }
}

impl std::error::Error for EmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lens { error, .. } => Some(error.as_ref()),
            Self::InvalidIdentifier(_) | Self::InvalidType(_) => None,
        }
    }
}
