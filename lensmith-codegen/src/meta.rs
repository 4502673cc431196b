//! Metadata model describing the lenses to generate.
//!
//! A [`FactorySpec`] owns an ordered list of [`LensSpec`]s. Each lens is a
//! non-empty chain of [`PropertyStep`]s plus the [`Capability`] requested for
//! the terminal step. All values are immutable once built; the producer of the
//! metadata is responsible for the structural invariants (see
//! [`crate::validate`] for the explicit checks).
//!
//! # Example
//!
//! ```
//! use lensmith_codegen::meta::{Capability, FactorySpec, LensSpec, PropertyStep};
//!
//! let factory = FactorySpec::builder("model::people", "PersonLenses")
//!     .lens(LensSpec::new(
//!         "city",
//!         vec![
//!             PropertyStep::new("Person", "address", "Address"),
//!             PropertyStep::new("Address", "city", "String"),
//!         ],
//!         Capability::ReadWrite,
//!     ))
//!     .build();
//!
//! assert_eq!(factory.lenses().len(), 1);
//! assert!(factory.lens("city").is_some());
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};

use proc_macro2::{Delimiter, TokenStream, TokenTree};

/// A reference to a type, kept in its textual form.
///
/// Two names are equal when they lex to the same token sequence:
/// `Vec < u8 >` equals `Vec<u8>`, while `dyn Foo` and `dynFoo` stay
/// distinct. Text that does not lex is compared with runs of whitespace
/// collapsed.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub struct TypeName {
    written: String,
    tokens: String,
}

impl TypeName {
    /// Creates a type name from its textual form.
    pub fn new(name: impl Into<String>) -> Self {
        let written = name.into();
        let tokens = token_form(&written);
        Self { written, tokens }
    }

    /// Returns the type name as written.
    pub fn as_str(&self) -> &str {
        &self.written
    }
}

fn token_form(written: &str) -> String {
    match written.parse::<TokenStream>() {
        Ok(tokens) => {
            let mut form = String::with_capacity(written.len());
            push_tokens(tokens, &mut form);
            form
        }
        Err(_) => written.split_whitespace().collect::<Vec<_>>().join(" "),
    }
}

fn push_tokens(tokens: TokenStream, form: &mut String) {
    for token in tokens {
        match token {
            TokenTree::Group(group) => {
                let (open, close) = match group.delimiter() {
                    Delimiter::Parenthesis => ("(", ")"),
                    Delimiter::Brace => ("{", "}"),
                    Delimiter::Bracket => ("[", "]"),
                    Delimiter::None => ("", ""),
                };
                push_word(form, open);
                push_tokens(group.stream(), form);
                push_word(form, close);
            }
            TokenTree::Ident(ident) => push_word(form, &ident.to_string()),
            TokenTree::Punct(punct) => push_word(form, punct.as_char().encode_utf8(&mut [0; 4])),
            TokenTree::Literal(literal) => push_word(form, &literal.to_string()),
        }
    }
}

fn push_word(form: &mut String, word: &str) {
    if word.is_empty() {
        return;
    }
    if !form.is_empty() {
        form.push(' ');
    }
    form.push_str(word);
}

impl PartialEq for TypeName {
    fn eq(&self, other: &Self) -> bool {
        self.tokens == other.tokens
    }
}

impl Eq for TypeName {}

impl Hash for TypeName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tokens.hash(state);
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.written)
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TypeName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<TypeName> for String {
    fn from(name: TypeName) -> Self {
        name.written
    }
}

/// What an accessor is able to do with its focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Capability {
    /// The focus can only be read.
    Read,
    /// The focus can be read and written.
    ReadWrite,
}

impl Capability {
    /// Returns `true` for [`Capability::ReadWrite`].
    pub const fn is_writable(self) -> bool {
        matches!(self, Self::ReadWrite)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => formatter.write_str("read"),
            Self::ReadWrite => formatter.write_str("read_write"),
        }
    }
}

/// One hop of a lens chain: reading `property_name` of `source_type`
/// yields a `property_type`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyStep {
    source_type: TypeName,
    property_name: String,
    property_type: TypeName,
}

impl PropertyStep {
    /// Creates a new step.
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

    /// The type the step is applied to.
    pub const fn source_type(&self) -> &TypeName {
        &self.source_type
    }

    /// The accessed property.
    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    /// The type produced by reading (or accepted by writing) the property.
    pub const fn property_type(&self) -> &TypeName {
        &self.property_type
    }
}

impl fmt::Display for PropertyStep {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}.{}: {}",
            self.source_type, self.property_name, self.property_type
        )
    }
}

/// A named lens to generate.
///
/// Steps are kept in access order. Only the terminal step may carry
/// [`Capability::ReadWrite`]; every other step is read.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LensSpec {
    name: String,
    steps: Vec<PropertyStep>,
    capability: Capability,
}

impl LensSpec {
    /// Creates a new lens specification.
    pub fn new(name: impl Into<String>, steps: Vec<PropertyStep>, capability: Capability) -> Self {
        Self {
            name: name.into(),
            steps,
            capability,
        }
    }

    /// The lens name, unique within its factory.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All steps in access order.
    pub fn steps(&self) -> &[PropertyStep] {
        &self.steps
    }

    /// The capability requested for the terminal step.
    pub const fn capability(&self) -> Capability {
        self.capability
    }

    /// The first step, if any.
    pub fn first_step(&self) -> Option<&PropertyStep> {
        self.steps.first()
    }

    /// The terminal step, if any.
    pub fn last_step(&self) -> Option<&PropertyStep> {
        self.steps.last()
    }

    /// Every step except the terminal one.
    pub fn intermediate_steps(&self) -> &[PropertyStep] {
        match self.steps.split_last() {
            Some((_, intermediate)) => intermediate,
            None => &[],
        }
    }

    /// Returns `true` if the chain has exactly one step.
    pub fn is_single_step(&self) -> bool {
        self.steps.len() == 1
    }
}

/// Visibility of the generated factory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Visibility {
    /// `pub`
    #[default]
    Public,
    /// `pub(crate)`
    Crate,
    /// No modifier.
    Private,
}

/// The generation unit: a named factory holding lens specifications.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FactorySpec {
    package_id: String,
    factory_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    visibility: Visibility,
    lenses: Vec<LensSpec>,
}

impl FactorySpec {
    /// Creates a factory specification.
    pub fn new(
        package_id: impl Into<String>,
        factory_name: impl Into<String>,
        visibility: Visibility,
        lenses: Vec<LensSpec>,
    ) -> Self {
        Self {
            package_id: package_id.into(),
            factory_name: factory_name.into(),
            visibility,
            lenses,
        }
    }

    /// Starts building a public factory with no lenses.
    pub fn builder(
        package_id: impl Into<String>,
        factory_name: impl Into<String>,
    ) -> FactorySpecBuilder {
        FactorySpecBuilder {
            spec: Self::new(package_id, factory_name, Visibility::Public, Vec::new()),
        }
    }

    /// Identifier of the package the factory belongs to.
    pub fn package_id(&self) -> &str {
        &self.package_id
    }

    /// Name of the generated factory.
    pub fn factory_name(&self) -> &str {
        &self.factory_name
    }

    /// Visibility of the generated factory.
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Lens specifications in declaration order.
    pub fn lenses(&self) -> &[LensSpec] {
        &self.lenses
    }

    /// Looks up a lens specification by name.
    pub fn lens(&self, name: &str) -> Option<&LensSpec> {
        self.lenses.iter().find(|lens| lens.name() == name)
    }
}

/// Builder for [`FactorySpec`].
#[derive(Clone, Debug)]
pub struct FactorySpecBuilder {
    spec: FactorySpec,
}

impl FactorySpecBuilder {
    /// Sets the factory visibility.
    #[must_use]
    pub const fn visibility(mut self, visibility: Visibility) -> Self {
        self.spec.visibility = visibility;
        self
    }

    /// Appends a lens specification.
    #[must_use]
    pub fn lens(mut self, lens: LensSpec) -> Self {
        self.spec.lenses.push(lens);
        self
    }

    /// Finishes the builder.
    pub fn build(self) -> FactorySpec {
        self.spec
    }
}
