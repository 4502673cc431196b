//! Token emission for assembled factories.
//!
//! [`TokenEmitter`] renders a [`FactoryArtifact`] as Rust tokens targeting the
//! runtime optics of the `lensmith` crate:
//!
//! ```text
//! pub enum PersonLenses {}
//!
//! impl PersonLenses {
//!     pub fn city() -> impl ::lensmith::optics::ReadWriteLens<Person, String> + Clone {
//!         ::lensmith::optics::Lenses::field_read_lens(
//!             |source: &Person| &source.address,
//!             |source: &mut Person| &mut source.address,
//!         )
//!         .and_then(::lensmith::optics::Lenses::read_write_lens(
//!             |source: &Address| &source.city,
//!             |source: &mut Address, value: String| source.city = value,
//!         ))
//!     }
//! }
//! ```
//!
//! The factory is an uninhabited enum: it only namespaces its lens
//! functions and cannot be instantiated.
//!
//! `read` nodes of a read-write lens carry a mutable navigation closure so
//! the terminal write can reach its target; `read` nodes of a read-only lens
//! carry only the getter.

use std::iter;

use proc_macro2::{Delimiter, Group, TokenStream, TokenTree};
use quote::quote;
use syn::{Ident, Member, Path, Type};

use crate::error::EmitError;
use crate::expr::{AccessorExpr, PropertyAccess};
use crate::factory::{FactoryArtifact, NamedAccessor};
use crate::meta::{Capability, TypeName, Visibility};

/// Turns an assembled factory into some output representation.
pub trait Emitter {
    /// The emitted representation.
    type Output;

    /// Emits the artifact.
    ///
    /// # Errors
    ///
    /// Returns an [`EmitError`] when a name or type cannot be expressed in
    /// the output.
    fn emit(&self, artifact: &FactoryArtifact) -> Result<Self::Output, EmitError>;
}

/// Options controlling the emitted tokens.
#[derive(Clone, Debug)]
pub struct EmitOptions {
    runtime_path: Path,
    emit_docs: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            runtime_path: syn::parse_quote!(::lensmith),
            emit_docs: true,
        }
    }
}

impl EmitOptions {
    /// Path of the runtime crate; `::lensmith` by default.
    #[must_use]
    pub fn runtime_path(mut self, runtime_path: Path) -> Self {
        self.runtime_path = runtime_path;
        self
    }

    /// Whether to attach doc comments to the factory and its lenses.
    #[must_use]
    pub const fn emit_docs(mut self, emit_docs: bool) -> Self {
        self.emit_docs = emit_docs;
        self
    }
}

/// Emits a [`TokenStream`] declaring the factory and its lenses.
///
/// # Example
///
/// ```
/// use lensmith_codegen::emit::{Emitter, TokenEmitter};
/// use lensmith_codegen::factory::assemble;
/// use lensmith_codegen::meta::{Capability, FactorySpec, LensSpec, PropertyStep};
///
/// let factory = FactorySpec::builder("model", "PersonLenses")
///     .lens(LensSpec::new(
///         "name",
///         vec![PropertyStep::new("Person", "name", "String")],
///         Capability::Read,
///     ))
///     .build();
///
/// let tokens = TokenEmitter::default().emit(&assemble(&factory).unwrap()).unwrap();
/// assert!(tokens.to_string().contains("pub fn name"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct TokenEmitter {
    options: EmitOptions,
}

impl TokenEmitter {
    /// Creates an emitter with the given options.
    pub const fn new(options: EmitOptions) -> Self {
        Self { options }
    }

    fn emit_lens(
        &self,
        named: &NamedAccessor,
        visibility: &TokenStream,
    ) -> Result<TokenStream, EmitError> {
        let runtime = &self.options.runtime_path;
        let accessor = named.accessor();
        let name = parse_ident(named.name())?;
        let source = parse_type(accessor.source_type())?;
        let target = parse_type(accessor.target_type())?;
        let lens_trait = match accessor.capability() {
            Capability::Read => quote! { #runtime::optics::ReadLens },
            Capability::ReadWrite => quote! { #runtime::optics::ReadWriteLens },
        };
        let body = self.emit_expression(accessor.expression(), accessor.capability())?;
        let doc = self.options.emit_docs.then(|| {
            let text = format!(" Lens `{}`: `{}`.", named.name(), accessor.expression());
            quote! { #[doc = #text] }
        });

        Ok(quote! {
            #doc
            #[inline]
            #[must_use]
            #visibility fn #name() -> impl #lens_trait<#source, #target> + Clone {
                #body
            }
        })
    }

    fn emit_expression(
        &self,
        expression: &AccessorExpr,
        capability: Capability,
    ) -> Result<TokenStream, EmitError> {
        expression.try_fold(
            |access, node_capability| self.emit_primitive(access, node_capability, capability),
            |mut left, right| {
                left.extend(quote! { .and_then });
                left.extend(iter::once(TokenTree::Group(Group::new(
                    Delimiter::Parenthesis,
                    right,
                ))));
                Ok(left)
            },
        )
    }

    fn emit_primitive(
        &self,
        access: &PropertyAccess,
        node_capability: Capability,
        lens_capability: Capability,
    ) -> Result<TokenStream, EmitError> {
        let runtime = &self.options.runtime_path;
        let (source, member) = parse_access(access)?;
        match node_capability {
            Capability::Read if lens_capability.is_writable() => Ok(quote! {
                #runtime::optics::Lenses::field_read_lens(
                    |source: &#source| &source.#member,
                    |source: &mut #source| &mut source.#member,
                )
            }),
            Capability::Read => Ok(quote! {
                #runtime::optics::Lenses::read_lens(|source: &#source| &source.#member)
            }),
            Capability::ReadWrite => {
                let property = parse_type(access.property_type())?;
                Ok(quote! {
                    #runtime::optics::Lenses::read_write_lens(
                        |source: &#source| &source.#member,
                        |source: &mut #source, value: #property| source.#member = value,
                    )
                })
            }
        }
    }
}

impl Emitter for TokenEmitter {
    type Output = TokenStream;

    fn emit(&self, artifact: &FactoryArtifact) -> Result<TokenStream, EmitError> {
        let factory = parse_ident(artifact.factory_name())?;
        let visibility = visibility_tokens(artifact.visibility());
        let lenses = artifact
            .accessors()
            .iter()
            .enumerate()
            .map(|(index, named)| {
                self.emit_lens(named, &visibility)
                    .map_err(|error| EmitError::Lens {
                        index,
                        name: named.name().to_string(),
                        error: Box::new(error),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let doc = self.options.emit_docs.then(|| {
            let text = if artifact.package_id().is_empty() {
                " Generated lens factory.".to_string()
            } else {
                format!(" Generated lens factory for `{}`.", artifact.package_id())
            };
            quote! { #[doc = #text] }
        });

        Ok(quote! {
            #doc
            #visibility enum #factory {}

            impl #factory {
                #(#lenses)*
            }
        })
    }
}

fn visibility_tokens(visibility: Visibility) -> TokenStream {
    match visibility {
        Visibility::Public => quote! { pub },
        Visibility::Crate => quote! { pub(crate) },
        Visibility::Private => TokenStream::new(),
    }
}

fn parse_ident(name: &str) -> Result<Ident, EmitError> {
    syn::parse_str::<Ident>(name).map_err(|_| EmitError::InvalidIdentifier(name.to_string()))
}

fn parse_type(name: &TypeName) -> Result<Type, EmitError> {
    syn::parse_str::<Type>(name.as_str()).map_err(|_| EmitError::InvalidType(name.clone()))
}

fn parse_access(access: &PropertyAccess) -> Result<(Type, Member), EmitError> {
    let source = parse_type(access.source_type())?;
    let member = syn::parse_str::<Member>(access.property_name())
        .map_err(|_| EmitError::InvalidIdentifier(access.property_name().to_string()))?;
    Ok((source, member))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::assemble;
    use crate::meta::{FactorySpec, LensSpec, PropertyStep};

    fn emit(factory: &FactorySpec) -> Result<String, EmitError> {
        let artifact = assemble(factory).unwrap();
        TokenEmitter::default()
            .emit(&artifact)
            .map(|tokens| tokens.to_string())
    }

    fn person_city(capability: Capability) -> FactorySpec {
        FactorySpec::builder("model::people", "PersonLenses")
            .lens(LensSpec::new(
                "city",
                vec![
                    PropertyStep::new("Person", "address", "Address"),
                    PropertyStep::new("Address", "city", "String"),
                ],
                capability,
            ))
            .build()
    }

    #[test]
    fn read_write_lens_navigates_intermediate_steps() {
        let output = emit(&person_city(Capability::ReadWrite)).unwrap();

        assert!(output.contains("ReadWriteLens < Person , String >"));
        assert!(output.contains("field_read_lens"));
        assert!(output.contains("read_write_lens"));
        assert!(output.contains(". and_then ("));
    }

    #[test]
    fn read_lens_uses_getters_only() {
        let output = emit(&person_city(Capability::Read)).unwrap();

        assert!(output.contains("ReadLens < Person , String >"));
        assert!(!output.contains("field_read_lens"));
        assert!(!output.contains("read_write_lens"));
    }

    #[test]
    fn factory_visibility_is_applied() {
        let factory = FactorySpec::new(
            "model",
            "Hidden",
            Visibility::Crate,
            person_city(Capability::Read).lenses().to_vec(),
        );
        let output = emit(&factory).unwrap();
        assert!(output.contains("pub (crate) enum Hidden { }"));
    }

    #[test]
    fn docs_can_be_disabled() {
        let artifact = assemble(&person_city(Capability::Read)).unwrap();
        let output = TokenEmitter::new(EmitOptions::default().emit_docs(false))
            .emit(&artifact)
            .unwrap()
            .to_string();
        assert!(!output.contains("doc"));
    }

    #[test]
    fn runtime_path_can_be_overridden() {
        let artifact = assemble(&person_city(Capability::Read)).unwrap();
        let output = TokenEmitter::new(
            EmitOptions::default().runtime_path(syn::parse_quote!(crate::runtime)),
        )
        .emit(&artifact)
        .unwrap()
        .to_string();
        assert!(output.contains("crate :: runtime :: optics :: Lenses :: read_lens"));
    }

    #[test]
    fn factory_cannot_be_instantiated() {
        let output = emit(&person_city(Capability::Read)).unwrap();

        assert!(output.contains("pub enum PersonLenses { }"));
        assert!(!output.contains("struct"));
        assert!(!output.contains("derive"));
    }

    #[test]
    fn invalid_lens_name_is_rejected() {
        let factory = FactorySpec::builder("model", "Lenses")
            .lens(LensSpec::new(
                "name",
                vec![PropertyStep::new("Person", "name", "String")],
                Capability::Read,
            ))
            .lens(LensSpec::new(
                "not a name",
                vec![PropertyStep::new("Person", "name", "String")],
                Capability::Read,
            ))
            .build();
        assert_eq!(
            emit(&factory),
            Err(EmitError::Lens {
                index: 1,
                name: "not a name".to_string(),
                error: Box::new(EmitError::InvalidIdentifier("not a name".to_string())),
            })
        );
    }

    #[test]
    fn invalid_type_is_rejected() {
        let factory = FactorySpec::builder("model", "Lenses")
            .lens(LensSpec::new(
                "name",
                vec![PropertyStep::new("Person<", "name", "String")],
                Capability::Read,
            ))
            .build();
        assert_eq!(
            emit(&factory),
            Err(EmitError::Lens {
                index: 0,
                name: "name".to_string(),
                error: Box::new(EmitError::InvalidType(TypeName::new("Person<"))),
            })
        );
    }

    #[test]
    fn invalid_factory_name_is_not_tied_to_a_lens() {
        let factory = FactorySpec::builder("model", "Person Lenses").build();
        assert_eq!(
            emit(&factory),
            Err(EmitError::InvalidIdentifier("Person Lenses".to_string()))
        );
    }

    #[test]
    fn long_chains_emit_as_flat_and_then_calls() {
        let length = 60_000;
        let steps = (0..length)
            .map(|index| PropertyStep::new(format!("T{index}"), "next", format!("T{}", index + 1)))
            .collect();
        let factory = FactorySpec::builder("model", "Deep")
            .lens(LensSpec::new("deep", steps, Capability::ReadWrite))
            .build();

        let output = emit(&factory).unwrap();

        assert_eq!(output.matches(". and_then (").count(), length - 1);
        assert_eq!(output.matches("field_read_lens").count(), length - 1);
        assert_eq!(output.matches("read_write_lens").count(), 1);
    }

    #[test]
    fn tuple_fields_are_accessible() {
        let factory = FactorySpec::builder("model", "PairLenses")
            .lens(LensSpec::new(
                "first",
                vec![PropertyStep::new("Pair", "0", "i32")],
                Capability::ReadWrite,
            ))
            .build();
        let output = emit(&factory).unwrap();
        assert!(output.contains("source . 0 = value"));
    }
}
