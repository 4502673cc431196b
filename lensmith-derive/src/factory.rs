//! Implementation of the `lens_factory!` macro.
//!
//! The macro input is the metadata front-end: it is parsed into a
//! [`FactorySpec`], validated, assembled and emitted with
//! `lensmith-codegen`.
//!
//! # Grammar
//!
//! ```text
//! lens_factory! {
//!     #[lens_package = "model::people"]   // optional, recorded in the docs
//!     #[lens_crate = "::lensmith"]        // optional runtime path
//!     pub PersonLenses {
//!         read name = Person.name: String;
//!         read_write city = Person.address: Address, Address.city: String;
//!     }
//! }
//! ```
//!
//! Each step is `SourceType.property: PropertyType`; steps are separated by
//! commas and a lens ends with a semicolon.

use lensmith_codegen::emit::{EmitOptions, Emitter, TokenEmitter};
use lensmith_codegen::error::ValidationError;
use lensmith_codegen::factory::assemble;
use lensmith_codegen::meta::{
    Capability, FactorySpec, LensSpec, PropertyStep, TypeName, Visibility,
};
use lensmith_codegen::validate::validate_factory;
use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::ToTokens;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{
    Attribute, Expr, ExprLit, Ident, Lit, LitStr, Member, Token, Type, braced, parse_macro_input,
};

/// Main implementation of the `lens_factory!` macro.
pub fn lens_factory_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as FactoryInput);

    TokenStream::from(expand(&input).unwrap_or_else(syn::Error::into_compile_error))
}

/// Parsed macro input.
pub struct FactoryInput {
    package: Option<LitStr>,
    runtime: Option<syn::Path>,
    visibility: syn::Visibility,
    name: Ident,
    lenses: Vec<LensDecl>,
}

/// One `read`/`read_write` declaration.
struct LensDecl {
    capability: Capability,
    name: Ident,
    steps: Punctuated<StepDecl, Token![,]>,
}

/// `SourceType.property: PropertyType`
struct StepDecl {
    source_type: Type,
    property: Member,
    property_type: Type,
}

impl Parse for FactoryInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attributes = input.call(Attribute::parse_outer)?;
        let mut package = None;
        let mut runtime = None;
        for attribute in attributes {
            if attribute.path().is_ident("lens_package") {
                package = Some(string_value(&attribute)?);
            } else if attribute.path().is_ident("lens_crate") {
                runtime = Some(string_value(&attribute)?.parse::<syn::Path>()?);
            } else {
                return Err(syn::Error::new_spanned(
                    attribute,
                    "lens_factory! only accepts #[lens_package = \"..\"] and #[lens_crate = \"..\"]",
                ));
            }
        }

        let visibility = input.parse()?;
        let name = input.parse()?;
        let content;
        braced!(content in input);
        let mut lenses = Vec::new();
        while !content.is_empty() {
            lenses.push(content.parse()?);
        }

        Ok(Self {
            package,
            runtime,
            visibility,
            name,
            lenses,
        })
    }
}

impl Parse for LensDecl {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let keyword: Ident = input.parse()?;
        let capability = match keyword.to_string().as_str() {
            "read" => Capability::Read,
            "read_write" => Capability::ReadWrite,
            _ => {
                return Err(syn::Error::new(
                    keyword.span(),
                    "expected `read` or `read_write`",
                ));
            }
        };
        let name = input.parse()?;
        input.parse::<Token![=]>()?;

        let mut steps = Punctuated::new();
        loop {
            steps.push_value(input.parse()?);
            if input.peek(Token![;]) {
                break;
            }
            steps.push_punct(input.parse()?);
        }
        input.parse::<Token![;]>()?;

        Ok(Self {
            capability,
            name,
            steps,
        })
    }
}

impl Parse for StepDecl {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let source_type = input.parse()?;
        input.parse::<Token![.]>()?;
        let property = input.parse()?;
        input.parse::<Token![:]>()?;
        let property_type = input.parse()?;

        Ok(Self {
            source_type,
            property,
            property_type,
        })
    }
}

fn string_value(attribute: &Attribute) -> syn::Result<LitStr> {
    match &attribute.meta.require_name_value()?.value {
        Expr::Lit(ExprLit {
            lit: Lit::Str(value),
            ..
        }) => Ok(value.clone()),
        other => Err(syn::Error::new_spanned(other, "expected a string literal")),
    }
}

fn type_name(ty: &Type) -> TypeName {
    TypeName::new(ty.to_token_stream().to_string())
}

fn property_name(member: &Member) -> String {
    match member {
        Member::Named(ident) => ident.to_string(),
        Member::Unnamed(index) => index.index.to_string(),
    }
}

fn visibility(visibility: &syn::Visibility) -> syn::Result<Visibility> {
    match visibility {
        syn::Visibility::Public(_) => Ok(Visibility::Public),
        syn::Visibility::Inherited => Ok(Visibility::Private),
        syn::Visibility::Restricted(restricted) if restricted.path.is_ident("crate") => {
            Ok(Visibility::Crate)
        }
        syn::Visibility::Restricted(restricted) => Err(syn::Error::new_spanned(
            restricted,
            "lens factories support `pub`, `pub(crate)` or private visibility",
        )),
    }
}

impl FactoryInput {
    /// Builds the metadata model from the parsed declarations.
    fn to_spec(&self) -> syn::Result<FactorySpec> {
        let lenses = self
            .lenses
            .iter()
            .map(|lens| {
                let steps = lens
                    .steps
                    .iter()
                    .map(|step| {
                        PropertyStep::new(
                            type_name(&step.source_type),
                            property_name(&step.property),
                            type_name(&step.property_type),
                        )
                    })
                    .collect();
                LensSpec::new(lens.name.to_string(), steps, lens.capability)
            })
            .collect();

        Ok(FactorySpec::new(
            self.package.as_ref().map(LitStr::value).unwrap_or_default(),
            self.name.to_string(),
            visibility(&self.visibility)?,
            lenses,
        ))
    }

    fn lens_span(&self, index: usize) -> Span {
        self.lenses
            .get(index)
            .map_or_else(Span::call_site, |lens| lens.name.span())
    }
}

/// Validates, assembles and emits the factory.
pub fn expand(input: &FactoryInput) -> syn::Result<TokenStream2> {
    let spec = input.to_spec()?;

    validate_factory(&spec).map_err(|error| {
        let index = match &error {
            ValidationError::Lens { index, .. } => *index,
            ValidationError::DuplicateLensName {
                duplicate_index, ..
            } => *duplicate_index,
        };
        syn::Error::new(input.lens_span(index), error.to_string())
    })?;

    let artifact = assemble(&spec)
        .map_err(|error| syn::Error::new(input.lens_span(error.index), error.to_string()))?;

    let options = input
        .runtime
        .clone()
        .map_or_else(EmitOptions::default, |path| {
            EmitOptions::default().runtime_path(path)
        });

    TokenEmitter::new(options).emit(&artifact).map_err(|error| {
        let span = error
            .lens_index()
            .map_or_else(|| input.name.span(), |index| input.lens_span(index));
        syn::Error::new(span, error.to_string())
    })
}
