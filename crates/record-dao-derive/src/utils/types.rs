// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Type inspection helpers.
//!
//! Detection is syntactic: a type is optional when its last path segment is
//! `Option` with exactly one type argument. Aliases of `Option` are not seen
//! through.

use syn::{GenericArgument, PathArguments, Type};

/// Inner type of `Option<T>`, or `None` for any other type.
///
/// # Example
///
/// ```rust,ignore
/// let ty: Type = parse_quote!(Option<i64>);
/// assert_eq!(option_inner(&ty), Some(&parse_quote!(i64)));
/// ```
pub fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match (args.args.len(), args.args.first()) {
        (1, Some(GenericArgument::Type(inner))) => Some(inner),
        _ => None
    }
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;

    #[test]
    fn unwraps_option() {
        let ty: Type = parse_quote!(Option<i64>);
        let inner: Type = parse_quote!(i64);
        assert_eq!(option_inner(&ty), Some(&inner));
    }

    #[test]
    fn unwraps_qualified_option() {
        let ty: Type = parse_quote!(std::option::Option<String>);
        let inner: Type = parse_quote!(String);
        assert_eq!(option_inner(&ty), Some(&inner));
    }

    #[test]
    fn plain_types_are_not_optional() {
        assert!(option_inner(&parse_quote!(i64)).is_none());
        assert!(option_inner(&parse_quote!(Vec<i64>)).is_none());
        assert!(option_inner(&parse_quote!(&'static str)).is_none());
    }
}
