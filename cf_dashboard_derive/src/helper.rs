use syn::{
    AngleBracketedGenericArguments, Attribute, Data, Fields, FieldsNamed, GenericArgument, LitStr,
    Path, PathArguments, PathSegment, Type, TypePath,
};

/// Options collected from the `#[param(...)]` attributes of a field.
#[derive(Default)]
pub struct ParamOptions {
    pub rename: Option<String>,
    pub join: Option<String>,
}

pub fn parse_param_options(attrs: &[Attribute]) -> syn::Result<ParamOptions> {
    let mut options = ParamOptions::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("param")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                options.rename = Some(value.value());
                Ok(())
            } else if meta.path.is_ident("join") {
                let value: LitStr = meta.value()?.parse()?;
                options.join = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported param attribute, expected `rename` or `join`"))
            }
        })?;
    }

    Ok(options)
}

pub fn is_vec(ty: &Type) -> bool {
    is_contained_by(ty, "Vec")
}

pub fn is_option(ty: &Type) -> bool {
    is_contained_by(ty, "Option")
}

pub fn is_contained_by<T: AsRef<str>>(ty: &Type, container_type: T) -> bool {
    let container_type = container_type.as_ref();
    extract_last_path_segment(ty)
        .map(|path_seg| path_seg.ident == container_type)
        .unwrap_or(false)
}

pub fn unwrap_option(ty: &Type) -> &Type {
    unwrap_generic_type(ty, "Option")
}

pub fn unwrap_generic_type<T: AsRef<str>>(ty: &Type, container_type: T) -> &Type {
    let container_type = container_type.as_ref();
    extract_last_path_segment(ty)
        .and_then(|path_seg| {
            if path_seg.ident != container_type {
                return None;
            }
            match path_seg.arguments {
                PathArguments::AngleBracketed(AngleBracketedGenericArguments { ref args, .. }) => {
                    args.first().and_then(|a| match a {
                        GenericArgument::Type(ref inner_ty) => Some(inner_ty),
                        _ => None,
                    })
                }
                _ => None,
            }
        })
        .unwrap_or(ty)
}

pub fn extract_last_path_segment(ty: &Type) -> Option<&PathSegment> {
    match ty {
        Type::Path(TypePath {
            path: Path { segments: ref seg, .. },
            ..
        }) => seg.last(),
        _ => None,
    }
}

pub fn extract_fields(data: &Data) -> &FieldsNamed {
    match *data {
        Data::Struct(ref data) => match data.fields {
            Fields::Named(ref fields) => fields,
            _ => panic!("all fields must be named."),
        },
        _ => panic!("struct expected, but got other item."),
    }
}
