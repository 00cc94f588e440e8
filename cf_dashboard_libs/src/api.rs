use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Binding of a request struct to the query parameters of a remote call.
///
/// Usually derived with `#[derive(ToParams)]`.
pub trait ToParams {
    fn to_params(&self) -> Vec<(&'static str, ParamValue)>;
}

/// Primitive value of a query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParamValue::Str(value) => write!(f, "{}", value),
            ParamValue::Int(value) => write!(f, "{}", value),
            ParamValue::Bool(value) => write!(f, "{}", value),
        }
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    ParamValue::Int(value as i64)
                }
            }
        )*
    };
}

impl_from_integer!(i32, i64, u32, u16, u8);

/// Render `(name, value)` pairs into the string pairs sent as a query string.
pub fn to_query_pairs(params: &[(impl ToString, ParamValue)]) -> Vec<(String, String)> {
    params
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Parse a base URL so that relative method names are joined below its path.
///
/// `https://codeforces.com/api` joined with `user.info` must give
/// `https://codeforces.com/api/user.info`, which needs the trailing slash.
pub fn parse_base_url(base_url: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(base_url)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_param_value_display() {
        assert_eq!(ParamValue::from("tourist").to_string(), "tourist");
        assert_eq!(ParamValue::from(15u32).to_string(), "15");
        assert_eq!(ParamValue::from(false).to_string(), "false");
    }

    #[test]
    fn test_to_query_pairs() {
        let params = vec![
            ("handle", ParamValue::from("tourist")),
            ("from", ParamValue::from(1)),
            ("gym", ParamValue::from(true)),
        ];
        let expected = vec![
            (String::from("handle"), String::from("tourist")),
            (String::from("from"), String::from("1")),
            (String::from("gym"), String::from("true")),
        ];
        assert_eq!(to_query_pairs(&params), expected);
    }

    #[test]
    fn test_parse_base_url_appends_slash() {
        let url = parse_base_url("https://codeforces.com/api").unwrap();
        assert_eq!(url.as_str(), "https://codeforces.com/api/");
        assert_eq!(
            url.join("user.info").unwrap().as_str(),
            "https://codeforces.com/api/user.info"
        );

        let url = parse_base_url("https://codeforces.com/api/").unwrap();
        assert_eq!(url.as_str(), "https://codeforces.com/api/");
    }

    #[test]
    fn test_parse_base_url_rejects_garbage() {
        assert!(parse_base_url("not a url").is_err());
    }
}
