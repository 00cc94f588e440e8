pub mod api;
pub mod codeforces;
pub mod contests;
pub mod dashboard;
pub mod problems;
pub mod rank;
pub mod session;
pub mod study_plan;

pub use api::{ParamValue, ToParams};
pub use cf_dashboard_derive::ToParams;

#[cfg(test)]
mod test {
    use crate::api::{ParamValue, ToParams};
    use cf_dashboard_derive::ToParams;

    #[derive(ToParams)]
    struct MyRequest {
        handle: String,
        #[param(rename = "from")]
        first: u32,
        count: Option<u32>,
        #[param(join = ",")]
        tags: Vec<String>,
        #[param(rename = "problemsetName")]
        problemset_name: Option<String>,
        gym: bool,
    }

    #[test]
    fn test_to_params() {
        let request = MyRequest {
            handle: String::from("tourist"),
            first: 1,
            count: None,
            tags: vec![String::from("dp"), String::from("greedy")],
            problemset_name: Some(String::from("acmsguru")),
            gym: false,
        };

        let expected = vec![
            ("handle", ParamValue::Str(String::from("tourist"))),
            ("from", ParamValue::Int(1)),
            ("tags", ParamValue::Str(String::from("dp,greedy"))),
            ("problemsetName", ParamValue::Str(String::from("acmsguru"))),
            ("gym", ParamValue::Bool(false)),
        ];
        assert_eq!(request.to_params(), expected);
    }

    #[derive(ToParams)]
    struct Handles {
        handles: Vec<String>,
    }

    #[test]
    fn test_vec_default_separator() {
        let request = Handles {
            handles: vec![String::from("tourist"), String::from("Petr")],
        };
        assert_eq!(
            request.to_params(),
            vec![("handles", ParamValue::Str(String::from("tourist;Petr")))]
        );
    }

    #[derive(ToParams)]
    struct Empty {}

    #[test]
    fn test_empty_struct() {
        assert!(Empty {}.to_params().is_empty());
    }
}
