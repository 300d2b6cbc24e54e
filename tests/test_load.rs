use env_loadr::{ErrorKind, ErrorKinds, LoadErrors, MapSource, Record, load_from};

fn base_env() -> MapSource {
    MapSource::new()
        .with("TEST_ENV_INVALID", "nope")
        .with("TEST_ENVKEY", "1")
        .with("TEST_BASE", "1")
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_load_bool() {
    #[derive(Debug, Default, Record)]
    pub struct Config {
        pub test_base: bool,
        pub optional: Option<bool>,
        #[field(default = "true")]
        pub optional_default: Option<bool>,
        #[field(default = "true")]
        pub default: bool,
        #[field(env = "TEST_ENVKEY")]
        pub env: bool,
    }

    let mut config = Config::default();
    load_from(base_env(), &mut config).unwrap();

    assert!(config.test_base);
    assert_eq!(config.optional, None);
    assert_eq!(config.optional_default, Some(true));
    assert!(config.default);
    assert!(config.env);
}

#[test]
fn test_load_bool_not_found() {
    #[derive(Debug, Default, Record)]
    pub struct Config {
        pub error: bool,
    }

    let err = load_from(base_env(), &mut Config::default()).unwrap_err();
    assert_eq!(err.kinds(), ErrorKinds::from(ErrorKind::NotFound));
    assert!(err.message().contains(r#"via "${ERROR}" (bool)"#));
}

#[test]
fn test_load_bool_parse_errors() {
    #[derive(Debug, Default, Record)]
    pub struct BadDefault {
        #[field(default = "nope")]
        pub error: bool,
    }
    #[derive(Debug, Default, Record)]
    pub struct BadOptionalDefault {
        #[field(default = "nope")]
        pub error: Option<bool>,
    }
    #[derive(Debug, Default, Record)]
    pub struct BadEnv {
        #[field(env = "TEST_ENV_INVALID")]
        pub error: bool,
    }
    #[derive(Debug, Default, Record)]
    pub struct BadOptionalEnv {
        #[field(env = "TEST_ENV_INVALID")]
        pub error: Option<bool>,
    }

    let results = [
        load_from(base_env(), &mut BadDefault::default()),
        load_from(base_env(), &mut BadOptionalDefault::default()),
        load_from(base_env(), &mut BadEnv::default()),
        load_from(base_env(), &mut BadOptionalEnv::default()),
    ];
    for result in results {
        let err = result.unwrap_err();
        assert_eq!(err.kinds(), ErrorKinds::from(ErrorKind::InvalidValue));
        assert!(err.message().contains("as a boolean for loading 'error'"));
    }
}

#[test]
fn test_load_bool_invalid_value_leaves_field_unset() {
    #[derive(Debug, Default, Record)]
    pub struct Config {
        #[field(env = "TEST_ENV_INVALID")]
        pub flag: Option<bool>,
        #[field(env = "TEST_ENV_INVALID")]
        pub strict: bool,
    }

    let mut config = Config {
        flag: None,
        strict: true,
    };
    let err = load_from(base_env(), &mut config).unwrap_err();

    assert_eq!(err.len(), 2);
    assert_eq!(config.flag, None);
    assert!(config.strict);
}

#[test]
fn test_load_int() {
    #[derive(Debug, Default, Record)]
    pub struct Config {
        pub test_base: i64,
        pub optional: Option<i64>,
        #[field(default = "2")]
        pub optional_default: Option<i32>,
        #[field(default = "3")]
        pub default: i16,
        #[field(env = "TEST_ENVKEY")]
        pub env: isize,
        #[field(default = "-12345")]
        pub negative: i64,
    }

    let mut config = Config::default();
    load_from(base_env(), &mut config).unwrap();

    assert_eq!(config.test_base, 1);
    assert_eq!(config.optional, None);
    assert_eq!(config.optional_default, Some(2));
    assert_eq!(config.default, 3);
    assert_eq!(config.env, 1);
    assert_eq!(config.negative, -12345);
}

#[test]
fn test_load_int_not_found() {
    #[derive(Debug, Default, Record)]
    pub struct Config {
        pub error: i32,
    }

    let err = load_from(base_env(), &mut Config::default()).unwrap_err();
    assert_eq!(err.kinds(), ErrorKinds::from(ErrorKind::NotFound));
    assert!(err.message().contains(r#"via "${ERROR}" (int)"#));
}

#[test]
fn test_load_int_parse_errors() {
    #[derive(Debug, Default, Record)]
    pub struct BadDefault {
        #[field(default = "nope")]
        pub error: i64,
    }
    #[derive(Debug, Default, Record)]
    pub struct BadOptionalEnv {
        #[field(env = "TEST_ENV_INVALID")]
        pub error: Option<i64>,
    }
    #[derive(Debug, Default, Record)]
    pub struct OutOfRange {
        #[field(default = "300")]
        pub error: i8,
    }

    for err in [
        load_from(base_env(), &mut BadDefault::default()).unwrap_err(),
        load_from(base_env(), &mut BadOptionalEnv::default()).unwrap_err(),
        load_from(base_env(), &mut OutOfRange::default()).unwrap_err(),
    ] {
        assert_eq!(err.kinds(), ErrorKinds::from(ErrorKind::InvalidValue));
        assert!(err.message().contains("as an int for loading 'error'"));
    }
}

#[test]
fn test_load_string() {
    #[derive(Debug, Default, Record)]
    pub struct Config {
        pub test_base: String,
        pub optional: Option<String>,
        #[field(default = "hi")]
        pub optional_default: Option<String>,
        #[field(default = "hello")]
        pub default: String,
        #[field(env = "TEST_ENVKEY")]
        pub env: String,
        #[field(env = "TEST_ENVKEY")]
        pub env_optional: Option<String>,
        #[field(default = "")]
        pub empty_default: String,
    }

    let mut config = Config::default();
    load_from(base_env(), &mut config).unwrap();

    assert_eq!(config.test_base, "1");
    assert_eq!(config.optional, None);
    assert_eq!(config.optional_default.as_deref(), Some("hi"));
    assert_eq!(config.default, "hello");
    assert_eq!(config.env, "1");
    assert_eq!(config.env_optional.as_deref(), Some("1"));
    assert_eq!(config.empty_default, "");
}

#[test]
fn test_load_string_not_found() {
    #[derive(Debug, Default, Record)]
    pub struct Config {
        pub error: String,
    }

    let err = load_from(base_env(), &mut Config::default()).unwrap_err();
    assert_eq!(err.kinds(), ErrorKinds::from(ErrorKind::NotFound));
}

#[test]
fn test_load_string_list() {
    #[derive(Debug, Default, Record)]
    pub struct Config {
        pub test_base: Vec<String>,
        pub optional: Option<Vec<String>>,
        #[field(default = "hola,mundo")]
        pub optional_default: Option<Vec<String>>,
        #[field(default = "hi hi", delimiter = " ")]
        pub optional_default_delimiter: Option<Vec<String>>,
        #[field(default = "hello")]
        pub default: Vec<String>,
        #[field(env = "TEST_ENVKEY")]
        pub env: Vec<String>,
        #[field(env = "TEST_ENVKEY")]
        pub env_optional: Option<Vec<String>>,
    }

    let mut config = Config::default();
    load_from(base_env(), &mut config).unwrap();

    assert_eq!(config.test_base, strings(&["1"]));
    assert_eq!(config.optional, None);
    assert_eq!(config.optional_default, Some(strings(&["hola", "mundo"])));
    assert_eq!(config.optional_default_delimiter, Some(strings(&["hi", "hi"])));
    assert_eq!(config.default, strings(&["hello"]));
    assert_eq!(config.env, strings(&["1"]));
    assert_eq!(config.env_optional, Some(strings(&["1"])));
}

#[test]
fn test_load_string_list_splitting() {
    #[derive(Debug, Default, Record)]
    pub struct Config {
        pub plain: Vec<String>,
        #[field(delimiter = " ")]
        pub spaced: Vec<String>,
        pub empty: Vec<String>,
        #[field(default = "a|b|c", delimiter = ";")]
        pub overridden: Vec<String>,
    }

    let source = MapSource::new()
        .with("PLAIN", "a,b,c")
        .with("SPACED", " hi hi")
        .with("EMPTY", "")
        .with("OVERRIDDEN", ";x;y;");
    let mut config = Config::default();
    load_from(source, &mut config).unwrap();

    assert_eq!(config.plain, strings(&["a", "b", "c"]));
    assert_eq!(config.spaced, strings(&["hi", "hi"]));
    assert_eq!(config.empty, strings(&[""]));
    // The field's delimiter applies to whichever source supplied the value
    assert_eq!(config.overridden, strings(&["x", "y"]));
}

#[test]
fn test_load_string_list_not_found() {
    #[derive(Debug, Default, Record)]
    pub struct Config {
        pub error: Vec<String>,
    }

    let err = load_from(base_env(), &mut Config::default()).unwrap_err();
    assert_eq!(err.kinds(), ErrorKinds::from(ErrorKind::NotFound));
    assert!(err.message().contains("(string list)"));
}

#[test]
fn test_environment_overrides_default() {
    #[derive(Debug, Default, Record)]
    pub struct Config {
        #[field(default = "false")]
        pub flag: bool,
        #[field(default = "10")]
        pub count: i64,
        #[field(default = "fallback")]
        pub name: String,
        #[field(default = "nope")]
        pub bad_default_good_env: i64,
    }

    let source = MapSource::new()
        .with("FLAG", "T")
        .with("COUNT", "+42")
        .with("NAME", "")
        .with("BAD_DEFAULT_GOOD_ENV", "7");
    let mut config = Config::default();
    load_from(source, &mut config).unwrap();

    assert!(config.flag);
    assert_eq!(config.count, 42);
    assert_eq!(config.name, "");
    assert_eq!(config.bad_default_good_env, 7);
}

#[test]
fn test_multiple_errors_are_aggregated() {
    #[derive(Debug, Default, Record)]
    pub struct Config {
        pub bool: bool,
        #[field(default = "not an int")]
        pub int: i64,
        pub string: String,
        pub float: f32,
        pub present: String,
    }

    let mut config = Config::default();
    let err = load_from(MapSource::new().with("PRESENT", "here"), &mut config).unwrap_err();

    let kinds = err.kinds();
    assert!(kinds.contains(ErrorKind::NotFound));
    assert!(kinds.contains(ErrorKind::InvalidValue));
    assert!(kinds.contains(ErrorKind::InvalidType));
    assert!(!kinds.contains(ErrorKind::Prereqs));
    assert_eq!(err.len(), 4);

    for message in [err.message(), err.to_string()] {
        assert!(message.contains(r#"via "${BOOL}" (bool)"#));
        assert!(message.contains("parse 'not an int' as an int"));
        assert!(message.contains(r#"via "${STRING}" (string)"#));
        assert!(message.contains("of type 'f32'"));
    }

    // Fields after the failures are still bound
    assert_eq!(config.present, "here");
    assert_eq!(config.int, 0);
}

#[test]
fn test_invalid_type_and_not_found() {
    #[derive(Debug, Default, Record)]
    pub struct Config {
        pub ratio: f64,
        pub name: String,
    }

    let err = load_from(MapSource::new(), &mut Config::default()).unwrap_err();

    assert_eq!(err.kinds(), ErrorKind::InvalidType | ErrorKind::NotFound);
    assert_eq!(
        err.code(),
        ErrorKind::InvalidType.bit() | ErrorKind::NotFound.bit()
    );
    assert!(err.message().contains("'ratio'"));
    assert!(err.message().contains("'name'"));
}

#[test]
fn test_unsupported_types_are_never_touched() {
    #[derive(Debug, Default, Record)]
    pub struct Config {
        pub ratio: f32,
        pub nested: Option<Option<bool>>,
        pub ports: Vec<i64>,
    }

    let source = MapSource::new()
        .with("RATIO", "1.5")
        .with("NESTED", "true")
        .with("PORTS", "1,2");
    let mut config = Config::default();
    let err = load_from(source, &mut config).unwrap_err();

    assert_eq!(err.kinds(), ErrorKinds::from(ErrorKind::InvalidType));
    assert_eq!(err.len(), 3);
    assert!(err.message().contains("of type 'Option<Option<bool>>'"));
    assert!(err.message().contains("of type 'Vec<i64>'"));
    assert_eq!(config.ratio, 0.0);
    assert_eq!(config.nested, None);
    assert!(config.ports.is_empty());
}

#[test]
fn test_prerequisites() {
    #[derive(Debug, Default, Record)]
    pub struct Config {
        pub test_base: bool,
    }

    let config = Config::default();
    let err = load_from(base_env(), &config).unwrap_err();
    assert_eq!(err.kinds(), ErrorKinds::from(ErrorKind::Prereqs));
    assert!(err.to_string().contains("valid mutable reference"));
    assert!(!config.test_base);

    let mut text = String::new();
    let err = load_from(base_env(), &mut text).unwrap_err();
    assert_eq!(err.kinds(), ErrorKinds::from(ErrorKind::Prereqs));
    assert!(err.to_string().contains("valid struct"));

    let err = load_from(base_env(), &text).unwrap_err();
    assert_eq!(err.len(), 2);
    assert_eq!(err.kinds(), ErrorKinds::from(ErrorKind::Prereqs));
}

#[test]
fn test_private_and_skipped_fields_are_ignored() {
    #[derive(Debug, Default, Record)]
    pub struct Config {
        pub name: String,
        secret: f32,
        #[field(skip)]
        pub cache: Vec<u8>,
    }

    let mut config = Config::default();
    load_from(MapSource::new().with("NAME", "svc"), &mut config).unwrap();

    assert_eq!(config.name, "svc");
    assert_eq!(config.secret, 0.0);
    assert!(config.cache.is_empty());
}

#[test]
fn test_unit_struct_has_no_fields() {
    #[derive(Debug, Default, Record)]
    pub struct Empty;

    assert!(load_from(MapSource::new(), &mut Empty).is_ok());
}

#[test]
fn test_load_is_idempotent() {
    #[derive(Debug, Default, PartialEq, Record)]
    pub struct Config {
        pub test_base: i64,
        pub missing: String,
        #[field(default = "x;y", delimiter = ";")]
        pub list: Vec<String>,
        pub maybe: Option<bool>,
    }

    let mut first = Config::default();
    let mut second = Config::default();
    let first_result: Result<(), LoadErrors> = load_from(base_env(), &mut first);
    let second_result = load_from(base_env(), &mut second);

    assert_eq!(first, second);
    assert_eq!(first_result, second_result);
}
