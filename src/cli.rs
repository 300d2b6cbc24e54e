use env_loadr::{Record, format_load_errors};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, Serialize, Record)]
#[serde(rename_all = "PascalCase")]
pub struct DemoConfiguration {
    pub optional_bool: Option<bool>,
    #[field(env = "CUSTOM_BOOL")]
    pub optional_bool_with_custom_env: Option<bool>,
    pub optional_int: Option<i64>,
    pub optional_string: Option<String>,
    pub optional_string_list: Option<Vec<String>>,
    pub required_bool: bool,
    #[field(default = "true")]
    pub required_bool_with_default: bool,
    pub required_int: i64,
    #[field(default = "-12345")]
    pub required_int_with_default: i64,
    pub required_string: String,
    #[field(default = "required-string")]
    pub required_string_with_default: String,
    pub required_string_list: Vec<String>,
    #[field(default = "required,string,list")]
    pub required_string_list_with_default: Vec<String>,
    #[field(default = "required|string|list", delimiter = "|")]
    pub required_string_list_with_default_and_delimiter: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = std::env::args().nth(1) {
        if let Err(e) = dotenvy::from_filename(&path) {
            eprintln!("✗ Failed to read {}: {}", path, e);
            std::process::exit(2);
        }
    }

    let mut configuration = DemoConfiguration::default();
    let result = env_loadr::load(&mut configuration);

    match serde_json::to_string_pretty(&configuration) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("✗ Failed to render configuration: {}", e),
    }

    if let Err(errors) = result {
        eprintln!("{}", format_load_errors(&errors));
        std::process::exit(1);
    }
}
