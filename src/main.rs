#![allow(non_snake_case)]
use RustedTermCollector::Examples::collect_examples::collect_examples;
use RustedTermCollector::Utils::config::CollectorConfig;
use RustedTermCollector::Utils::logger::init_logger;
use std::env;
use std::path::Path;

fn main() {
    // optional path to a TOML config as the first argument
    let config = match env::args().nth(1) {
        Some(path) => match CollectorConfig::from_file(Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}, running with defaults", e);
                CollectorConfig::default()
            }
        },
        None => CollectorConfig::default(),
    };
    if let Err(e) = init_logger(config.log_level, config.log_file.as_deref()) {
        eprintln!("{}", e);
    }

    for example in 0..5 {
        println!("\n example {}", example);
        collect_examples(example);
    }
}
