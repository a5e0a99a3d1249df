//! Reads HTML from stdin and prints the microformats2 JSON to stdout.
//!
//! Usage: `mf2-stdin [BASE_URL] < page.html`
//!
//! Log output goes to stderr and is controlled by `RUST_LOG`.

use mf2_parser::{parse_bytes, Options};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut html = Vec::new();
    if io::stdin().read_to_end(&mut html).is_err() {
        eprintln!("Failed to read from stdin");
        std::process::exit(1);
    }

    let options = Options {
        base_url: std::env::args().nth(1),
        ..Options::default()
    };

    match parse_bytes(&html, &options).and_then(|result| result.to_json_pretty()) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("Failed to parse: {err}");
            std::process::exit(1);
        }
    }
}
