//! Dump the OpenAPI document for client generation and CI diffing.

use backend::doc::ApiDoc;
use utoipa::OpenApi;

fn main() {
    match ApiDoc::openapi().to_pretty_json() {
        Ok(doc) => println!("{doc}"),
        Err(error) => {
            eprintln!("failed to render the OpenAPI document: {error}");
            std::process::exit(1);
        }
    }
}
