//! Reads HTML from stdin and writes the extraction result as JSON to stdout.
//! No network access; useful for batch evaluation scripts.
//!
//! Exit status is 0 on success, 1 when stdin cannot be read and 2 when the
//! page has no usable content. Errors go to stderr and nothing is printed
//! to stdout.

use std::io::{self, Read};
use std::process::ExitCode;

use article_digest::{extract_bytes, Error};
use serde::Serialize;

#[derive(Serialize)]
struct Output {
    title: String,
    excerpt: String,
    main_content: String,
    word_count: usize,
    reading_time_minutes: usize,
}

fn main() -> ExitCode {
    let mut html = Vec::new();
    if let Err(err) = io::stdin().read_to_end(&mut html) {
        eprintln!("error: failed to read from stdin: {err}");
        return ExitCode::FAILURE;
    }

    let result = match extract_bytes(&html) {
        Ok(result) => result,
        Err(err @ Error::NoContent { .. }) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let output = Output {
        title: result.title,
        excerpt: result.excerpt,
        main_content: result.content,
        word_count: result.word_count,
        reading_time_minutes: result.reading_time_minutes,
    };
    match serde_json::to_string(&output) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
