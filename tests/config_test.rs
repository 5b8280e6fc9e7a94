use article_digest::config::ConfigLoader;
use article_digest::Error;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

fn write_toml(tmp: &TempDir, name: &str, toml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    if let Err(err) = fs::write(&p, toml) {
        panic!("write toml: {err}");
    }
    p
}

#[test]
fn file_values_reach_options() {
    let Ok(tmp) = TempDir::new() else {
        panic!("temp dir");
    };
    let path = write_toml(
        &tmp,
        "digest.toml",
        r#"
summarization_api_key = "hf_file"
summarization_endpoint = "http://localhost:9999/summarize"
max_input_chars = 2000
short_text_threshold = 120
summarize_timeout_secs = 15
non_article_domains = ["video.example"]
"#,
    );

    let options = ConfigLoader::new().without_env().with_file(&path).load_options();
    match options {
        Ok(options) => {
            assert_eq!(options.api_key(), Some("hf_file"));
            assert_eq!(options.summarization_endpoint, "http://localhost:9999/summarize");
            assert_eq!(options.max_input_chars, 2000);
            assert_eq!(options.short_text_threshold, 120);
            assert_eq!(options.summarize_timeout, Duration::from_secs(15));
            assert_eq!(options.non_article_domains.len(), 1);
            assert!(options.non_article_domains.contains_entry("video.example"));
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn later_sources_override_earlier_ones() {
    let Ok(tmp) = TempDir::new() else {
        panic!("temp dir");
    };
    let base = write_toml(&tmp, "base.toml", "max_input_chars = 1000\nexcerpt_len = 80\n");
    let local = write_toml(&tmp, "local.toml", "max_input_chars = 1500\n");

    let options = ConfigLoader::new()
        .without_env()
        .with_file(&base)
        .with_file(&local)
        .load_options();
    match options {
        Ok(options) => {
            assert_eq!(options.max_input_chars, 1500);
            assert_eq!(options.excerpt_len, 80);
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn optional_file_may_be_missing() {
    let Ok(tmp) = TempDir::new() else {
        panic!("temp dir");
    };
    let options = ConfigLoader::new()
        .without_env()
        .with_optional_file(tmp.path().join("absent.toml"))
        .load_options();
    assert!(options.is_ok_and(|o| o.max_input_chars == 4000));
}

#[test]
fn required_file_must_exist() {
    let Ok(tmp) = TempDir::new() else {
        panic!("temp dir");
    };
    let result = ConfigLoader::new()
        .without_env()
        .with_file(tmp.path().join("absent.toml"))
        .load();
    assert!(matches!(result, Err(Error::Configuration(_))));
}
