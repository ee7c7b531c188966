//! Property-based tests using proptest
//!
//! URL validation and report file naming are exercised with generated
//! input, plus a handful of generated command lines against the binary.

use assert_cmd::prelude::*;
use fpa::reporting::derive_file_stem;
use fpa::validation::is_valid_url;
use proptest::prelude::*;
use std::process::Command;

const NAME: &str = "frontend-performance-analyzer";

/// Generate well-formed http(s) URLs
fn web_url_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::collection::vec("[a-z]{3,10}", 1..4)
            .prop_map(|parts| format!("https://{}.com", parts.join("."))),
        (r"[a-z]{3,8}", 1024..65535u16)
            .prop_map(|(domain, port)| format!("http://{domain}:{port}")),
        (r"[a-z]{3,8}", prop::collection::vec(r"[a-z0-9]{1,8}", 0..4)).prop_map(
            |(domain, path_parts)| format!("https://{domain}.org/{}", path_parts.join("/"))
        ),
        (r"[a-z]{3,8}", r"[a-z]{1,8}", r"[a-z0-9]{1,8}").prop_map(|(domain, key, value)| {
            format!("https://{domain}.io/?{key}={value}")
        }),
        Just("http://localhost".to_string()),
        Just("https://127.0.0.1:8080/".to_string()),
    ]
}

/// URLs whose scheme is not http or https
fn foreign_scheme_strategy() -> impl Strategy<Value = String> {
    (
        prop_oneof![
            Just("ftp"),
            Just("file"),
            Just("ws"),
            Just("mailto"),
            Just("javascript")
        ],
        r"[a-z]{3,8}",
    )
        .prop_map(|(scheme, host)| format!("{scheme}://{host}.com"))
}

proptest! {
    #[test]
    fn test_generated_web_urls_are_valid(url in web_url_strategy()) {
        prop_assert!(is_valid_url(&url), "rejected {}", url);
    }

    #[test]
    fn test_foreign_schemes_are_rejected(url in foreign_scheme_strategy()) {
        prop_assert!(!is_valid_url(&url), "accepted {}", url);
    }

    #[test]
    fn test_arbitrary_text_never_panics(text in ".{0,64}") {
        let _ = is_valid_url(&text);
    }

    #[test]
    fn test_file_stem_is_filesystem_safe(url in prop_oneof![web_url_strategy(), ".{0,64}"]) {
        let stem = derive_file_stem(&url);
        prop_assert!(stem.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    }

    #[test]
    fn test_file_stem_drops_only_the_scheme(url in web_url_strategy()) {
        let stem = derive_file_stem(&url);
        let rest = url.split_once("://").map(|(_, rest)| rest).unwrap_or(&url);
        prop_assert_eq!(stem.chars().count(), rest.chars().count());
    }

    #[test]
    fn test_file_stem_is_idempotent(url in web_url_strategy()) {
        let stem = derive_file_stem(&url);
        prop_assert_eq!(derive_file_stem(&stem), stem);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn test_binary_rejects_foreign_schemes(url in foreign_scheme_strategy()) {
        let mut cmd = Command::cargo_bin(NAME).unwrap();
        cmd.args(["--no-config", "--url", &url]);

        let output = cmd.output().unwrap();
        prop_assert!(!output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        prop_assert!(stderr.contains("Invalid URL format"), "stderr: {}", stderr);
    }

    #[test]
    fn test_binary_rejects_thresholds_out_of_range(threshold in 100.5f64..1000.0) {
        let mut cmd = Command::cargo_bin(NAME).unwrap();
        cmd.args(["--no-config", "--url", "https://example.com", "--threshold"])
            .arg(threshold.to_string());

        cmd.assert().failure();
    }
}
