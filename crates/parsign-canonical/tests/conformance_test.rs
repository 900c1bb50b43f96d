//! Conformance suite
//!
//! Re-derives the canonical string and signature for every fixture under
//! fixtures/v1 and compares against the golden files written by
//! tools/generate-fixtures.

use parsign_canonical::{canonical_string, sign};
use parsign_core::{ParameterSet, SigningConfig};
use serde_json::Value;
use std::fs;
use std::path::Path;

const FIXTURES_DIR: &str = "../../fixtures/v1";

fn fixtures() -> Vec<(String, String, ParameterSet)> {
    let dir = Path::new(FIXTURES_DIR).join("params");
    let mut entries: Vec<_> = fs::read_dir(&dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map(|x| x == "json").unwrap_or(false))
        .collect();
    entries.sort_by_key(|e| e.path());

    entries
        .into_iter()
        .map(|e| {
            let path = e.path();
            let name = path.file_stem().unwrap().to_string_lossy().to_string();
            let json: Value =
                serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

            let secret = json["secret"].as_str().unwrap().to_string();
            let params = ParameterSet::from_json(&json["params"])
                .unwrap_or_else(|e| panic!("Bad fixture {}: {}", name, e));

            (name, secret, params)
        })
        .collect()
}

#[test]
fn test_fixtures_present() {
    assert!(!fixtures().is_empty(), "no fixtures under {}", FIXTURES_DIR);
}

#[test]
fn test_canonical_strings_match_golden() {
    let config = SigningConfig::default();

    for (name, secret, params) in fixtures() {
        let canonical = canonical_string(&params, Some(&secret), &config);

        let golden_path = format!("{}/canonical/{}.txt", FIXTURES_DIR, name);
        let golden = fs::read_to_string(&golden_path)
            .unwrap_or_else(|e| panic!("Missing golden file: {}: {}", golden_path, e));

        assert_eq!(
            canonical, golden,
            "Canonical string mismatch for {}",
            name
        );

        println!("Canonical matches: {}", name);
    }
}

#[test]
fn test_signatures_match_golden() {
    let config = SigningConfig::default();

    for (name, secret, params) in fixtures() {
        let signature = sign(&params, Some(&secret), &config);

        let golden_path = format!("{}/canonical/{}.sig", FIXTURES_DIR, name);
        let expected = fs::read_to_string(&golden_path)
            .unwrap_or_else(|e| panic!("Missing signature file: {}: {}", golden_path, e))
            .trim()
            .to_string();

        assert_eq!(
            signature, expected,
            "Signature mismatch for {}\nGot: {}\nExpected: {}",
            name, signature, expected
        );

        println!("Signature matches: {}", name);
    }
}

#[test]
fn test_fixture_signatures_are_uppercase_md5() {
    for (name, _, _) in fixtures() {
        let golden_path = format!("{}/canonical/{}.sig", FIXTURES_DIR, name);
        let sig = fs::read_to_string(&golden_path).unwrap().trim().to_string();

        assert_eq!(sig.len(), 32, "{}", name);
        assert!(
            sig.bytes()
                .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase()),
            "{} is not uppercase hex",
            name
        );
    }
}
