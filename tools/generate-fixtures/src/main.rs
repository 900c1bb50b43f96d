//! Generate golden fixtures for parsign conformance testing
//!
//! Reads every fixture under fixtures/v1/params ({"secret": ..., "params":
//! {...}}), derives its canonical string and signature with the reference
//! backend config, and writes them next to the inputs. Run from the
//! workspace root after changing the serializer or adding fixtures.

use parsign_canonical::{canonical_string, sign};
use parsign_core::{ParameterSet, SigningConfig};
use serde_json::Value;
use std::fs;
use std::path::Path;

fn main() {
    let fixtures_dir = Path::new("fixtures/v1");
    let params_dir = fixtures_dir.join("params");
    let canonical_dir = fixtures_dir.join("canonical");

    println!("Generating canonical fixtures...");
    println!();

    let config = SigningConfig::default();
    let mut count = 0;

    for entry in fs::read_dir(&params_dir).expect("Failed to read params directory") {
        let path = entry.expect("Failed to read entry").path();

        if path.extension().map(|e| e == "json").unwrap_or(false) {
            let filename = path.file_stem().unwrap().to_str().unwrap();
            let json = fs::read_to_string(&path)
                .unwrap_or_else(|_| panic!("Failed to read {}.json", filename));

            let fixture: Value = serde_json::from_str(&json)
                .unwrap_or_else(|_| panic!("Failed to parse {}.json", filename));
            let secret = fixture["secret"]
                .as_str()
                .unwrap_or_else(|| panic!("Missing secret in {}.json", filename));
            let params = ParameterSet::from_json(&fixture["params"])
                .unwrap_or_else(|e| panic!("Bad params in {}.json: {}", filename, e));

            // Canonical string
            let canonical = canonical_string(&params, Some(secret), &config);
            let canonical_path = canonical_dir.join(format!("{}.txt", filename));
            fs::write(&canonical_path, &canonical)
                .unwrap_or_else(|_| panic!("Failed to write {}.txt", filename));
            println!("  Generated: canonical/{}.txt", filename);

            // Signature
            let signature = sign(&params, Some(secret), &config);
            let sig_path = canonical_dir.join(format!("{}.sig", filename));
            fs::write(&sig_path, &signature)
                .unwrap_or_else(|_| panic!("Failed to write {}.sig", filename));
            println!("  Generated: canonical/{}.sig", filename);

            count += 1;
        }
    }

    println!();
    println!("Done! Generated {} fixture pairs.", count);
}
