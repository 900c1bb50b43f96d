//! CLI integration tests using assert_cmd

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const SECRET: &str = "e2ffab74c3d1f8477a801a7377b66125";

fn parsign_cmd() -> Command {
    Command::cargo_bin("parsign").unwrap()
}

fn params_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

fn signup_example_file() -> NamedTempFile {
    params_file(
        r#"{
            "activity_id": 673123,
            "fromId": 6,
            "inviteId": 0,
            "random": "482910",
            "timestamp": "1700000000"
        }"#,
    )
}

mod sign {
    use super::*;

    #[test]
    fn test_sign_documented_example() {
        let file = signup_example_file();

        parsign_cmd()
            .arg("sign")
            .arg(file.path())
            .arg("--secret")
            .arg(SECRET)
            .assert()
            .success()
            .stdout(predicate::str::contains("5A5CE2AEB5C34D0CC96A743DF11A38E1"));
    }

    #[test]
    fn test_sign_lowercase() {
        let file = signup_example_file();

        parsign_cmd()
            .arg("sign")
            .arg(file.path())
            .arg("--secret")
            .arg(SECRET)
            .arg("--lowercase")
            .assert()
            .success()
            .stdout(predicate::str::contains("5a5ce2aeb5c34d0cc96a743df11a38e1"));
    }

    #[test]
    fn test_sign_show_canonical() {
        let file = signup_example_file();

        parsign_cmd()
            .arg("sign")
            .arg(file.path())
            .arg("--secret")
            .arg(SECRET)
            .arg("--show-canonical")
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "activity_id=673123&fromId=6&inviteId=0&random=482910",
            ));
    }

    #[test]
    fn test_sign_nonexistent_file() {
        parsign_cmd()
            .arg("sign")
            .arg("nonexistent.json")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to read file"));
    }

    #[test]
    fn test_sign_rejects_nested_values() {
        let file = params_file(r#"{"tags": ["a", "b"]}"#);

        parsign_cmd()
            .arg("sign")
            .arg(file.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("parameter set"));
    }
}

mod canonicalize {
    use super::*;

    #[test]
    fn test_canonicalize_sorts_and_injects_secret() {
        let file = params_file(
            r#"{"username": "test", "password": "pass", "timestamp": "1000"}"#,
        );

        parsign_cmd()
            .arg("canonicalize")
            .arg(file.path())
            .arg("--secret")
            .arg("ABC123")
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "password=pass&secret=ABC123&timestamp=1000&username=test",
            ));
    }

    #[test]
    fn test_canonicalize_without_secret() {
        let file = params_file(r#"{"b": "2", "a": "1"}"#);

        parsign_cmd()
            .arg("canonicalize")
            .arg(file.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("a=1&b=2"));
    }
}

mod digest {
    use super::*;

    #[test]
    fn test_digest_text() {
        parsign_cmd()
            .arg("digest")
            .arg("abc")
            .assert()
            .success()
            .stdout(predicate::str::contains("900150983cd24fb0d6963f7d28e17f72"));
    }

    #[test]
    fn test_digest_empty_string() {
        parsign_cmd()
            .arg("digest")
            .arg("")
            .assert()
            .success()
            .stdout(predicate::str::contains("d41d8cd98f00b204e9800998ecf8427e"));
    }

    #[test]
    fn test_digest_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"abc").unwrap();

        parsign_cmd()
            .arg("digest")
            .arg("--file")
            .arg(file.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("900150983cd24fb0d6963f7d28e17f72"));
    }

    #[test]
    fn test_digest_requires_input() {
        parsign_cmd()
            .arg("digest")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Provide TEXT or --file"));
    }
}

mod verify {
    use super::*;

    #[test]
    fn test_verify_accepts_valid_signature() {
        let file = signup_example_file();

        parsign_cmd()
            .arg("verify")
            .arg(file.path())
            .arg("--signature")
            .arg("5A5CE2AEB5C34D0CC96A743DF11A38E1")
            .arg("--secret")
            .arg(SECRET)
            .assert()
            .success()
            .stdout(predicate::str::contains("Signature OK"));
    }

    #[test]
    fn test_verify_rejects_wrong_signature() {
        let file = signup_example_file();

        parsign_cmd()
            .arg("verify")
            .arg(file.path())
            .arg("--signature")
            .arg("00000000000000000000000000000000")
            .arg("--secret")
            .arg(SECRET)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Signature mismatch"));
    }

    #[test]
    fn test_verify_rejects_wrong_case() {
        let file = signup_example_file();

        // Uppercase is authoritative for the default config
        parsign_cmd()
            .arg("verify")
            .arg(file.path())
            .arg("--signature")
            .arg("5a5ce2aeb5c34d0cc96a743df11a38e1")
            .arg("--secret")
            .arg(SECRET)
            .assert()
            .failure();
    }
}
