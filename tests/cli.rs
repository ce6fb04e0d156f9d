//! Integration test suite for the `jt` CLI
use assert_cmd::Command;

/// Helper function to run the `main` binary with the given arguments and return a
/// [`assert_cmd::assert::Assert`].
fn run_main(args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("jt").expect("Failed to find main binary");
    cmd.args(args);
    cmd.assert()
}

/// Run the binary with `stdin` piped in.
fn run_with_stdin(args: &[&str], stdin: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("jt").expect("Failed to find main binary");
    cmd.args(args).write_stdin(stdin);
    cmd.assert()
}

fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8(assert.get_output().stdout.clone())
        .expect("Invalid UTF-8 output")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn pretty_prints_file() {
        let assert = run_main(&["tests/data/simple.json"]).success().code(0);
        let output_str = stdout_of(&assert);

        let output_json: Value = serde_json::from_str(output_str.trim())
            .expect("Failed to parse output JSON");
        let expected_json: Value = serde_json::from_str(
            &std::fs::read_to_string("tests/data/simple.json").unwrap(),
        )
        .unwrap();
        assert_eq!(output_json, expected_json);
        assert!(output_str.contains("\n  \"name\": \"John Doe\","));
    }

    #[test]
    fn compact_from_stdin_keeps_order_and_literals() {
        let assert = run_with_stdin(
            &["--compact"],
            "{ \"z\": 1.50, \"a\": [ {} , [] ] }",
        )
        .success();
        assert_eq!(stdout_of(&assert), "{\"z\":1.50,\"a\":[{},[]]}\n");
    }

    #[test]
    fn depth_flag() {
        let assert =
            run_main(&["--depth", "--compact", "tests/data/simple.json"])
                .success();
        let output_str = stdout_of(&assert);
        assert_eq!(output_str.lines().next(), Some("Depth: 3"));
    }

    #[test]
    fn parse_error_reports_position() {
        let assert = run_main(&["tests/data/invalid.json"]).failure().code(1);
        let stderr = String::from_utf8(assert.get_output().stderr.clone())
            .expect("Invalid UTF-8 output");
        assert!(stderr.contains("Failed to parse JSON"), "{stderr}");
        assert!(
            stderr.contains("expected value, found ',' at line 3, offset 33"),
            "{stderr}"
        );
    }

    #[test]
    fn tokens_flag_lists_tokens() {
        let assert = run_with_stdin(&["--tokens"], "[1, GET]").success();
        let output_str = stdout_of(&assert);
        let lines: Vec<&str> = output_str.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].contains("LeftBracket"));
        assert!(lines[3].contains("Get"));
        assert!(lines[5].contains("Eof"));
    }

    #[test]
    fn tokens_flag_does_not_fail_on_bad_input() {
        run_with_stdin(&["--tokens"], "{ @ }").success();
    }

    #[test]
    fn max_depth_flag() {
        run_with_stdin(&["--max-depth", "2"], "[[1]]").success();
        run_with_stdin(&["--max-depth", "1"], "[[1]]").failure().code(1);
    }

    #[test]
    fn max_depth_is_capped() {
        run_with_stdin(&["--max-depth", "1024"], "[[1]]").success();
        let assert = run_with_stdin(&["--max-depth", "1000000"], "[[1]]")
            .failure()
            .code(2);
        let stderr = String::from_utf8(assert.get_output().stderr.clone())
            .expect("Invalid UTF-8 output");
        assert!(stderr.contains("exceeds the maximum of 1024"), "{stderr}");
    }

    #[test]
    fn yaml_output() {
        let assert =
            run_with_stdin(&["--format", "yaml"], r#"{"a": [1, "x"]}"#)
                .success();
        assert_eq!(stdout_of(&assert), "a:\n- 1\n- x\n");
    }

    #[test]
    fn nonexistent_file() {
        run_main(&["does/not/exist.json"]).failure().code(1);
    }

    #[test]
    fn generate_man_pages() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().to_str().unwrap();
        run_main(&["generate", "man", "--output-dir", out]).success();
        assert!(dir.path().join("jt.1").exists());
        assert!(dir.path().join("jt-generate.1").exists());
    }

    #[test]
    fn generate_completions() {
        let assert = run_main(&["generate", "shell", "bash"]).success();
        assert!(stdout_of(&assert).contains("jt"));
    }
}
