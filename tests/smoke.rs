use assert_cmd::Command;
use serde_json::Value;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("nlp-gateway").expect("binary exists");
    cmd.env("NLP_BACKEND", "lexicon").env("RUST_LOG", "warn");
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("json on stdout")
}

#[test]
fn cli_help_runs() {
    cli().arg("--help").assert().success();
}

#[test]
fn analyze_prints_prediction() {
    let body = stdout_json(cli().args(["analyze", "--text", "What a great day"]));
    assert_eq!(body["label"], "POSITIVE");
}

#[test]
fn classify_prints_ranking() {
    let body = stdout_json(cli().args([
        "classify",
        "--text",
        "New budget approved by parliament politics",
        "--labels",
        "sports,politics",
    ]));
    assert_eq!(body["labels"][0], "politics");
}

#[test]
fn extract_prints_entities() {
    let body = stdout_json(cli().args(["extract", "--text", "She moved to Tokyo"]));
    assert_eq!(body[0]["entity_group"], "LOC");
    assert_eq!(body[0]["word"], "Tokyo");
}

#[test]
fn empty_text_fails() {
    cli().args(["analyze", "--text", ""]).assert().failure();
}

#[cfg(not(feature = "onx"))]
#[test]
fn onnx_backend_needs_the_feature() {
    cli()
        .env("NLP_BACKEND", "onnx")
        .args(["analyze", "--text", "hello"])
        .assert()
        .failure();
}
