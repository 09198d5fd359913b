//! Integration tests for the synthc binary

use std::process::Command;

fn synthc() -> Command {
    Command::new(env!("CARGO_BIN_EXE_synthc"))
}

#[test]
fn test_call_generated_method() {
    let output = synthc()
        .args(["compile", "--call", "foo.bar.MyClass.foo"])
        .output()
        .expect("failed to run synthc");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "Hello world");
}

#[test]
fn test_emit_ir() {
    let output = synthc()
        .args(["compile", "--emit-ir"])
        .output()
        .expect("failed to run synthc");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("; class foo.bar.MyClass : synth.Any"));
    assert!(stdout.contains("fn foo.bar.MyClass.foo("));
    assert!(stdout.contains("\"Hello world\""));
    assert!(stdout.contains("delegate"));
}

#[test]
fn test_plugin_option_is_rejected() {
    let output = synthc()
        .args(["compile", "-P", "plugin:org.demo.synth:greeting=Hi"])
        .output()
        .expect("failed to run synthc");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("greeting"), "{stderr}");
}

#[test]
fn test_unknown_plugin_is_rejected() {
    let output = synthc()
        .args(["compile", "--plugin", "org.demo.missing"])
        .output()
        .expect("failed to run synthc");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("org.demo.missing"), "{stderr}");
    assert!(stderr.contains("available: org.demo.synth"), "{stderr}");
}

#[test]
fn test_options_for_unattached_plugin_are_ignored() {
    let output = synthc()
        .args(["compile", "-P", "plugin:org.demo.other:mode=fast", "--call", "foo.bar.MyClass.foo"])
        .output()
        .expect("failed to run synthc");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "Hello world");
    assert!(String::from_utf8_lossy(&output.stderr).contains("org.demo.other"));
}

#[test]
fn test_identity_json() {
    let output = synthc()
        .args(["identity", "--json"])
        .output()
        .expect("failed to run synthc");

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["identity"]["id"], "org.demo.synth");
    assert_eq!(value["runtime_artifact"]["artifact"], "synth-runtime");
}
