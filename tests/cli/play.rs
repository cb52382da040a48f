//! Tests for `tequila play` and `tequila install-roles`.
//!
//! A stub script stands in for the Ansible executables; it records its
//! arguments and exits with a configurable code.

use crate::support::*;

#[cfg(unix)]
fn install_stub(t: &Test, name: &str, exit_code: i32) -> String {
    use std::os::unix::fs::PermissionsExt;

    let args_file = t.path(&format!("{}.args", name));
    let script = format!(
        "#!/bin/sh\nfor a in \"$@\"; do echo \"$a\"; done > '{}'\nexit {}\n",
        args_file.display(),
        exit_code
    );
    let rel = format!("bin/{}", name);
    t.write(&rel, script);
    let path = t.path(&rel);
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path.display().to_string()
}

#[cfg(unix)]
fn recorded_args(t: &Test, name: &str) -> Vec<String> {
    std::fs::read_to_string(t.path(&format!("{}.args", name)))
        .unwrap()
        .lines()
        .map(String::from)
        .collect()
}

#[cfg(unix)]
fn configure(t: &Test, playbook: &str, galaxy: &str) {
    t.write(
        ".tequila.toml",
        format!(
            "[ansible]\nplaybook = \"{}\"\ngalaxy = \"{}\"\n",
            playbook, galaxy
        ),
    );
}

#[cfg(unix)]
#[test]
fn test_play_default_playbook() {
    let t = Test::new();
    let stub = install_stub(&t, "ansible-playbook", 0);
    configure(&t, &stub, "ansible-galaxy");

    let output = t.play(&["staging"]);
    assert_success(&output);
    assert_eq!(
        recorded_args(&t, "ansible-playbook"),
        vec![
            "-i",
            "deployment/environments/staging/inventory",
            "deployment/playbooks/site.yml"
        ]
    );
}

#[cfg(unix)]
#[test]
fn test_play_passes_connection_options() {
    let t = Test::new();
    let stub = install_stub(&t, "ansible-playbook", 0);
    configure(&t, &stub, "ansible-galaxy");

    let output = t.play(&["production", "db.yml", "-u", "deploy", "-k", "--key-file", "id_ops"]);
    assert_success(&output);
    assert_eq!(
        recorded_args(&t, "ansible-playbook"),
        vec![
            "-i",
            "deployment/environments/production/inventory",
            "deployment/playbooks/db.yml",
            "--user",
            "deploy",
            "--ask-pass",
            "--private-key",
            "id_ops"
        ]
    );
}

#[cfg(unix)]
#[test]
fn test_play_propagates_exit_code() {
    let t = Test::new();
    let stub = install_stub(&t, "ansible-playbook", 7);
    configure(&t, &stub, "ansible-galaxy");

    let output = t.play(&["staging"]);
    assert_exit_code(&output, 7);
}

#[test]
fn test_play_rejects_bad_environment() {
    let t = Test::new();
    let output = t.play(&["../staging"]);
    assert_exit_code(&output, 2);
    assert_stderr_contains(&output, "invalid environment");
}

#[test]
fn test_play_without_ansible() {
    let t = Test::new();
    t.write(
        ".tequila.toml",
        "[ansible]\nplaybook = \"tequila-test-no-such-program\"\n",
    );

    let output = t.play(&["staging"]);
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "tequila-test-no-such-program not found on PATH");
}

#[cfg(unix)]
#[test]
fn test_install_roles() {
    let t = Test::new();
    let stub = install_stub(&t, "ansible-galaxy", 0);
    configure(&t, "ansible-playbook", &stub);

    let output = t.install_roles();
    assert_success(&output);
    assert_eq!(
        recorded_args(&t, "ansible-galaxy"),
        vec!["install", "-i", "-r", "deployment/requirements.yml"]
    );
}

#[cfg(unix)]
#[test]
fn test_install_roles_propagates_exit_code() {
    let t = Test::new();
    let stub = install_stub(&t, "ansible-galaxy", 3);
    configure(&t, "ansible-playbook", &stub);

    let output = t.install_roles();
    assert_exit_code(&output, 3);
}

#[test]
fn test_play_rejects_bad_environment_before_config() {
    let t = Test::new();
    t.write(".tequila.toml", "[ansible]\nplaybok = \"x\"\n");

    let output = t.play(&["a/b"]);
    assert_exit_code(&output, 2);
    assert_stderr_contains(&output, "invalid environment 'a/b'");
    assert_stderr_excludes(&output, "config file");
}
