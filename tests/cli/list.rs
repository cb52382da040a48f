//! Tests for `tequila list`.

use crate::support::*;

#[test]
fn test_lists_environments_and_playbooks() {
    let t = Test::new();
    t.write("deployment/environments/staging/inventory", "[web]\n");
    t.write("deployment/environments/production/inventory", "[web]\n");
    t.write("deployment/playbooks/site.yml", "---\n");
    t.write("deployment/playbooks/db.yml", "---\n");
    t.write("deployment/playbooks/notes.txt", "ignored\n");

    let output = t.list();
    assert_success(&output);
    let out = stdout(&output);

    let production = out.find("production").unwrap();
    let staging = out.find("staging").unwrap();
    assert!(production < staging, "environments should be sorted: {}", out);

    assert_stdout_contains(&output, "site (default)");
    assert_stdout_contains(&output, "• db");
    assert!(!out.contains("notes"));
}

#[test]
fn test_list_without_deployment_tree() {
    let t = Test::new();

    let output = t.list();
    assert_success(&output);
    assert_stdout_contains(&output, "Environments");
    assert_stdout_contains(&output, "none under deployment");
}

#[test]
fn test_list_honours_base_dir() {
    let t = Test::new();
    t.write(".tequila.toml", "[layout]\nbase_dir = \"ops\"\n");
    t.write("ops/environments/qa/inventory", "");

    let output = t.list();
    assert_success(&output);
    assert_stdout_contains(&output, "• qa");
}
