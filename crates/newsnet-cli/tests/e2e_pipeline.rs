//! E2E CLI workflow tests: `newsnet edgelist` then `newsnet analyze`.
//!
//! Each test runs the `newsnet` binary as a subprocess in an isolated temp
//! directory seeded with a small corpus and a names file. Tests cover
//! human-readable progress, `--json` output and the error contract.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

const CORPUS: &str = "\
id,title,text,label
1,Summit,\"Alice Smith met Bob Jones and Carol.\",REAL
2,Thanks,\"Bob Jones thanked
Alice Smith.\",REAL
3,Rumor,\"Alice Smith and Carol eloped.\",FAKE
4,Solo,\"Carol spoke alone.\",REAL
";

const NAMES: &str = "# people\nAlice Smith\nBob Jones\nCarol\n";

/// Small picture so the render stage stays fast.
const CONFIG: &str = "[render]\nwidth = 120\nheight = 120\nlayout_iterations = 10\n";

const EXPECTED_EDGES: &str =
    "nodeA,nodeB,weight\nAlice Smith,Bob Jones,2\nAlice Smith,Carol,1\nBob Jones,Carol,1\n";

/// Build a Command targeting the `newsnet` binary, rooted in `dir`.
fn newsnet_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("newsnet").expect("newsnet binary must exist");
    cmd.current_dir(dir);
    // Suppress tracing output that goes to stderr.
    cmd.env("NEWSNET_LOG", "error");
    cmd.env_remove("NEWSNET_TIMING");
    cmd
}

/// Temp project with `data/fake_or_real_news.csv`, `data/gazetteer.txt`
/// and a `newsnet.toml`.
fn seeded_project() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    let data = dir.path().join("data");
    fs::create_dir_all(&data).expect("data dir");
    fs::write(data.join("fake_or_real_news.csv"), CORPUS).expect("corpus");
    fs::write(data.join("gazetteer.txt"), NAMES).expect("gazetteer");
    fs::write(dir.path().join("newsnet.toml"), CONFIG).expect("config");
    dir
}

fn build_edgelist(dir: &Path) {
    newsnet_cmd(dir).args(["edgelist", "-q"]).assert().success();
}

fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path).expect("read artifact")
}

// ---------------------------------------------------------------------------
// edgelist
// ---------------------------------------------------------------------------

#[test]
fn edgelist_counts_real_articles_only() {
    let dir = seeded_project();

    newsnet_cmd(dir.path())
        .arg("edgelist")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[INFO] Initializing the creation of the weighted edgelist...",
        ))
        .stdout(predicate::str::contains("[INFO] Done!"));

    assert_eq!(
        read(dir.path().join("data/weighted_edgelist_realnews.csv")),
        EXPECTED_EDGES
    );
}

#[test]
fn edgelist_json_reports_counts() {
    let dir = seeded_project();

    let output = newsnet_cmd(dir.path())
        .args(["edgelist", "--json"])
        .output()
        .expect("edgelist should not crash");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["rows_scanned"], 4);
    assert_eq!(json["documents"], 3);
    assert_eq!(json["pairs"], 4);
    assert_eq!(json["distinct_edges"], 3);
}

#[test]
fn edgelist_custom_paths_and_gazetteer_flag() {
    let dir = seeded_project();
    let corpus_dir = dir.path().join("corpus");
    fs::create_dir_all(&corpus_dir).expect("dir");
    fs::write(corpus_dir.join("news.csv"), CORPUS).expect("corpus");
    fs::write(dir.path().join("names.txt"), "Bob Jones\nCarol\n").expect("names");

    newsnet_cmd(dir.path())
        .args([
            "edgelist",
            "-q",
            "--data-dir",
            "corpus",
            "-i",
            "news.csv",
            "-o",
            "edges.csv",
            "--gazetteer",
            "names.txt",
        ])
        .assert()
        .success();

    assert_eq!(
        read(corpus_dir.join("edges.csv")),
        "nodeA,nodeB,weight\nBob Jones,Carol,1\n"
    );
}

#[test]
fn edgelist_missing_text_column_is_data_error() {
    let dir = seeded_project();
    fs::write(
        dir.path().join("data/fake_or_real_news.csv"),
        "id,title,body,label\n1,T,Alice Smith,REAL\n",
    )
    .expect("corpus");

    newsnet_cmd(dir.path())
        .args(["edgelist", "-q"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error[E2001]"))
        .stderr(predicate::str::contains("'text'"));

    assert!(!dir.path().join("data/weighted_edgelist_realnews.csv").exists());
}

#[test]
fn edgelist_missing_gazetteer_is_read_error() {
    let dir = seeded_project();
    fs::remove_file(dir.path().join("data/gazetteer.txt")).expect("remove");

    newsnet_cmd(dir.path())
        .args(["edgelist", "-q"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E4001]"));
}

// ---------------------------------------------------------------------------
// analyze
// ---------------------------------------------------------------------------

#[test]
fn analyze_writes_all_artifacts() {
    let dir = seeded_project();
    build_edgelist(dir.path());

    newsnet_cmd(dir.path())
        .args(["analyze", "-c", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[INFO] Initializing network analysis..."))
        .stdout(predicate::str::contains("Nodes: 3"))
        .stdout(predicate::str::contains("Density: 1.000000"));

    let out = dir.path().join("output");
    assert!(out.join("network_graph.png").is_file());
    assert!(read(out.join("network_graph.dot")).starts_with("graph {"));

    let csv = read(out.join("centrality_measures.csv"));
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("node,Degree Centrality,Betweenness Centrality,Eigenvector Centrality")
    );
    assert_eq!(lines.count(), 3);

    let info = read(out.join("network_information.txt"));
    assert!(info.contains("Edge weight cutoff: > 0"));
    assert!(info.contains("Top 10 by Degree Centrality:"));
}

#[test]
fn analyze_cutoff_drops_light_edges_and_their_endpoints() {
    let dir = seeded_project();
    build_edgelist(dir.path());

    let output = newsnet_cmd(dir.path())
        .args(["analyze", "--json", "--cutoff-edgeweight", "1"])
        .output()
        .expect("analyze should not crash");
    assert!(
        output.status.success(),
        "analyze failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["summary"]["cutoff"], 1);
    assert_eq!(json["summary"]["node_count"], 2);
    assert_eq!(json["summary"]["edge_count"], 1);

    let csv = read(dir.path().join("output/centrality_measures.csv"));
    assert!(!csv.contains("Carol"), "Carol only sits on weight-1 edges");
}

#[test]
fn analyze_cutoff_from_config() {
    let dir = seeded_project();
    build_edgelist(dir.path());
    fs::write(
        dir.path().join("newsnet.toml"),
        format!("{CONFIG}\n[analyze]\ncutoff = 1\ntop_n = 1\n"),
    )
    .expect("config");

    let output = newsnet_cmd(dir.path())
        .args(["analyze", "--json"])
        .output()
        .expect("analyze should not crash");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["summary"]["cutoff"], 1);
    assert_eq!(json["summary"]["top_n"], 1);
    assert_eq!(json["summary"]["rankings"][0]["nodes"].as_array().map(Vec::len), Some(1));
}

#[test]
fn analyze_empty_graph_fails_without_artifacts() {
    let dir = seeded_project();
    build_edgelist(dir.path());

    newsnet_cmd(dir.path())
        .args(["analyze"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error[E3001]"))
        .stderr(predicate::str::contains("--cutoff-edgeweight"));

    assert!(!dir.path().join("output").exists());
}

#[test]
fn analyze_empty_graph_json_error() {
    let dir = seeded_project();
    build_edgelist(dir.path());

    let output = newsnet_cmd(dir.path())
        .args(["analyze", "--json", "-c", "10000"])
        .output()
        .expect("analyze should not crash");
    assert!(!output.status.success());

    let json: Value = serde_json::from_slice(&output.stderr).expect("JSON error on stderr");
    assert_eq!(json["error"]["error_code"], "E3001");
}

#[test]
fn analyze_self_loops_alone_are_an_empty_graph() {
    let dir = seeded_project();
    fs::write(
        dir.path().join("data/weighted_edgelist_realnews.csv"),
        "nodeA,nodeB,weight\nBob,Bob,900\nA,B,3\n",
    )
    .expect("edges");

    newsnet_cmd(dir.path())
        .args(["analyze"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E3001]"));

    assert!(!dir.path().join("output").exists());
}

#[test]
fn analyze_bad_weight_names_the_row() {
    let dir = seeded_project();
    fs::write(
        dir.path().join("data/weighted_edgelist_realnews.csv"),
        "nodeA,nodeB,weight\nA,B,7\nB,C,many\n",
    )
    .expect("edges");

    newsnet_cmd(dir.path())
        .args(["analyze", "-c", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E2002]"))
        .stderr(predicate::str::contains("row 3"));
}

#[test]
fn analyze_missing_edge_list_is_read_error() {
    let dir = seeded_project();

    newsnet_cmd(dir.path())
        .args(["analyze"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E4001]"));
}

// ---------------------------------------------------------------------------
// Global flags
// ---------------------------------------------------------------------------

#[test]
fn quiet_suppresses_progress() {
    let dir = seeded_project();

    newsnet_cmd(dir.path())
        .args(["edgelist", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[INFO]").not());
}

#[test]
fn malformed_config_is_config_error() {
    let dir = seeded_project();
    fs::write(dir.path().join("newsnet.toml"), "[analyze\ncutoff = ").expect("config");

    newsnet_cmd(dir.path())
        .args(["analyze"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E1001]"));
}

#[test]
fn explicit_config_must_exist() {
    let dir = seeded_project();

    newsnet_cmd(dir.path())
        .args(["--config", "missing.toml", "analyze"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E4001]"));
}

#[test]
fn timing_report_goes_to_stderr() {
    let dir = seeded_project();

    newsnet_cmd(dir.path())
        .args(["edgelist", "-q", "--timing"])
        .assert()
        .success()
        .stderr(predicate::str::contains("timing report"))
        .stderr(predicate::str::contains("cmd.edgelist"));
}

#[test]
fn completions_name_the_binary() {
    let dir = TempDir::new().expect("tempdir");

    newsnet_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("newsnet"));
}

#[test]
fn completions_can_be_saved_to_a_file() {
    let dir = TempDir::new().expect("tempdir");

    newsnet_cmd(dir.path())
        .args(["completions", "zsh", "-o", "shell/_newsnet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[INFO] Saved zsh completions"));

    assert!(read(dir.path().join("shell/_newsnet")).contains("#compdef newsnet"));
}
