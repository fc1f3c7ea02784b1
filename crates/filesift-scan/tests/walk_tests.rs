use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use filesift_core::{ScanParams, SiftPolicy, WarningKind};
use filesift_scan::{CancellationToken, Walker, dedup};

fn touch(path: &Path) {
    fs::write(path, b"x").unwrap();
}

fn params_for(root: &Path) -> ScanParams {
    ScanParams::builder()
        .roots(vec![root.to_path_buf()])
        .build()
        .unwrap()
}

#[test]
fn test_walk_collects_fresh_files() {
    let temp = TempDir::new().unwrap();
    touch(&temp.path().join("a.pdf"));
    touch(&temp.path().join("b.jpg"));
    fs::create_dir(temp.path().join("sub")).unwrap();
    touch(&temp.path().join("sub").join("c.txt"));

    let policy = SiftPolicy::default();
    let params = params_for(temp.path());
    let outcome = Walker::new(&policy, &params).walk();

    let mut names: Vec<_> = outcome.records.iter().map(|r| r.name.to_string()).collect();
    names.sort();
    assert_eq!(names, ["a.pdf", "b.jpg", "c.txt"]);
    assert!(outcome.warnings.is_empty());
    assert_eq!(outcome.skipped.total(), 0);
}

#[test]
fn test_walk_respects_cutoff() {
    let temp = TempDir::new().unwrap();
    let stale = temp.path().join("stale.txt");
    touch(&stale);

    // Rewind the modification time. Creation time cannot be rewound
    // portably, so the filter is checked as a property over whatever the
    // walker kept rather than asserting exclusion outright.
    let old = std::time::SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(86_400);
    let file = fs::OpenOptions::new().write(true).open(&stale).unwrap();
    file.set_modified(old).unwrap();
    drop(file);

    let policy = SiftPolicy::default();
    let params = params_for(temp.path());
    let outcome = Walker::new(&policy, &params).walk();

    for record in &outcome.records {
        assert!(
            record.timestamps.meets_cutoff(params.cutoff_time()),
            "record {:?} violates the cutoff filter",
            record.path
        );
    }
}

#[test]
fn test_hidden_files_skipped_by_default() {
    let temp = TempDir::new().unwrap();
    touch(&temp.path().join("visible.txt"));
    touch(&temp.path().join(".hidden.txt"));
    fs::create_dir(temp.path().join(".hidden_dir")).unwrap();
    touch(&temp.path().join(".hidden_dir").join("inner.txt"));

    let policy = SiftPolicy::default();
    let params = params_for(temp.path());
    let outcome = Walker::new(&policy, &params).walk();
    let names: Vec<_> = outcome.records.iter().map(|r| r.name.to_string()).collect();
    assert_eq!(names, ["visible.txt"]);

    let params = ScanParams::builder()
        .roots(vec![temp.path().to_path_buf()])
        .include_hidden(true)
        .build()
        .unwrap();
    let outcome = Walker::new(&policy, &params).walk();
    assert_eq!(outcome.records.len(), 3);
}

#[test]
fn test_excluded_subtree_pruned_silently() {
    let temp = TempDir::new().unwrap();
    touch(&temp.path().join("keep.txt"));
    fs::create_dir(temp.path().join("node_modules")).unwrap();
    touch(&temp.path().join("node_modules").join("drop.js"));

    let policy = SiftPolicy::default();
    let params = params_for(temp.path());
    let outcome = Walker::new(&policy, &params).walk();

    let names: Vec<_> = outcome.records.iter().map(|r| r.name.to_string()).collect();
    assert_eq!(names, ["keep.txt"]);
    // Exclusion is pruning, not an error.
    assert!(outcome.warnings.is_empty());
}

#[test]
fn test_depth_bound_stops_at_max_depth() {
    let temp = TempDir::new().unwrap();

    // Chain of 11 nested directories, one file per level plus one at the
    // root (level 0).
    touch(&temp.path().join("level0.txt"));
    let mut dir = temp.path().to_path_buf();
    for level in 1..=11u32 {
        dir = dir.join(format!("d{level}"));
        fs::create_dir(&dir).unwrap();
        touch(&dir.join(format!("level{level}.txt")));
    }

    let policy = SiftPolicy::default();
    let params = params_for(temp.path());
    let outcome = Walker::new(&policy, &params).walk();

    let mut names: Vec<_> = outcome.records.iter().map(|r| r.name.to_string()).collect();
    names.sort();
    let expected: Vec<_> = (0..=10).map(|l| format!("level{l}.txt")).collect();
    assert_eq!(names, expected, "levels 0-10 kept, level 11 never visited");
}

#[test]
fn test_missing_root_is_a_warning_not_an_error() {
    let temp = TempDir::new().unwrap();
    touch(&temp.path().join("real.txt"));

    let policy = SiftPolicy::default();
    let params = ScanParams::builder()
        .roots(vec![
            PathBuf::from("/definitely/not/a/real/root"),
            temp.path().to_path_buf(),
        ])
        .build()
        .unwrap();
    let outcome = Walker::new(&policy, &params).walk();

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.skipped.missing_roots, 1);
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.warnings[0].kind, WarningKind::MissingRoot);
}

#[test]
fn test_overlapping_roots_deduplicated() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("sub")).unwrap();
    touch(&temp.path().join("top.txt"));
    touch(&temp.path().join("sub").join("inner.txt"));

    let policy = SiftPolicy::default();
    let params = ScanParams::builder()
        .roots(vec![temp.path().to_path_buf(), temp.path().join("sub")])
        .build()
        .unwrap();
    let outcome = Walker::new(&policy, &params).walk();

    // inner.txt is reached through both roots.
    assert_eq!(outcome.records.len(), 3);
    let deduped = dedup(outcome.records);
    let mut names: Vec<_> = deduped.iter().map(|r| r.name.to_string()).collect();
    names.sort();
    assert_eq!(names, ["inner.txt", "top.txt"]);
}

#[test]
fn test_cancelled_walk_yields_nothing() {
    let temp = TempDir::new().unwrap();
    touch(&temp.path().join("a.txt"));

    let policy = SiftPolicy::default();
    let params = params_for(temp.path());
    let token = CancellationToken::new();
    token.cancel();

    let outcome = Walker::with_cancellation(&policy, &params, token).walk();
    assert!(outcome.records.is_empty());
}
