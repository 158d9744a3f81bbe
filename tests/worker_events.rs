//! Event contract of a run on the worker thread.

use std::fs;
use tempfile::tempdir;

use date_sort::{DateSortError, PolicyConfig, RunEvent, ShutdownFlag, spawn_run};

fn policy(root: &std::path::Path) -> PolicyConfig {
    PolicyConfig {
        prefer_creation_time: false,
        ..PolicyConfig::new(root)
    }
}

#[test]
fn progress_and_logs_arrive_in_order_then_one_report() {
    let td = tempdir().unwrap();
    let files: Vec<_> = ["one.txt", "two.txt", "three.txt"]
        .iter()
        .map(|n| {
            let p = td.path().join(n);
            fs::write(&p, n).unwrap();
            p
        })
        .collect();

    let handle = spawn_run(policy(td.path()), files, ShutdownFlag::new()).unwrap();
    let events: Vec<RunEvent> = handle.events().iter().collect();
    handle.join().unwrap().unwrap();

    let progress: Vec<(usize, usize)> = events
        .iter()
        .filter_map(|e| match e {
            RunEvent::Progress { current, total } => Some((*current, *total)),
            _ => None,
        })
        .collect();
    assert_eq!(progress, [(1, 3), (2, 3), (3, 3)]);

    // Each progress event is followed by that file's log line.
    for pair in events.windows(2) {
        if let RunEvent::Progress { .. } = pair[0] {
            assert!(matches!(pair[1], RunEvent::Log(_)), "{pair:?}");
        }
    }
    assert_eq!(events.iter().filter(|e| e.is_terminal()).count(), 1);
    match events.last() {
        Some(RunEvent::Finished(report)) => assert!(report.to_string().contains("moved 3 of 3")),
        other => panic!("expected a final report, got {other:?}"),
    }
}

#[test]
fn unreadable_root_fails_without_report() {
    let td = tempdir().unwrap();
    let not_a_dir = td.path().join("file.txt");
    fs::write(&not_a_dir, b"x").unwrap();

    let handle = spawn_run(policy(&not_a_dir), vec![], ShutdownFlag::new()).unwrap();
    let events: Vec<RunEvent> = handle.events().iter().collect();
    let result = handle.join().unwrap();

    assert!(matches!(result, Err(DateSortError::RootNotDirectory(_))));
    assert!(matches!(events.as_slice(), [RunEvent::Failed(msg)] if msg.contains("not a directory")));
}

#[test]
fn shutdown_request_stops_between_files() {
    let td = tempdir().unwrap();
    let a = td.path().join("a.txt");
    fs::write(&a, b"a").unwrap();

    let stop = ShutdownFlag::new();
    stop.request();
    let handle = spawn_run(policy(td.path()), vec![a.clone()], stop).unwrap();
    let events: Vec<RunEvent> = handle.events().iter().collect();
    let result = handle.join().unwrap();

    assert!(matches!(
        result,
        Err(DateSortError::Interrupted { processed: 0, total: 1 })
    ));
    assert!(matches!(events.as_slice(), [RunEvent::Failed(_)]));
    assert!(a.exists(), "nothing moves once shutdown was requested");
}

#[test]
fn cancel_leaves_every_file_in_exactly_one_place() {
    let td = tempdir().unwrap();
    let files: Vec<_> = (0..200)
        .map(|n| {
            let p = td.path().join(format!("f{n:03}.txt"));
            fs::write(&p, b"x").unwrap();
            p
        })
        .collect();

    let handle = spawn_run(policy(td.path()), files.clone(), ShutdownFlag::new()).unwrap();
    handle.cancel();
    let events: Vec<RunEvent> = handle.events().iter().collect();
    let result = handle.join().unwrap();

    // The worker may finish before the request lands; either way one terminal event.
    assert_eq!(events.iter().filter(|e| e.is_terminal()).count(), 1);
    let moved = match result {
        Ok(report) => report.moved(),
        Err(DateSortError::Interrupted { processed, total }) => {
            assert_eq!(total, 200);
            assert!(matches!(events.last(), Some(RunEvent::Failed(_))));
            processed
        }
        Err(other) => panic!("unexpected error: {other}"),
    };
    let still_at_source = files.iter().filter(|f| f.exists()).count();
    assert_eq!(moved + still_at_source, 200);
}
