use super::*;

use crate::kernel::services::adapters::JsonRepository;
use std::path::Path;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;
use tempfile::tempdir;

const TIMEOUT: Duration = Duration::from_secs(5);

fn runtime() -> (AsyncRuntime, Receiver<Action>, Arc<JsonRepository>) {
    let (tx, rx) = mpsc::channel();
    let repo = Arc::new(JsonRepository::in_memory());
    let runtime = AsyncRuntime::new(tx, repo.clone(), None).unwrap();
    (runtime, rx, repo)
}

fn next(rx: &Receiver<Action>) -> Action {
    rx.recv_timeout(TIMEOUT).unwrap()
}

#[test]
fn load_file_reports_content_or_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("boot.asm");
    std::fs::write(&path, "hlt\n").unwrap();
    let (runtime, rx, _) = runtime();

    runtime.run(Effect::LoadFile(path.clone()));
    match next(&rx) {
        Action::FileLoaded { path: loaded, content } => {
            assert_eq!(loaded, path);
            assert_eq!(content, "hlt\n");
        }
        other => panic!("unexpected {other:?}"),
    }

    runtime.run(Effect::LoadFile(dir.path().join("missing.asm")));
    assert!(matches!(next(&rx), Action::FileLoadFailed { .. }));
}

#[test]
fn write_file_reports_saved_version() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.asm");
    let (runtime, rx, _) = runtime();

    runtime.run(Effect::WriteFile {
        tab: TabId::new(1),
        path: path.clone(),
        content: "nop\n".to_string(),
        version: 7,
    });
    match next(&rx) {
        Action::Saved {
            tab,
            version,
            success,
        } => {
            assert_eq!(tab, TabId::new(1));
            assert_eq!(version, 7);
            assert!(success);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "nop\n");

    runtime.run(Effect::WriteFile {
        tab: TabId::new(1),
        path: dir.path().join("no/such/dir/out.asm"),
        content: String::new(),
        version: 8,
    });
    assert!(matches!(
        next(&rx),
        Action::Saved { success: false, .. }
    ));
}

#[test]
fn load_dir_skips_ignored_entries() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("a.asm"), "").unwrap();
    std::fs::create_dir(dir.path().join(".git")).unwrap();
    let (runtime, rx, _) = runtime();

    runtime.run(Effect::LoadDir(dir.path().to_path_buf()));
    match next(&rx) {
        Action::DirLoaded { entries, .. } => {
            assert_eq!(entries, vec![(OsString::from("a.asm"), false)]);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn load_configs_reports_missing_files_separately() {
    let dir = tempdir().unwrap();
    let present = dir.path().join("nasm.json");
    std::fs::write(&present, "{}").unwrap();
    let (runtime, rx, repo) = runtime();
    let kept = repo.add_config("nasm", &present).unwrap();
    let gone = repo
        .add_config("gas", &dir.path().join("gas.json"))
        .unwrap();

    runtime.run(Effect::LoadConfigs);
    match next(&rx) {
        Action::ConfigsLoaded { configs, .. } => assert_eq!(configs, vec![kept]),
        other => panic!("unexpected {other:?}"),
    }
    match next(&rx) {
        Action::ConfigMissing { record } => assert_eq!(record, gone),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn resolve_without_history_asks_for_a_config() {
    let (runtime, rx, _) = runtime();
    runtime.run(Effect::ResolveSelectedConfig {
        tab: TabId::new(3),
        path: PathBuf::from("/src/boot.asm"),
    });
    assert!(matches!(
        next(&rx),
        Action::NoSelectedConfig { tab } if tab == TabId::new(3)
    ));
}

#[test]
fn resolve_uses_last_selected_config() {
    let dir = tempdir().unwrap();
    let json = dir.path().join("nasm.json");
    std::fs::write(&json, r#"{"instructions": ["mov"]}"#).unwrap();
    let (runtime, rx, repo) = runtime();
    let config = repo.add_config("nasm", &json).unwrap();
    repo.add_selected_config(SelectedConfigRecord::for_file(&config, "/src/boot.asm"))
        .unwrap();

    runtime.run(Effect::ResolveSelectedConfig {
        tab: TabId::new(1),
        path: PathBuf::from("/src/boot.asm"),
    });
    match next(&rx) {
        Action::ConfigResolved {
            record, document, ..
        } => {
            assert_eq!(record, config);
            assert!(document.category_of("mov").is_some());
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn load_config_with_missing_or_broken_file() {
    let dir = tempdir().unwrap();
    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "[").unwrap();
    let (runtime, rx, repo) = runtime();
    let missing = repo
        .add_config("gone", &dir.path().join("gone.json"))
        .unwrap();
    let invalid = repo.add_config("broken", &broken).unwrap();

    runtime.run(Effect::LoadConfig {
        tab: TabId::new(1),
        record: missing.clone(),
    });
    assert!(matches!(
        next(&rx),
        Action::ConfigMissing { record } if record == missing
    ));

    runtime.run(Effect::LoadConfig {
        tab: TabId::new(1),
        record: invalid,
    });
    assert!(matches!(next(&rx), Action::ConfigLoadFailed { .. }));
}

#[cfg(unix)]
#[test]
fn terminal_command_output_is_sent_back() {
    let dir = tempdir().unwrap();
    let (runtime, rx, _) = runtime();
    runtime.run(Effect::RunTerminalCommand(TerminalCommand {
        id: 4,
        cwd: dir.path().to_path_buf(),
        command: "echo hi".to_string(),
    }));
    match next(&rx) {
        Action::TerminalOutput {
            id,
            lines,
            exit_code,
        } => {
            assert_eq!(id, 4);
            assert_eq!(lines, vec!["hi"]);
            assert_eq!(exit_code, Some(0));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn delete_config_reaches_repository() {
    let (runtime, _rx, repo) = runtime();
    let config = repo.add_config("nasm", Path::new("/cfg/nasm.json")).unwrap();
    runtime.run(Effect::DeleteConfig(config.id));

    let deadline = std::time::Instant::now() + TIMEOUT;
    while !repo.all_configs().unwrap().is_empty() {
        assert!(std::time::Instant::now() < deadline);
        std::thread::sleep(Duration::from_millis(10));
    }
}
