//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - The core engine stays headless (no UI crates in mimic-core)
//! - No blocking sleeps in production code (waiting is always a scheduled
//!   wakeup, never a blocked thread)
//! - Surfaces stay thin (no sequence or phase decisions outside core)
//!
//! These tests are designed to catch violations early in the development cycle.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Workspace root, two levels up from this member.
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .canonicalize()
        .expect("workspace root exists")
}

/// All `.rs` files under `dir`, excluding `target/`.
pub fn rust_sources(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_entry(|e| e.file_name().to_string_lossy() != "target")
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
        .map(|e| e.path().to_path_buf())
        .collect()
}

/// Source lines of `path` with line numbers, comment-only lines removed.
pub fn code_lines(path: &Path) -> Vec<(usize, String)> {
    let text = std::fs::read_to_string(path).unwrap_or_default();
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.to_string()))
        .filter(|(_, line)| {
            let trimmed = line.trim_start();
            !trimmed.starts_with("//") && !trimmed.starts_with("//!")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// mimic-core must compile without any UI framework. A surface crate
    /// leaking into core would let rendering concerns creep into game
    /// logic.
    #[test]
    fn test_core_has_no_ui_dependencies() {
        let core = workspace_root().join("core");

        let manifest = std::fs::read_to_string(core.join("Cargo.toml")).unwrap();
        for forbidden in ["ratatui", "crossterm"] {
            assert!(
                !manifest.contains(forbidden),
                "core/Cargo.toml depends on {forbidden}"
            );
        }

        for file in rust_sources(&core.join("src")) {
            for (line_no, line) in code_lines(&file) {
                for forbidden in ["ratatui", "crossterm"] {
                    assert!(
                        !line.contains(forbidden),
                        "{}:{} references {}",
                        file.display(),
                        line_no,
                        forbidden
                    );
                }
            }
        }
    }

    /// Waiting is modeled as scheduled wakeups; a blocked thread anywhere
    /// in production code would stall the single-writer event loop.
    #[test]
    fn test_no_blocking_sleeps_in_production_code() {
        let root = workspace_root();
        for crate_dir in ["core/src", "tui/src"] {
            for file in rust_sources(&root.join(crate_dir)) {
                for (line_no, line) in code_lines(&file) {
                    assert!(
                        !line.contains("thread::sleep"),
                        "{}:{} blocks the thread",
                        file.display(),
                        line_no
                    );
                }
            }
        }
    }

    /// The TUI is a thin client: it renders snapshots and forwards events,
    /// and never touches the sequence or decides a phase itself.
    #[test]
    fn test_tui_does_not_reach_into_game_state() {
        let tui = workspace_root().join("tui/src");
        for file in rust_sources(&tui) {
            for (line_no, line) in code_lines(&file) {
                for forbidden in [".sequence", "GamePhase::"] {
                    assert!(
                        !line.contains(forbidden),
                        "{}:{} makes a game-state decision ({}) that belongs in core",
                        file.display(),
                        line_no,
                        forbidden
                    );
                }
            }
        }
    }
}
