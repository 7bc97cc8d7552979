use std::fs;
use std::io;
use std::sync::{Arc, Mutex};

use dirprompt_core::{UNDERLINE, channel};
use dirprompt_section::{SectionBody, SectionBuilder, build_doc_section};
use tempfile::TempDir;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn create_test_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("a.txt"), "alpha content").unwrap();
    fs::write(root.join("sub/b.txt"), "beta content").unwrap();

    temp
}

#[tokio::test]
async fn test_missing_directory_falls_back() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("does-not-exist");

    let text = build_doc_section(&missing, "Code Examples").await;

    assert!(text.starts_with(&format!("\nCode Examples:\n{UNDERLINE}\n")));
    assert!(text.contains("No files found in directory. Debug info:"));
    assert!(text.contains(&format!("- Attempted path: {}\n", missing.display())));
}

#[tokio::test]
async fn test_populated_section_layout() {
    let temp = create_test_tree();

    let section = SectionBuilder::new()
        .with_working_dir(temp.path())
        .build(".", "Docs")
        .await;
    let text = section.to_string();

    assert!(text.trim_start().starts_with(&format!("Docs:\n{UNDERLINE}\n")));
    assert_eq!(section.blocks().len(), 2);
    assert_eq!(section.loaded_count(), 2);
    assert_eq!(text.matches("\nFile: ").count(), 2);
    assert!(text.contains("alpha content"));
    assert!(text.contains("beta content"));
    // Blocks end with a newline and are joined by a blank line.
    assert!(text.contains("content\n\n\n\nFile: "));
}

#[tokio::test]
async fn test_section_is_stable_across_runs() {
    let temp = create_test_tree();
    let builder = SectionBuilder::new().with_working_dir(temp.path());

    let first = builder.build_text(".", "Docs").await;
    let second = builder.build_text(".", "Docs").await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_empty_directory_falls_back_with_working_dir() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("empty")).unwrap();

    let section = SectionBuilder::new()
        .with_working_dir(temp.path())
        .build("empty", "Nothing")
        .await;

    match &section.body {
        SectionBody::Empty {
            attempted_path,
            working_dir,
        } => {
            assert_eq!(attempted_path, &temp.path().join("empty"));
            assert_eq!(working_dir, temp.path());
        }
        other => panic!("expected empty fallback, got {other:?}"),
    }
}

#[tokio::test]
async fn test_traces_do_not_change_output() {
    let temp = create_test_tree();
    let builder = SectionBuilder::new().with_working_dir(temp.path());
    let silent = builder.build_text(".", "Docs").await;

    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(captured.clone())
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .finish();
    let traced = {
        let _guard = tracing::subscriber::set_default(subscriber);
        builder.build_text(".", "Docs").await
    };
    let traces = String::from_utf8_lossy(&captured.0.lock().unwrap()).to_string();

    assert_eq!(silent, traced);
    assert!(traces.contains(channel::INFO));
    assert!(traces.contains("Building section: Docs"));
    assert!(traces.contains("Found file:"));
    assert!(traces.contains("Successfully processed 2 files for Docs"));
}

#[tokio::test]
async fn test_independent_sections_run_concurrently() {
    let left = create_test_tree();
    let right = TempDir::new().unwrap();

    let left_builder = SectionBuilder::new().with_working_dir(left.path());
    let right_builder = SectionBuilder::new().with_working_dir(right.path());

    let (populated, empty) = tokio::join!(
        left_builder.build(".", "Left"),
        right_builder.build("missing", "Right"),
    );

    assert!(populated.is_populated());
    assert!(matches!(empty.body, SectionBody::Empty { .. }));
}

#[tokio::test]
async fn test_relative_working_dir_keeps_headers_relative() {
    let section = SectionBuilder::new()
        .with_working_dir(".")
        .build("src", "Sources")
        .await;
    let text = section.to_string();

    assert!(text.contains("\nFile: src/builder.rs\n"));
    assert!(!text.contains("\nFile: /"));
}

#[tokio::test]
async fn test_relative_working_dir_in_empty_fallback() {
    let cwd = std::env::current_dir().unwrap();

    let text = SectionBuilder::new()
        .with_working_dir(".")
        .build_text("no-such-dir", "Missing")
        .await;

    assert!(text.contains(&format!("- Working directory: {}\n", cwd.display())));
    assert!(text.contains(&format!(
        "- Attempted path: {}\n",
        cwd.join("no-such-dir").display()
    )));
}
