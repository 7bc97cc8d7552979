//! Section builder with a catch-all failure boundary.

use std::any::Any;
use std::future::Future;
use std::path::{Path, PathBuf};

use futures::future::join_all;

use dirprompt_core::{LoadError, Section, channel};
use dirprompt_scan::{absolute, file_content, read_files_in};

/// Builds titled sections from directories.
///
/// Relative directories resolve against the working directory, which is the
/// process cwd unless overridden with [`SectionBuilder::with_working_dir`].
#[derive(Debug, Clone, Default)]
pub struct SectionBuilder {
    working_dir: Option<PathBuf>,
}

impl SectionBuilder {
    /// Create a builder that uses the process working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve directories and display paths against `dir` instead of the cwd.
    ///
    /// A relative `dir` is resolved against the process cwd right away.
    pub fn with_working_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = Some(absolute(dir));
        self
    }

    /// Build the section for `dir`.
    ///
    /// Always returns a section: populated, "no files found", or "build
    /// error" when something escapes the per-file isolation.
    pub async fn build(&self, dir: impl AsRef<Path>, title: &str) -> Section {
        let dir = dir.as_ref().to_path_buf();
        let directory = match &self.working_dir {
            Some(base) => absolute(base.join(&dir)),
            None => absolute(&dir),
        };

        tracing::info!(target: channel::INFO, "Building section: {title}");
        tracing::info!(target: channel::INFO, "Looking in directory: {}", dir.display());
        tracing::info!(target: channel::INFO, "Absolute path: {}", directory.display());

        let work = collect(dir, title.to_string(), self.working_dir.clone());
        guard(work, title, directory).await
    }

    /// Build the section for `dir` and render it.
    pub async fn build_text(&self, dir: impl AsRef<Path>, title: &str) -> String {
        self.build(dir, title).await.to_string()
    }
}

/// Build and render a section using the process working directory.
pub async fn build_doc_section(dir: impl AsRef<Path>, title: &str) -> String {
    SectionBuilder::new().build_text(dir, title).await
}

async fn collect(
    dir: PathBuf,
    title: String,
    working_dir: Option<PathBuf>,
) -> Result<Section, LoadError> {
    let working_dir = match working_dir {
        Some(dir) => dir,
        None => std::env::current_dir().map_err(LoadError::working_directory)?,
    };
    let root = absolute(working_dir.join(&dir));

    let files = read_files_in(&dir, &working_dir).await;
    if files.is_empty() {
        tracing::error!(target: channel::ERROR, "No files found in {}", dir.display());
        return Ok(Section::empty(title, root, working_dir));
    }

    let blocks = join_all(files.iter().map(|path| file_content(path, &working_dir))).await;

    tracing::info!(
        target: channel::INFO,
        "Successfully processed {} files for {title}",
        files.len()
    );
    Ok(Section::populated(title, blocks))
}

/// Run `work` on its own task, turning errors and panics into a fallback section.
pub(crate) async fn guard<F>(work: F, title: &str, directory: PathBuf) -> Section
where
    F: Future<Output = Result<Section, LoadError>> + Send + 'static,
{
    let (message, detail) = match tokio::spawn(work).await {
        Ok(Ok(section)) => return section,
        Ok(Err(err)) => (err.to_string(), err.chain()),
        Err(join_err) => {
            let detail = format!("{join_err:?}");
            let message = if join_err.is_panic() {
                panic_message(join_err.into_panic())
            } else {
                join_err.to_string()
            };
            (message, detail)
        }
    };

    tracing::error!(
        target: channel::ERROR,
        error = %message,
        "Error building section {title}"
    );
    Section::build_error(title, message, detail, directory)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "task panicked".to_string()
    }
}
