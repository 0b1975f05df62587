// src/store.rs

use std::{
    fmt, io,
    path::PathBuf,
    process::{ExitStatus, Stdio},
};

use async_trait::async_trait;
use tokio::{io::AsyncWriteExt, process::Command};

use crate::models::quiz::{StoredTest, TestDefinition};

/// Argument that asks the test module to print every stored test.
const FETCH_ARG: &str = "fetch";

/// Failure while talking to the test store.
#[derive(Debug)]
pub enum StoreError {
    /// The module could not be started.
    Spawn(io::Error),
    /// Piping data to or from the running module failed.
    Io(io::Error),
    /// The module ran but exited unsuccessfully.
    Failed { status: ExitStatus, output: String },
    /// The test definition could not be serialized.
    Encode(serde_json::Error),
    /// The module's answer was not the expected JSON.
    Decode(serde_json::Error),
}

impl StoreError {
    /// Output the module produced before failing, if any was captured.
    pub fn output(&self) -> &str {
        match self {
            StoreError::Failed { output, .. } => output,
            _ => "",
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Spawn(e) => write!(f, "failed to start test module: {}", e),
            StoreError::Io(e) => write!(f, "test module i/o error: {}", e),
            StoreError::Failed { status, .. } => write!(f, "{}", status),
            StoreError::Encode(e) => write!(f, "failed to encode test: {}", e),
            StoreError::Decode(e) => write!(f, "failed to decode module output: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Spawn(e) | StoreError::Io(e) => Some(e),
            StoreError::Encode(e) | StoreError::Decode(e) => Some(e),
            StoreError::Failed { .. } => None,
        }
    }
}

/// Storage backend for tests.
///
/// Handlers only see this trait, so the transport behind it (a subprocess
/// today) can change without touching them.
#[async_trait]
pub trait TestStore: Send + Sync {
    /// Hands a test definition to the store. Returns the store's raw reply.
    async fn submit(&self, definition: &TestDefinition) -> Result<String, StoreError>;

    /// Returns every stored test.
    async fn list(&self) -> Result<Vec<StoredTest>, StoreError>;
}

/// `TestStore` backed by the external test module executable.
///
/// * `submit` pipes the definition as JSON to the module's stdin and
///   returns stdout followed by stderr.
/// * `list` runs the module with `fetch` and decodes stdout.
#[derive(Debug, Clone)]
pub struct ProcessTestStore {
    program: PathBuf,
    args: Vec<String>,
}

impl ProcessTestStore {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Arguments placed before any operation-specific argument.
    /// Lets the module be launched through an interpreter (e.g. `sh script`).
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

#[async_trait]
impl TestStore for ProcessTestStore {
    async fn submit(&self, definition: &TestDefinition) -> Result<String, StoreError> {
        let payload = serde_json::to_vec(definition).map_err(StoreError::Encode)?;
        tracing::info!(
            "Passing test to module {}: {}",
            self.program.display(),
            String::from_utf8_lossy(&payload)
        );

        let mut child = self
            .command()
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(StoreError::Spawn)?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| StoreError::Io(io::Error::other("module stdin unavailable")))?;

        // Feed stdin while collecting output so neither pipe can fill up and stall.
        let write = async move {
            let res = stdin.write_all(&payload).await;
            drop(stdin);
            res
        };
        let (written, output) = tokio::join!(write, child.wait_with_output());
        let output = output.map_err(StoreError::Io)?;

        match written {
            // The module may exit without reading its input; its exit status decides.
            Err(e) if e.kind() != io::ErrorKind::BrokenPipe => return Err(StoreError::Io(e)),
            _ => {}
        }

        let mut combined = output.stdout;
        combined.extend_from_slice(&output.stderr);
        let combined = String::from_utf8_lossy(&combined).into_owned();

        if !output.status.success() {
            return Err(StoreError::Failed {
                status: output.status,
                output: combined,
            });
        }

        tracing::info!("Module output: {}", combined);
        Ok(combined)
    }

    async fn list(&self) -> Result<Vec<StoredTest>, StoreError> {
        let output = self
            .command()
            .arg(FETCH_ARG)
            .output()
            .await
            .map_err(StoreError::Spawn)?;

        if !output.status.success() {
            let mut combined = output.stdout;
            combined.extend_from_slice(&output.stderr);
            return Err(StoreError::Failed {
                status: output.status,
                output: String::from_utf8_lossy(&combined).into_owned(),
            });
        }

        // `null` is how the module reports an empty store.
        let tests: Option<Vec<StoredTest>> = serde_json::from_slice(&output.stdout).map_err(|e| {
            tracing::debug!(
                "Unparseable module output: {}",
                String::from_utf8_lossy(&output.stdout)
            );
            StoreError::Decode(e)
        })?;

        Ok(tests.unwrap_or_default())
    }
}
