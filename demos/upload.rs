//! Continuous upload demo: a mock source keeps discovering files, a mock
//! storage answers randomly with retry/failure/success, and a `LogWriter`
//! prints every history transition.
//!
//! Run with: `cargo run --example upload --features logging`

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use taskpull::{
    HandlerFn, LogWriter, Outcome, PullError, PullTask, Source, SourceRef, TaskConfig,
    spawn_observer,
};

type MockFile = String;

/// Grows a random file list by one entry per pull.
struct MockFileSource {
    files: Mutex<Vec<MockFile>>,
}

#[async_trait]
impl Source<MockFile> for MockFileSource {
    async fn pull(&self) -> Result<Vec<MockFile>, PullError> {
        let discovered = rand::rng().random_range(0..100u32).to_string();
        let mut files = self.files.lock().expect("file list poisoned");
        files.push(discovered);
        Ok(files.clone())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let source: SourceRef<MockFile> = Arc::new(MockFileSource {
        files: Mutex::new(Vec::new()),
    });

    // Mock storage: uploads succeed, fail, or ask for up to 3 retries.
    let handler = HandlerFn::arc(|file: MockFile| async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        match rand::rng().random_range(0..3u8) {
            0 => Outcome::retry(3),
            1 => Outcome::failure(format!("upload of {file} failed")),
            _ => Outcome::Success,
        }
    });

    let task = PullTask::with_config(
        source,
        handler,
        TaskConfig {
            pull_interval: Duration::from_millis(500),
            handle_interval: Duration::from_millis(200),
            update_capacity: 256,
        },
    );

    spawn_observer(task.subscribe(), Arc::new(LogWriter::new()));

    task.start().await.expect("task starts from idle");
    tokio::time::sleep(Duration::from_secs(10)).await;
    task.cancel_with("demo finished").await;

    let history = task.snapshot().await;
    println!("tracked {} files, cancelled: {}", history.len(), task.cancelled());
}
