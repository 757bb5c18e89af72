//! Reprioritization demo: promote one element to the front of the batch,
//! hold another out entirely, then release it.
//!
//! Run with: `cargo run --example priority`

use std::time::Duration;

use taskpull::{HandlerFn, Outcome, PullTask, SourceFn, TaskConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let source = SourceFn::arc(|| async {
        Ok(vec!["a".to_string(), "b".to_string(), "c".to_string()])
    });
    let handler = HandlerFn::arc(|element: String| async move {
        println!("handling {element}");
        Outcome::Success
    });

    let task = PullTask::with_config(
        source,
        handler,
        TaskConfig {
            pull_interval: Duration::from_millis(200),
            handle_interval: Duration::from_millis(100),
            update_capacity: 64,
        },
    );

    // "b" jumps the queue; "c" sits the first cycles out.
    task.promote("b".to_string()).await;
    task.mark(&"c".to_string()).await;

    task.start().await.expect("task starts from idle");
    tokio::time::sleep(Duration::from_secs(1)).await;

    println!("releasing c");
    task.unmark(&"c".to_string()).await;
    tokio::time::sleep(Duration::from_secs(1)).await;

    task.cancel().await;
    for (element, outcome) in task.snapshot().await {
        println!("{element}: {}", outcome.as_label());
    }
}
