//! Binding against the real process environment.
//!
//! Everything that touches the process environment lives in one test, so no
//! other thread in this binary reads it while it is being modified.

use flagenv::{BindConfig, EnvSource, ProcessEnv, bind_from, bindable};

#[derive(Debug, Default)]
struct Worker {
    queue: String,
    concurrency: i64,
    weights: Vec<f64>,
}

bindable!(Worker {
    queue = "default",
    concurrency,
    weights,
});

#[test]
fn reads_process_environment() {
    assert_eq!(ProcessEnv.var("PROCTEST_NEVER_SET"), None);

    // SAFETY: this is the only test in this binary, so no other thread reads
    // or writes the environment concurrently.
    unsafe {
        std::env::set_var("PROCTEST_CONCURRENCY", "8");
        std::env::set_var("PROCTEST_WEIGHTS", "0.5, 1.5");
    }

    let worker: Worker =
        bind_from(&BindConfig::new("proctest"), ["worker"], &ProcessEnv).expect("bind");
    assert_eq!(worker.queue, "default");
    assert_eq!(worker.concurrency, 8);
    assert_eq!(worker.weights, vec![0.5, 1.5]);

    unsafe {
        std::env::remove_var("PROCTEST_CONCURRENCY");
        std::env::remove_var("PROCTEST_WEIGHTS");
    }
    assert_eq!(ProcessEnv.var("PROCTEST_CONCURRENCY"), None);
}
