use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use flow_actions::{AsOwner, AsyncPriority, Flow, Owner, RunAsyncThen};

fn run_frames_until(flow: &Flow, done: impl Fn() -> bool) {
    for _ in 0..500 {
        flow.tick(0.016);
        if done() {
            return;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
}

#[test]
fn runs_work_on_a_thread_without_a_runtime() {
    let flow = Flow::default();
    let owner = Owner::new("loader");
    let worked = Arc::new(AtomicBool::new(false));
    let outcome = Rc::new(Cell::new(None));

    let flag = Arc::clone(&worked);
    let sink = Rc::clone(&outcome);
    flow.on(&owner).run_async_then(
        move || flag.store(true, Ordering::SeqCst),
        move |timed_out, stopped| sink.set(Some((timed_out, stopped))),
    );

    run_frames_until(&flow, || outcome.get().is_some());
    assert!(worked.load(Ordering::SeqCst));
    assert_eq!(outcome.get(), Some((false, false)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn runs_work_on_the_blocking_pool_inside_a_runtime() {
    let flow = Flow::default();
    let owner = Owner::new("loader");
    let outcome = Rc::new(Cell::new(None));

    let sink = Rc::clone(&outcome);
    flow.on(&owner).run_async_then(
        || std::thread::sleep(Duration::from_millis(10)),
        move |timed_out, stopped| sink.set(Some((timed_out, stopped))),
    );

    for _ in 0..500 {
        flow.tick(0.016);
        if outcome.get().is_some() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    assert_eq!(outcome.get(), Some((false, false)));
}

#[test]
fn high_priority_work_can_time_out() {
    let flow = Flow::default();
    let owner = Owner::new("loader");
    let outcome = Rc::new(Cell::new(None));

    let sink = Rc::clone(&outcome);
    let action = RunAsyncThen::new(
        || std::thread::sleep(Duration::from_millis(200)),
        move |timed_out, stopped| sink.set(Some((timed_out, stopped))),
    )
    .with_priority(AsyncPriority::High)
    .with_timeout(0.05);
    flow.on(&owner).launch(action);

    flow.tick(0.1);
    assert_eq!(outcome.get(), Some((true, false)));
}

#[test]
fn coroutine_waits_for_async_work() {
    let flow = Flow::default();
    let owner = Owner::new("loader");
    let worked = Arc::new(AtomicBool::new(false));
    let resumed = Rc::new(Cell::new(None));

    let (f, weak) = (flow.downgrade(), owner.as_owner());
    let (flag, sink) = (Arc::clone(&worked), Rc::clone(&resumed));
    flow.spawn(async move {
        let timed_out = f
            .on(&weak)
            .run_async_and_wait(move || flag.store(true, Ordering::SeqCst), 0.0)
            .await;
        sink.set(Some(timed_out));
    });

    run_frames_until(&flow, || resumed.get().is_some());
    assert!(worked.load(Ordering::SeqCst));
    assert_eq!(resumed.get(), Some(false));
}
