use std::cell::{Cell, RefCell};
use std::rc::Rc;

use flow_actions::{AsOwner, Delay, Flow, Owner, SetupError, WeakFlow};

type Steps = Rc<RefCell<Vec<&'static str>>>;

fn steps() -> Steps {
    Rc::new(RefCell::new(Vec::new()))
}

#[test]
fn wait_seconds_resumes_after_the_delay() {
    let flow = Flow::default();
    let owner = Owner::new("script");
    let log = steps();

    let (f, weak, sink) = (flow.downgrade(), owner.as_owner(), Rc::clone(&log));
    flow.spawn(async move {
        sink.borrow_mut().push("start");
        f.on(&weak).wait_seconds(1.0).await;
        sink.borrow_mut().push("after delay");
    });

    assert_eq!(*log.borrow(), vec!["start"]);
    flow.tick(0.6);
    assert_eq!(log.borrow().len(), 1);
    flow.tick(0.6);
    assert_eq!(*log.borrow(), vec!["start", "after delay"]);
}

#[test]
fn awaiters_chain_in_order() {
    let flow = Flow::default();
    let owner = Owner::new("script");
    let log = steps();

    let (f, weak, sink) = (flow.downgrade(), owner.as_owner(), Rc::clone(&log));
    flow.spawn(async move {
        f.on(&weak).wait_ticks(1).await;
        sink.borrow_mut().push("two ticks");
        f.on(&weak).wait_seconds(0.5).await;
        sink.borrow_mut().push("half a second");
    });

    flow.tick(0.1);
    assert!(log.borrow().is_empty());
    flow.tick(0.1);
    assert_eq!(*log.borrow(), vec!["two ticks"]);

    // The delay was added while the previous pass ran; it ticks from now on.
    flow.tick(0.3);
    flow.tick(0.3);
    assert_eq!(*log.borrow(), vec!["two ticks", "half a second"]);
}

#[test]
fn wait_until_reports_timeout() {
    let flow = Flow::default();
    let owner = Owner::new("script");
    let result = Rc::new(Cell::new(None));

    let (f, weak, sink) = (flow.downgrade(), owner.as_owner(), Rc::clone(&result));
    flow.spawn(async move {
        let timed_out = f.on(&weak).wait_until(|_| false, 1.0).await;
        sink.set(Some(timed_out));
    });

    flow.tick(1.5);
    assert_eq!(result.get(), Some(true));
}

#[test]
fn wait_until_already_true_does_not_suspend() {
    let flow = Flow::default();
    let owner = Owner::new("script");
    let result = Rc::new(Cell::new(None));

    let (f, weak, sink) = (flow.downgrade(), owner.as_owner(), Rc::clone(&result));
    flow.spawn(async move {
        let timed_out = f.on(&weak).wait_until(|_| true, 0.0).await;
        sink.set(Some(timed_out));
    });

    assert_eq!(result.get(), Some(false));
    assert_eq!(flow.stats().pending, 0);
}

#[test]
fn stopping_with_completion_resumes() {
    let flow = Flow::default();
    let owner = Owner::new("script");
    let resumed = Rc::new(Cell::new(false));

    let (f, weak, sink) = (flow.downgrade(), owner.as_owner(), Rc::clone(&resumed));
    flow.spawn(async move {
        f.on(&weak).wait_seconds(100.0).await;
        sink.set(true);
    });

    assert_eq!(flow.stop_all(None, true), 1);
    assert!(resumed.get());
}

#[test]
fn stopping_without_completion_leaves_the_coroutine_suspended() {
    let flow = Flow::default();
    let owner = Owner::new("script");
    let resumed = Rc::new(Cell::new(false));

    let (f, weak, sink) = (flow.downgrade(), owner.as_owner(), Rc::clone(&resumed));
    flow.spawn(async move {
        f.on(&weak).wait_seconds(0.5).await;
        sink.set(true);
    });

    assert_eq!(flow.stop_all(None, false), 1);
    for _ in 0..10 {
        flow.tick(0.5);
    }
    assert!(!resumed.get());
    assert_eq!(flow.stats().active, 0);
}

#[test]
fn owner_death_leaves_the_coroutine_suspended() {
    let flow = Flow::default();
    let owner = Owner::new("script");
    let resumed = Rc::new(Cell::new(false));

    let (f, weak, sink) = (flow.downgrade(), owner.as_owner(), Rc::clone(&resumed));
    flow.spawn(async move {
        f.on(&weak).wait_ticks(0).await;
        sink.set(true);
    });

    drop(owner);
    for _ in 0..3 {
        flow.tick(0.1);
    }
    assert!(!resumed.get());
}

struct DropFlag(Rc<Cell<bool>>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.set(true);
    }
}

#[test]
fn suspended_coroutine_does_not_outlive_the_flow() {
    let flow = Flow::default();
    let owner = Owner::new("script");
    let dropped = Rc::new(Cell::new(false));

    let (f, weak) = (flow.downgrade(), owner.as_owner());
    flow.spawn(async move {
        f.on(&weak).wait_seconds(100.0).await;
    });
    let flag = DropFlag(Rc::clone(&dropped));
    flow.on(&owner).delay(100.0, move |_| drop(flag));
    flow.tick(0.1);

    let session = flow.driver().downgrade();
    drop(flow);
    drop(owner);
    assert!(session.upgrade().is_none());
    assert!(dropped.get());
}

#[test]
fn launches_after_the_flow_is_dropped_are_ignored() {
    let flow = Flow::default();
    let owner = Owner::new("script");
    let weak_flow: WeakFlow = flow.downgrade();

    assert!(weak_flow.upgrade().is_some());
    drop(flow);
    assert!(weak_flow.upgrade().is_none());
    assert!(!weak_flow.on(&owner).delay(1.0, |_| {}).is_valid());
    assert_eq!(
        weak_flow.on(&owner).try_launch(Delay::new(1.0, |_| {})),
        Err(SetupError::DriverDropped)
    );
}
