// Host-side tests for the frame scheduler lifecycle and isolation.

use hero_core::{FrameScheduler, FrameTick, SceneError};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

fn counter(scheduler: &mut FrameScheduler, name: &'static str) -> Rc<Cell<u32>> {
    let count = Rc::new(Cell::new(0));
    let c = count.clone();
    scheduler.register(name, move |_: &FrameTick| {
        c.set(c.get() + 1);
        Ok(())
    });
    count
}

#[test]
fn every_animator_sees_the_same_elapsed_time() {
    let mut scheduler = FrameScheduler::new();
    let seen: Rc<RefCell<Vec<(u64, f32)>>> = Rc::new(RefCell::new(Vec::new()));
    for name in ["a", "b", "c"] {
        let seen = seen.clone();
        scheduler.register(name, move |t: &FrameTick| {
            seen.borrow_mut().push((t.frame, t.elapsed));
            Ok(())
        });
    }
    scheduler.tick_at(0.5);
    scheduler.tick_at(0.75);
    let seen = seen.borrow();
    assert_eq!(seen.len(), 6);
    assert!(seen[..3].iter().all(|&(f, t)| f == 0 && t == 0.5));
    assert!(seen[3..].iter().all(|&(f, t)| f == 1 && t == 0.75));
}

#[test]
fn elapsed_never_goes_backwards() {
    let mut scheduler = FrameScheduler::new();
    let last = Rc::new(Cell::new(FrameTick::default()));
    let l = last.clone();
    scheduler.register("counter", move |t: &FrameTick| {
        l.set(*t);
        Ok(())
    });
    scheduler.tick_at(2.0);
    scheduler.tick_at(1.0);
    assert_eq!(last.get().elapsed, 2.0);
    assert_eq!(last.get().delta, 0.0);
    scheduler.tick_at(f32::NAN);
    assert_eq!(last.get().elapsed, 2.0);
    scheduler.tick_at(2.5);
    assert_eq!(last.get().delta, 0.5);
}

#[test]
fn failing_animator_is_skipped_and_others_still_run() {
    let mut scheduler = FrameScheduler::new();
    let before = counter(&mut scheduler, "before");
    scheduler.register("flaky", |t: &FrameTick| {
        if t.frame % 2 == 0 {
            Err(SceneError::AnimatorUnavailable("flaky"))
        } else {
            Ok(())
        }
    });
    let after = counter(&mut scheduler, "after");

    let r0 = scheduler.tick_at(0.1);
    assert_eq!((r0.ran, r0.skipped), (2, 1));
    let r1 = scheduler.tick_at(0.2);
    assert_eq!((r1.ran, r1.skipped), (3, 0));
    for i in 0..300 {
        scheduler.tick_at(0.3 + i as f32 * 0.016);
    }
    assert_eq!(before.get(), 302);
    assert_eq!(after.get(), 302);
}

#[test]
fn no_callbacks_after_unmount() {
    let mut scheduler = FrameScheduler::new();
    let count = counter(&mut scheduler, "counter");
    for i in 0..3 {
        scheduler.tick_at(i as f32 / 60.0);
    }
    assert_eq!(count.get(), 3);
    scheduler.unmount();
    assert_eq!(scheduler.animator_count(), 0);
    for i in 3..10 {
        let report = scheduler.tick_at(i as f32 / 60.0);
        assert_eq!(report.ran, 0);
    }
    assert_eq!(scheduler.tick().ran, 0);
    assert_eq!(count.get(), 3);
}

#[test]
fn deregistering_one_animator_leaves_the_rest() {
    let mut scheduler = FrameScheduler::new();
    let keep = counter(&mut scheduler, "keep");
    let drop_count = Rc::new(Cell::new(0));
    let d = drop_count.clone();
    let id = scheduler.register("drop", move |_: &FrameTick| {
        d.set(d.get() + 1);
        Ok(())
    });
    scheduler.tick_at(0.0);
    assert!(scheduler.deregister(id));
    assert!(!scheduler.deregister(id));
    scheduler.tick_at(0.1);
    assert_eq!(keep.get(), 2);
    assert_eq!(drop_count.get(), 1);
    assert_eq!(scheduler.animator_names().collect::<Vec<_>>(), vec!["keep"]);
}

#[test]
fn wall_clock_tick_requires_start() {
    let mut scheduler = FrameScheduler::new();
    let count = counter(&mut scheduler, "counter");
    assert_eq!(scheduler.tick().ran, 0);
    scheduler.start();
    assert!(scheduler.is_running());
    assert_eq!(scheduler.tick().ran, 1);
    assert!(scheduler.last_elapsed() >= 0.0);
    assert_eq!(count.get(), 1);
}
