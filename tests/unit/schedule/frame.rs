use super::*;

#[derive(Default)]
struct CountingHost {
    requests: usize,
}

impl TickHost for CountingHost {
    fn request_frame(&mut self) {
        self.requests += 1;
    }
}

#[test]
fn new_scheduler_is_primed_for_the_initial_frame() {
    let mut s = FrameScheduler::new();
    let work = s.begin_frame().expect("initial frame must be pending");
    assert!(work.rebuild_geometry);
    assert!(s.begin_frame().is_none());
}

#[test]
fn notifications_coalesce_into_one_frame_request() {
    let mut s = FrameScheduler::new();
    let mut host = CountingHost::default();
    let _ = s.begin_frame();

    s.notify_scroll(&mut host);
    s.notify_scroll(&mut host);
    s.notify_resize(&mut host);
    s.notify_scroll(&mut host);
    assert_eq!(host.requests, 1);

    let work = s.begin_frame().unwrap();
    assert!(work.rebuild_geometry);
    assert!(s.begin_frame().is_none());

    // A new quiet period requests exactly one more frame.
    s.notify_scroll(&mut host);
    assert_eq!(host.requests, 2);
}

#[test]
fn scroll_alone_does_not_owe_a_geometry_rebuild() {
    let mut s = FrameScheduler::new();
    let mut host = CountingHost::default();
    let _ = s.begin_frame();

    s.notify_scroll(&mut host);
    let work = s.begin_frame().unwrap();
    assert!(!work.rebuild_geometry);
}

#[test]
fn resize_marks_geometry_dirty_until_the_next_frame() {
    let mut s = FrameScheduler::new();
    let mut host = CountingHost::default();
    let _ = s.begin_frame();

    s.notify_resize(&mut host);
    assert!(s.begin_frame().unwrap().rebuild_geometry);

    s.notify_scroll(&mut host);
    assert!(!s.begin_frame().unwrap().rebuild_geometry);
}

#[test]
fn disable_is_idempotent_and_final() {
    let mut s = FrameScheduler::new();
    let mut host = CountingHost::default();

    s.disable();
    s.disable();
    assert!(!s.is_enabled());
    assert!(s.begin_frame().is_none());

    s.notify_scroll(&mut host);
    s.notify_resize(&mut host);
    assert_eq!(host.requests, 0);
    assert!(s.begin_frame().is_none());
}
