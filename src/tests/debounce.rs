use super::Debouncer;
use std::time::{Duration, Instant};

const QUIET: Duration = Duration::from_millis(200);

#[test]
fn test_fires_after_quiet_window() {
    let start = Instant::now();
    let mut debouncer = Debouncer::new(QUIET);

    debouncer.schedule(start, 80);

    assert_eq!(debouncer.poll(start + Duration::from_millis(199)), None);
    assert_eq!(debouncer.poll(start + QUIET), Some(80));
    assert!(!debouncer.is_pending());
    assert_eq!(debouncer.poll(start + QUIET * 2), None);
}

#[test]
fn test_new_event_restarts_window_and_wins() {
    let start = Instant::now();
    let mut debouncer = Debouncer::new(QUIET);

    debouncer.schedule(start, 80);
    debouncer.schedule(start + Duration::from_millis(150), 60);

    assert_eq!(debouncer.poll(start + QUIET), None);
    assert_eq!(
        debouncer.deadline(),
        Some(start + Duration::from_millis(350))
    );
    assert_eq!(debouncer.poll(start + Duration::from_millis(350)), Some(60));
}
