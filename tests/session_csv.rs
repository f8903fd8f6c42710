use cartlab::export::{CSV_HEADER, records_to_csv};
use cartlab::session::{SessionEvent, SessionStore};
use cartlab::sim::interval::Interval;
use cartlab::sim::physics::Scenario;
use std::cell::RefCell;
use std::rc::Rc;

fn accept(store: &mut SessionStore, scenario: Scenario, a: f64, f: f64) -> u64 {
    store.accept_trial(
        scenario,
        "standard",
        0.15,
        f,
        a,
        Interval::new(0.9, 1.7),
        Interval::new(1.7, 0.9),
        true,
        4242,
        "2026-08-07 11:30:00".to_string(),
    )
}

#[test]
fn accept_remove_refit_cycle() {
    let mut store = SessionStore::new();
    let a = accept(&mut store, Scenario::CartOnly, 1.0, 0.52);
    let b = accept(&mut store, Scenario::CartOnly, 2.0, 1.01);
    let c = accept(&mut store, Scenario::CartOnly, 3.0, 1.49);

    let fit = store.fit_for(Scenario::CartOnly).unwrap();
    assert_eq!(fit.count, 3);
    assert!(fit.slope > 0.4 && fit.slope < 0.6);

    store.remove(b);
    let fit = store.fit_for(Scenario::CartOnly).unwrap();
    assert_eq!(fit.count, 2);

    store.remove(a);
    assert!(store.fit_for(Scenario::CartOnly).is_none());
    assert_eq!(store.records().len(), 1);
    assert_eq!(store.records()[0].id, c);
}

#[test]
fn notifications_track_the_table() {
    let events: Rc<RefCell<Vec<SessionEvent>>> = Rc::default();
    let sink = events.clone();
    let mut store = SessionStore::new();
    store.subscribe(Box::new(move |e| sink.borrow_mut().push(*e)));

    let id = accept(&mut store, Scenario::CartFriction, 1.5, 2.0);
    store.remove(id);
    assert_eq!(
        events.borrow().as_slice(),
        &[
            SessionEvent::TrialAccepted(id),
            SessionEvent::TrialRemoved(id)
        ]
    );
}

#[test]
fn exported_csv_round_trips_the_table_shape() {
    let mut store = SessionStore::new();
    accept(&mut store, Scenario::CartOnly, 1.0, 0.52);
    accept(&mut store, Scenario::CartFriction, 2.0, 1.01);

    let csv = records_to_csv(store.records());
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], CSV_HEADER);
    for row in &lines[1..] {
        assert_eq!(row.split(',').count(), 13, "row: {row}");
    }
    assert!(lines[1].contains("\"cart-only\""));
    assert!(lines[2].contains("\"cart-friction\""));
    // The backward velocity window was normalized on accept.
    assert!(lines[1].contains(",0.9,1.7,"));
}
