//! In-memory session state: accepted trial records and their observers.
//!
//! The store is the single owner of cross-trial data. UI layers subscribe
//! for change notifications instead of polling; every mutation notifies
//! synchronously, so derived views always reflect the latest accept/remove.

use tracing::info;

use crate::analysis::measure::cross_trial_fit;
use crate::analysis::stats::FitResult;
use crate::sim::interval::Interval;
use crate::sim::physics::Scenario;

/// Snapshot of one accepted trial. Append-only; removable by id.
#[derive(Clone, Debug)]
pub struct TrialRecord {
    pub id: u64,
    pub scenario: Scenario,
    pub preset_id: String,
    pub hanging_mass_kg: f64,
    pub force_mean_n: f64,
    pub acceleration_mps2: f64,
    pub force_window: Interval,
    pub velocity_window: Interval,
    pub noise_enabled: bool,
    pub seed: u32,
    pub recorded_at: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    TrialAccepted(u64),
    TrialRemoved(u64),
    Cleared,
}

pub type SubscriptionId = u64;

type Subscriber = Box<dyn FnMut(&SessionEvent)>;

/// Owner of the accepted-trial table with a subscribe/notify contract.
#[derive(Default)]
pub struct SessionStore {
    records: Vec<TrialRecord>,
    next_record_id: u64,
    next_subscription_id: u64,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, f: Subscriber) -> SubscriptionId {
        let id = self.next_subscription_id;
        self.next_subscription_id += 1;
        self.subscribers.push((id, f));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(sid, _)| *sid != id);
    }

    fn notify(&mut self, event: SessionEvent) {
        for (_, f) in self.subscribers.iter_mut() {
            f(&event);
        }
    }

    /// Append a record, assigning its id. Windows are stored normalized.
    #[allow(clippy::too_many_arguments)]
    pub fn accept_trial(
        &mut self,
        scenario: Scenario,
        preset_id: &str,
        hanging_mass_kg: f64,
        force_mean_n: f64,
        acceleration_mps2: f64,
        force_window: Interval,
        velocity_window: Interval,
        noise_enabled: bool,
        seed: u32,
        recorded_at: String,
    ) -> u64 {
        let id = self.next_record_id;
        self.next_record_id += 1;
        self.records.push(TrialRecord {
            id,
            scenario,
            preset_id: preset_id.to_string(),
            hanging_mass_kg,
            force_mean_n,
            acceleration_mps2,
            force_window: force_window.normalized(),
            velocity_window: velocity_window.normalized(),
            noise_enabled,
            seed,
            recorded_at,
        });
        info!(id, scenario = scenario.key(), "trial accepted");
        self.notify(SessionEvent::TrialAccepted(id));
        id
    }

    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        let removed = self.records.len() < before;
        if removed {
            self.notify(SessionEvent::TrialRemoved(id));
        }
        removed
    }

    pub fn clear(&mut self) {
        if !self.records.is_empty() {
            self.records.clear();
            self.notify(SessionEvent::Cleared);
        }
    }

    pub fn records(&self) -> &[TrialRecord] {
        &self.records
    }

    pub fn records_for(&self, scenario: Scenario) -> impl Iterator<Item = &TrialRecord> {
        self.records.iter().filter(move |r| r.scenario == scenario)
    }

    /// Force-vs-acceleration fit over the active scenario's records.
    pub fn fit_for(&self, scenario: Scenario) -> Option<FitResult> {
        let points: Vec<(f64, f64)> = self
            .records_for(scenario)
            .map(|r| (r.acceleration_mps2, r.force_mean_n))
            .collect();
        cross_trial_fit(&points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn accept(store: &mut SessionStore, scenario: Scenario, a: f64, f: f64) -> u64 {
        store.accept_trial(
            scenario,
            "standard",
            0.1,
            f,
            a,
            Interval::new(1.0, 1.5),
            Interval::new(1.0, 1.5),
            true,
            7,
            "2026-08-07T10:00:00".to_string(),
        )
    }

    #[test]
    fn accept_assigns_sequential_ids() {
        let mut store = SessionStore::new();
        let a = accept(&mut store, Scenario::CartOnly, 1.0, 1.0);
        let b = accept(&mut store, Scenario::CartOnly, 2.0, 2.0);
        assert_ne!(a, b);
        assert_eq!(store.records().len(), 2);
    }

    #[test]
    fn windows_are_stored_normalized() {
        let mut store = SessionStore::new();
        store.accept_trial(
            Scenario::CartOnly,
            "standard",
            0.1,
            1.0,
            1.0,
            Interval::new(2.0, 1.0),
            Interval::new(3.0, 0.5),
            false,
            0,
            String::new(),
        );
        let rec = &store.records()[0];
        assert!(rec.force_window.start_s <= rec.force_window.end_s);
        assert!(rec.velocity_window.start_s <= rec.velocity_window.end_s);
    }

    #[test]
    fn remove_by_id() {
        let mut store = SessionStore::new();
        let id = accept(&mut store, Scenario::CartOnly, 1.0, 1.0);
        accept(&mut store, Scenario::CartOnly, 2.0, 2.0);
        assert!(store.remove(id));
        assert!(!store.remove(id));
        assert_eq!(store.records().len(), 1);
    }

    #[test]
    fn fit_filters_by_scenario() {
        let mut store = SessionStore::new();
        accept(&mut store, Scenario::CartOnly, 1.0, 0.55);
        accept(&mut store, Scenario::CartOnly, 2.0, 1.1);
        accept(&mut store, Scenario::CartFriction, 5.0, 0.1);

        let fit = store.fit_for(Scenario::CartOnly).unwrap();
        assert_eq!(fit.count, 2);
        assert!((fit.slope - 0.55).abs() < 1e-9);
        // One friction record is not enough for a fit.
        assert!(store.fit_for(Scenario::CartFriction).is_none());
    }

    #[test]
    fn subscribers_see_every_mutation() {
        let seen: Rc<RefCell<Vec<SessionEvent>>> = Rc::default();
        let sink = seen.clone();
        let mut store = SessionStore::new();
        let sub = store.subscribe(Box::new(move |e| sink.borrow_mut().push(*e)));

        let id = accept(&mut store, Scenario::CartOnly, 1.0, 1.0);
        store.remove(id);
        accept(&mut store, Scenario::CartOnly, 2.0, 2.0);
        store.clear();

        let events = seen.borrow().clone();
        assert_eq!(events.len(), 4);
        assert_eq!(events[0], SessionEvent::TrialAccepted(id));
        assert_eq!(events[1], SessionEvent::TrialRemoved(id));
        assert!(matches!(events[2], SessionEvent::TrialAccepted(_)));
        assert_eq!(events[3], SessionEvent::Cleared);

        store.unsubscribe(sub);
        accept(&mut store, Scenario::CartOnly, 3.0, 3.0);
        assert_eq!(seen.borrow().len(), 4);
    }

    #[test]
    fn clear_on_empty_store_stays_silent() {
        let seen: Rc<RefCell<Vec<SessionEvent>>> = Rc::default();
        let sink = seen.clone();
        let mut store = SessionStore::new();
        store.subscribe(Box::new(move |e| sink.borrow_mut().push(*e)));
        store.clear();
        assert!(seen.borrow().is_empty());
    }
}
