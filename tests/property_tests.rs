//! Property-based tests for pricing, lifecycle and history.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use proptest::prelude::*;
use waybill::builder::ShipmentDraft;
use waybill::core::{
    advance, cancel, DeliverySchedule, FieldValue, ShipmentKind, ShipmentStatus, Tariff,
};
use waybill::{EngineConfig, Repository, ShipmentError};

#[derive(Clone, Debug)]
enum Mutation {
    Weight(f64),
    Fragile(bool),
    Description(Option<String>),
    Advance,
    Cancel,
}

prop_compose! {
    fn arbitrary_kind()(variant in 0..3u8) -> ShipmentKind {
        match variant {
            0 => ShipmentKind::Express,
            1 => ShipmentKind::Standard,
            _ => ShipmentKind::Economy,
        }
    }
}

prop_compose! {
    fn arbitrary_status()(index in 0..6usize) -> ShipmentStatus {
        ShipmentStatus::ALL[index]
    }
}

fn arbitrary_mutation() -> impl Strategy<Value = Mutation> {
    prop_oneof![
        (0.1..1000.0f64).prop_map(Mutation::Weight),
        any::<bool>().prop_map(Mutation::Fragile),
        prop::option::of("[a-z]{1,8}").prop_map(Mutation::Description),
        Just(Mutation::Advance),
        Just(Mutation::Cancel),
    ]
}

fn repository() -> Repository {
    Repository::with_distance_model(EngineConfig::default(), |_: &str, _: &str| 100.0)
}

fn draft(kind: ShipmentKind, weight_kg: f64) -> ShipmentDraft {
    ShipmentDraft::builder()
        .kind(kind)
        .sender("Ana Torres")
        .recipient("Luis Pardo")
        .origin("Av. Central 100")
        .destination("Calle 9 #12")
        .weight_kg(weight_kg)
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn cost_is_non_negative_and_increasing_in_weight(
        kind in arbitrary_kind(),
        weight in 0.0..1000.0f64,
        extra in 0.01..100.0f64,
        distance in 0.0..5000.0f64,
    ) {
        let tariff = Tariff::default();
        let lighter = tariff.compute_cost(kind, weight, distance);
        let heavier = tariff.compute_cost(kind, weight + extra, distance);
        prop_assert!(lighter >= 0.0);
        prop_assert!(heavier > lighter);
    }

    #[test]
    fn estimate_is_non_decreasing_in_distance(
        kind in arbitrary_kind(),
        distance in 0.0..5000.0f64,
        extra in 0.0..5000.0f64,
    ) {
        let schedule = DeliverySchedule::default();
        prop_assert!(
            schedule.estimate_days(kind, distance) <= schedule.estimate_days(kind, distance + extra)
        );
    }

    #[test]
    fn faster_services_arrive_sooner(distance in 0.0..5000.0f64) {
        let schedule = DeliverySchedule::default();
        let express = schedule.estimate_days(ShipmentKind::Express, distance);
        let standard = schedule.estimate_days(ShipmentKind::Standard, distance);
        let economy = schedule.estimate_days(ShipmentKind::Economy, distance);
        prop_assert!(express < standard);
        prop_assert!(standard < economy);
    }

    #[test]
    fn terminal_states_reject_every_action(status in arbitrary_status()) {
        if status.is_final() {
            prop_assert!(advance(status).is_err());
            prop_assert!(cancel(status).is_err());
        } else {
            let step = advance(status).unwrap();
            prop_assert_eq!(Some(step.to), status.next());
            prop_assert_eq!(cancel(status).unwrap().to, ShipmentStatus::Cancelled);
        }
    }

    #[test]
    fn discount_stays_within_cost(
        kind in arbitrary_kind(),
        weight in 0.1..500.0f64,
        mutations in prop::collection::vec(arbitrary_mutation(), 0..10),
    ) {
        let repository = repository();
        let id = repository.create(draft(kind, weight)).unwrap().id();
        for mutation in mutations {
            let _ = apply(&repository, id, mutation);
            let breakdown = repository.discount(id).unwrap();
            prop_assert!(breakdown.discount >= 0.0);
            prop_assert!(breakdown.discount <= breakdown.original);
            prop_assert!((breakdown.total - (breakdown.original - breakdown.discount)).abs() < 1e-9);
        }
    }

    #[test]
    fn undo_and_redo_walk_the_whole_timeline(
        kind in arbitrary_kind(),
        weight in 0.1..500.0f64,
        mutations in prop::collection::vec(arbitrary_mutation(), 0..20),
    ) {
        let repository = repository();
        let created = repository.create(draft(kind, weight)).unwrap();
        let id = created.id();

        let accepted = mutations
            .into_iter()
            .filter(|mutation| apply(&repository, id, mutation.clone()).is_ok())
            .count();
        let last = repository.get(id).unwrap();
        prop_assert_eq!(repository.history(id).unwrap().entries.len(), accepted + 1);

        for _ in 0..accepted {
            repository.undo(id).unwrap();
        }
        prop_assert_eq!(repository.get(id).unwrap(), created);
        prop_assert_eq!(repository.undo(id), Err(ShipmentError::NothingToUndo));

        for _ in 0..accepted {
            repository.redo(id).unwrap();
        }
        prop_assert_eq!(repository.get(id).unwrap(), last);
        prop_assert_eq!(repository.redo(id), Err(ShipmentError::NothingToRedo));
    }

    #[test]
    fn recording_after_undo_discards_the_future(
        weights in prop::collection::vec(0.1..1000.0f64, 2..8),
        undos in 1..8usize,
        replacement in 0.1..1000.0f64,
    ) {
        let repository = repository();
        let id = repository.create(draft(ShipmentKind::Economy, 1.0)).unwrap().id();
        for weight in &weights {
            repository.modify(id, FieldValue::Weight(*weight)).unwrap();
        }

        let undos = undos.min(weights.len());
        for _ in 0..undos {
            repository.undo(id).unwrap();
        }
        repository.modify(id, FieldValue::Weight(replacement)).unwrap();

        let history = repository.history(id).unwrap();
        prop_assert_eq!(history.entries.len(), weights.len() - undos + 2);
        prop_assert!(!history.can_redo);
        prop_assert_eq!(repository.redo(id), Err(ShipmentError::NothingToRedo));
        prop_assert_eq!(repository.get(id).unwrap().weight_kg(), replacement);
    }
}

fn apply(
    repository: &Repository,
    id: waybill::ShipmentId,
    mutation: Mutation,
) -> Result<(), ShipmentError> {
    match mutation {
        Mutation::Weight(weight) => repository.modify(id, FieldValue::Weight(weight)),
        Mutation::Fragile(fragile) => repository.modify(id, FieldValue::Fragile(fragile)),
        Mutation::Description(description) => {
            repository.modify(id, FieldValue::Description(description))
        }
        Mutation::Advance => repository.advance(id),
        Mutation::Cancel => repository.cancel(id),
    }
    .map(|_| ())
}
