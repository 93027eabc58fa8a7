mod support;

use elevator::utilities::elevator_status::Behaviour;
use elevator::{ElevatorSettings, Report};

use support::Simulation;

fn building() -> Simulation {
    Simulation::new(ElevatorSettings {
        num_floors: 10,
        floor_height_m: 3.0,
        speed_mps: 1.5,
        entrance_s: 3,
        ..Default::default()
    })
}

#[test]
fn outside_call_from_ground_floor_follows_full_timeline() {
    let mut sim = building();
    sim.outside(4);
    sim.run_until_idle();

    assert_eq!(sim.events(), vec![
        (2000, Report::FloorPassed(2)),
        (4000, Report::FloorPassed(3)),
        (6000, Report::FloorPassed(4)),
        (6700, Report::DoorsOpened),
        (9700, Report::DoorsClosing),
        (10400, Report::DoorsClosed),
    ]);
    assert_eq!(sim.dispatcher.floor(), 4);
    assert!(sim.dispatcher.awaiting());
}

#[test]
fn inside_call_for_current_floor_is_ignored_immediately() {
    let mut sim = building();
    sim.outside(5);
    sim.run_until_idle();
    sim.clear_events();

    let now = sim.now();
    sim.inside(5);

    assert_eq!(sim.events(), vec![(now, Report::SameFloorInside(5))]);
    assert_eq!(sim.scheduled(), 0);
    assert!(sim.dispatcher.awaiting());
    assert_eq!(sim.dispatcher.floor(), 5);
}

#[test]
fn outside_call_for_current_floor_still_cycles_doors() {
    let mut sim = building();
    sim.outside(1);
    sim.run_until_idle();

    assert_eq!(sim.events(), vec![
        (700, Report::DoorsOpened),
        (3700, Report::DoorsClosing),
        (4400, Report::DoorsClosed),
    ]);
    assert_eq!(sim.stops(), vec![1]);
}

#[test]
fn inside_calls_are_served_before_earlier_outside_calls() {
    let mut sim = building();
    sim.outside(4);
    sim.advance_to(1000);
    sim.outside(2);
    sim.outside(8);
    sim.inside(9);
    sim.inside(3);
    assert_eq!(sim.dispatcher.pending().floors(), vec![9, 3, 2, 8]);

    sim.run_until_idle();

    assert_eq!(sim.stops(), vec![4, 9, 3, 2, 8]);
    assert_eq!(sim.dispatcher.floor(), 8);
    assert!(sim.dispatcher.pending().is_empty());
}

#[test]
fn calls_arriving_while_idle_but_queue_busy_are_held() {
    let mut sim = building();
    sim.outside(3);
    sim.outside(7);
    assert_eq!(sim.dispatcher.behaviour(), Behaviour::Moving);
    assert_eq!(sim.dispatcher.pending().floors(), vec![7]);

    sim.run_until_idle();
    assert_eq!(sim.stops(), vec![3, 7]);
}

#[test]
fn opening_doors_satisfies_every_pending_call_for_that_floor() {
    let mut sim = building();
    sim.outside(6);
    sim.advance_to(1000);
    sim.inside(6);
    sim.outside(6);
    sim.outside(3);

    sim.run_until_idle();

    assert_eq!(sim.stops(), vec![6, 3]);
    assert_eq!(sim.dispatcher.floor(), 3);
}

#[test]
fn call_admitted_after_doors_opened_gets_its_own_visit() {
    let mut sim = building();
    sim.outside(6);
    sim.advance_to(11000);
    assert_eq!(sim.dispatcher.behaviour(), Behaviour::DoorOpen);
    sim.outside(6);
    sim.run_until_idle();

    assert_eq!(sim.stops(), vec![6, 6]);
    let tail: Vec<(u64, Report)> = sim.events().into_iter().filter(|(t, _)| *t > 14400).collect();
    assert_eq!(tail, vec![
        (15100, Report::DoorsOpened),
        (18100, Report::DoorsClosing),
        (18800, Report::DoorsClosed),
    ]);
}

#[test]
fn held_same_floor_inside_call_chains_to_next_call() {
    let mut sim = building();
    sim.outside(4);
    sim.advance_to(7000);
    sim.inside(4);
    sim.outside(2);

    sim.run_until_idle();

    let events = sim.events();
    let same_floor = events.iter().position(|e| *e == (10400, Report::SameFloorInside(4)));
    assert!(same_floor.is_some());
    assert_eq!(events[same_floor.unwrap() + 1], (12400, Report::FloorPassed(3)));
    assert_eq!(sim.stops(), vec![4, 2]);
    assert_eq!(sim.dispatcher.floor(), 2);
}

#[test]
fn floor_passed_times_follow_height_and_speed() {
    let mut sim = Simulation::new(ElevatorSettings {
        floor_height_m: 2.5,
        speed_mps: 2.0,
        entrance_s: 1,
        ..Default::default()
    });
    sim.outside(6);
    sim.run_until_idle();

    let passed: Vec<(u64, Report)> = sim
        .events()
        .into_iter()
        .filter(|(_, r)| matches!(r, Report::FloorPassed(_)))
        .collect();
    let expected: Vec<(u64, Report)> = (1..=5u8)
        .map(|n| (n as u64 * 1250, Report::FloorPassed(1 + n)))
        .collect();
    assert_eq!(passed, expected);
    assert!(sim.events().contains(&(5 * 1250 + 700, Report::DoorsOpened)));
}

#[test]
fn downward_trip_reports_descending_floors() {
    let mut sim = building();
    sim.outside(4);
    sim.run_until_idle();
    sim.clear_events();

    let start = sim.now();
    sim.inside(2);
    sim.run_until_idle();

    assert_eq!(sim.events()[..2], [
        (start + 2000, Report::FloorPassed(3)),
        (start + 4000, Report::FloorPassed(2)),
    ]);
    assert_eq!(sim.dispatcher.floor(), 2);
}
