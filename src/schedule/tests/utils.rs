use crate::flight::FlightInfo;
use crate::schedule::directory::Directory;
use crate::schedule::pool::{List, RecordPool};
use crate::time::Time;
use proptest::prelude::Strategy;
use proptest::prop_oneof;
use proptest::strategy::Just;

pub fn time(minutes: i64) -> Time {
    Time::try_from(minutes).unwrap()
}

pub fn info(minutes: i64, available: u32, capacity: u32) -> FlightInfo {
    FlightInfo {
        time: time(minutes),
        available,
        capacity,
    }
}

pub fn directory_with(pool_size: usize, cities: &[&str]) -> Directory {
    let mut directory = Directory::new(pool_size, 5);
    for city in cities {
        directory.add(city).unwrap();
    }
    directory
}

pub fn destinations(directory: &Directory) -> Vec<String> {
    directory
        .list_all()
        .map(|record| record.destination().to_string())
        .collect()
}

pub fn indices(pool: &RecordPool, list: List) -> Vec<usize> {
    pool.iter(list).map(|(id, _)| id.index()).collect()
}

pub fn assert_links(pool: &RecordPool) {
    assert_eq!(Ok(()), pool.check_links());
    assert_eq!(pool.len(), pool.free().count() + pool.active().count());
}

#[derive(Debug, Clone)]
pub enum Op {
    Add(&'static str),
    Remove(&'static str),
    AddFlight(&'static str, i64, i64),
    RemoveFlight(&'static str, i64),
    Schedule(&'static str, i64),
    Unschedule(&'static str, i64),
}

pub fn arb_city() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("Toronto"),
        Just("Ottawa"),
        Just("Montreal"),
        Just("Paris"),
    ]
}

pub fn arb_time() -> impl Strategy<Value = i64> {
    prop_oneof![Just(360i64), Just(600), Just(720), 0..1440i64]
}

pub fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arb_city().prop_map(Op::Add),
        arb_city().prop_map(Op::Remove),
        (arb_city(), arb_time(), 1..4i64).prop_map(|(c, t, cap)| Op::AddFlight(c, t, cap)),
        (arb_city(), arb_time()).prop_map(|(c, t)| Op::RemoveFlight(c, t)),
        (arb_city(), arb_time()).prop_map(|(c, t)| Op::Schedule(c, t)),
        (arb_city(), arb_time()).prop_map(|(c, t)| Op::Unschedule(c, t)),
    ]
}

pub fn apply(directory: &mut Directory, op: &Op) {
    let _ = match *op {
        Op::Add(city) => directory.add(city).map(drop),
        Op::Remove(city) => directory.remove(city),
        Op::AddFlight(city, t, cap) => directory.add_flight(city, t, cap),
        Op::RemoveFlight(city, t) => directory.remove_flight(city, t),
        Op::Schedule(city, t) => directory.schedule_seat(city, t).map(drop),
        Op::Unschedule(city, t) => directory.unschedule_seat(city, t),
    };
}
