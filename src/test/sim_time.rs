use crate::sim::SimTime;

#[test]
fn sim_time_unit_conversions() {
    assert_eq!(SimTime::from_micros(1), SimTime(1_000));
    assert_eq!(SimTime::from_millis(1), SimTime(1_000_000));
    assert_eq!(SimTime::from_secs(1), SimTime(1_000_000_000));
}

#[test]
fn sim_time_unit_conversions_saturate_on_overflow() {
    assert_eq!(SimTime::from_micros(u64::MAX), SimTime(u64::MAX));
    assert_eq!(SimTime::from_millis(u64::MAX), SimTime(u64::MAX));
    assert_eq!(SimTime::from_secs(u64::MAX), SimTime(u64::MAX));
}

#[test]
fn sim_time_from_secs_f64_rounds_to_nearest_nanosecond() {
    assert_eq!(SimTime::from_secs_f64(0.5), SimTime(500_000_000));
    // 1000 m / 2e8 m/s: the float quotient is not exactly 5e-6, rounding
    // must still land on the exact nanosecond value.
    assert_eq!(SimTime::from_secs_f64(1_000.0 / 2e8), SimTime(5_000));
    assert_eq!(SimTime::from_secs_f64(0.0), SimTime::ZERO);
}
