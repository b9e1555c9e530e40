// Stay arithmetic: night counts and totals
use chrono::{DateTime, Utc};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

// Ceiling of the stay length in whole days. Not floored at zero: a check-out
// before check-in yields zero or a negative count.
pub fn nights_between(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> i64 {
    let diff_ms = (check_out - check_in).num_milliseconds();
    let whole_days = diff_ms / MILLIS_PER_DAY;
    if diff_ms % MILLIS_PER_DAY > 0 {
        whole_days + 1
    } else {
        whole_days
    }
}

pub fn stay_total(nights: i64, price_per_night: f64) -> f64 {
    nights as f64 * price_per_night
}
