//! Past/upcoming show partitioning
//!
//! The instant to compare against is a parameter, so handlers pass the
//! current wall clock and tests pass a fixed one.

use chrono::NaiveDateTime;

use crate::models::ShowRecord;

/// Split `shows` around `now`. A show starting before `now` is past;
/// everything else, including a show starting exactly at `now`, is
/// upcoming.
pub fn partition(shows: Vec<ShowRecord>, now: NaiveDateTime) -> (Vec<ShowRecord>, Vec<ShowRecord>) {
    let mut past = Vec::new();
    let mut upcoming = Vec::new();

    for show in shows {
        if show.start_time < now {
            past.push(show);
        } else {
            upcoming.push(show);
        }
    }

    (past, upcoming)
}
