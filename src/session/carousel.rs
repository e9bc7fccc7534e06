//! Carousel ticker — advances the placeholder image rotation on a fixed
//! period while the Result phase is active and no media has arrived.
//!
//! The orchestrator spawns one ticker per Result entry, capturing the
//! carousel epoch at arm time.  Each tick takes the state lock once and
//! exits without mutating anything when the epoch is stale (a reset or a
//! newer arming happened) or when the active predicate no longer holds
//! (media arrived).  Orphaned ticks can therefore never touch a stale
//! session.

use std::time::Duration;

use crate::session::state::SharedState;

/// Run the carousel ticker until it disarms.
///
/// * `state`       — shared session state.
/// * `period`      — time between advances.
/// * `image_count` — size of the fixed placeholder image set; the index
///                   wraps modulo this.
/// * `epoch`       — carousel epoch captured when the ticker was armed.
///
/// The first advance happens one full `period` after arming: the interval's
/// immediate initial tick is consumed before the loop.
pub async fn run_carousel(state: SharedState, period: Duration, image_count: usize, epoch: u64) {
    if image_count == 0 {
        return;
    }

    let mut interval = tokio::time::interval(period);
    // interval fires immediately on the first call; skip that tick so the
    // index stays at its starting value for a full period.
    interval.tick().await;

    loop {
        interval.tick().await;

        let mut st = state.lock().unwrap();
        if st.carousel_epoch != epoch || !st.carousel_active() {
            log::debug!("carousel: disarmed (epoch {epoch})");
            return;
        }
        st.carousel_index = (st.carousel_index + 1) % image_count;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
