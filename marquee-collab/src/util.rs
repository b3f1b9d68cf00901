use chrono::Utc;
use crossbeam::atomic::AtomicCell;

static LAST_ID: AtomicCell<u64> = AtomicCell::new(0);

/// Returns an id based on the current time in milliseconds.
/// Ids issued in the same millisecond are bumped so every id is unique and increasing.
pub fn next_id() -> u64 {
    let now = Utc::now().timestamp_millis().max(0) as u64;

    loop {
        let last = LAST_ID.load();
        let next = now.max(last + 1);

        if LAST_ID.compare_exchange(last, next).is_ok() {
            return next;
        }
    }
}

#[cfg(test)]
pub fn random_string(length: usize) -> String {
    use rand::{distributions::Alphanumeric, thread_rng, Rng};

    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let ids: Vec<_> = (0..1000).map(|_| next_id()).collect();

        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }
}
