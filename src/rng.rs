//! Tiny randomness helpers for sound selection and shake jitter.

/// Uniform sample in `[0, 1)`.
#[cfg(feature = "rng")]
pub fn random_unit() -> f64 {
    let mut buf = [0u8; 4];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u32::from_le_bytes(buf) as f64 / (u32::MAX as f64 + 1.0),
        Err(e) => {
            log::debug!("getrandom failed ({e}), using clock fallback");
            fallback_unit()
        }
    }
}

#[cfg(not(feature = "rng"))]
pub fn random_unit() -> f64 {
    fallback_unit()
}

// Linear congruential step over a clock seed; good enough for picking sounds.
fn fallback_unit() -> f64 {
    use std::cell::Cell;
    thread_local! {
        static STATE: Cell<u32> = const { Cell::new(0) };
    }
    STATE.with(|s| {
        let seed = if s.get() == 0 { clock_seed() } else { s.get() };
        let next = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        s.set(next);
        next as f64 / (u32::MAX as f64 + 1.0)
    })
}

fn clock_seed() -> u32 {
    #[cfg(target_arch = "wasm32")]
    {
        let now = web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0);
        (now * 1000.0) as u64 as u32 | 1
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.subsec_nanos())
            .unwrap_or(1)
            | 1
    }
}

/// Map a unit sample onto `0..len`. `len == 0` yields 0.
pub fn index_from_unit(unit: f64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    ((unit * len as f64).floor() as usize).min(len - 1)
}

pub fn random_index(len: usize) -> usize {
    index_from_unit(random_unit(), len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_from_unit_covers_range() {
        assert_eq!(index_from_unit(0.0, 5), 0);
        assert_eq!(index_from_unit(0.19, 5), 0);
        assert_eq!(index_from_unit(0.2, 5), 1);
        assert_eq!(index_from_unit(0.999_999, 5), 4);
        assert_eq!(index_from_unit(1.0, 5), 4);
        assert_eq!(index_from_unit(0.5, 0), 0);
    }

    #[test]
    fn random_unit_stays_in_range() {
        for _ in 0..200 {
            let u = random_unit();
            assert!((0.0..1.0).contains(&u), "{u}");
        }
        for _ in 0..200 {
            assert!(random_index(5) < 5);
        }
    }
}
