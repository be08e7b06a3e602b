//! Identifier-space arithmetic (C1): hashing keys/endpoints into the m-bit
//! ring and the modular interval test all routing and ownership decisions
//! reduce to.

use sha1::{Digest, Sha1};

/// A point on the ring. The ring itself is always `u64`-valued; the live
/// modulus is `2^m` for whatever `m` the owning node was configured with.
pub type RingId = u64;

/// `hash(s) = be_u64(SHA1(s)[0..8]) mod 2^m`.
pub fn hash(s: &str, m: u32) -> RingId {
    let digest = Sha1::digest(s.as_bytes());
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&digest[0..8]);
    let full = u64::from_be_bytes(buf);
    modulo(full, m)
}

/// Reduce `x` into `[0, 2^m)`. `m == 64` is a valid ring width (the full
/// range of `u64`) and must not overflow when computing `1u64 << m`.
pub fn modulo(x: u64, m: u32) -> RingId {
    if m >= 64 {
        x
    } else {
        x % (1u64 << m)
    }
}

/// `in_range(x, a, b, inclusive)`: does `x` lie on the clockwise arc from
/// `a` to `b`? When `a == b` the arc is the whole ring iff `inclusive`.
pub fn in_range(x: RingId, a: RingId, b: RingId, inclusive: bool) -> bool {
    if a == b {
        return inclusive;
    }
    if a < b {
        if inclusive {
            a < x && x <= b
        } else {
            a < x && x < b
        }
    } else {
        if inclusive {
            x > a || x <= b
        } else {
            x > a || x < b
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn hash_is_deterministic() {
        let a = hash("localhost:5000", 32);
        let b = hash("localhost:5000", 32);
        assert_eq!(a, b);
    }

    #[test]
    fn hash_respects_modulus() {
        let id = hash("some-key", 8);
        assert!(id < 256);
    }

    #[test]
    fn in_range_whole_ring_when_equal_and_inclusive() {
        assert!(in_range(42, 7, 7, true));
        assert!(!in_range(42, 7, 7, false));
    }

    #[test]
    fn in_range_straight_interval() {
        assert!(in_range(5, 1, 10, false));
        assert!(!in_range(10, 1, 10, false));
        assert!(in_range(10, 1, 10, true));
        assert!(!in_range(1, 1, 10, true));
    }

    #[test]
    fn in_range_wraparound_interval() {
        // arc from 250 to 5 on an 8-bit ring wraps past 255/0
        assert!(in_range(252, 250, 5, false));
        assert!(in_range(2, 250, 5, false));
        assert!(!in_range(6, 250, 5, false));
        assert!(in_range(5, 250, 5, true));
        assert!(!in_range(5, 250, 5, false));
    }

    #[test]
    fn in_range_is_exclusive_complement_of_reverse_arc() {
        let mut rng = rand::thread_rng();
        for _ in 0..2000 {
            let a: u16 = rng.gen();
            let b: u16 = rng.gen();
            let x: u16 = rng.gen();
            if a == b || x == a || x == b {
                continue;
            }
            let (a, b, x) = (a as u64, b as u64, x as u64);
            // x is strictly between a and b in exactly one of the two
            // possible clockwise directions.
            let forward = in_range(x, a, b, false);
            let backward = in_range(x, b, a, false);
            assert!(
                forward != backward,
                "a={a} b={b} x={x} forward={forward} backward={backward}"
            );
        }
    }
}
