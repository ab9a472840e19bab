use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Monotonic counter mixed into every generated id so two reports built
/// in the same process never collide even if the clock doesn't advance
/// between them.
static COUNTER: AtomicU64 = AtomicU64::new(0);

/// A short, opaque, process-unique report id: a counter plus a
/// xorshift64-scrambled timestamp, hex-encoded. Not a UUID — nothing
/// downstream parses its structure, it only needs to be stable enough to
/// key a `ReportCache` lookup.
pub fn generate_report_id() -> String {
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let scrambled = xorshift64(nanos ^ seq.wrapping_mul(0x9E3779B97F4A7C15));
    format!("rpt-{seq:x}-{scrambled:016x}")
}

fn xorshift64(mut x: u64) -> u64 {
    if x == 0 {
        x = 0xDEAD_BEEF_CAFE_F00D;
    }
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique_across_calls() {
        let a = generate_report_id();
        let b = generate_report_id();
        assert_ne!(a, b);
    }

    #[test]
    fn xorshift_never_produces_zero_from_zero_input() {
        assert_ne!(xorshift64(0), 0);
    }
}
