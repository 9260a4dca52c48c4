//! Debug reading group: fifteen unrelated diagnostic values.

use std::collections::BTreeMap;

use rand::Rng;
use robodeck_common::consts::{DEBUG_FIELD_COUNT, DEBUG_FIELD_MAX, DEBUG_FIELD_PRECISION};
use tracing::trace;

use crate::jitter::generate_random;

/// Draw a fresh `DEBUG_1 … DEBUG_15` set. Nothing carries over between calls.
pub fn debug_data<R: Rng + ?Sized>(rng: &mut R) -> BTreeMap<String, f64> {
    let data: BTreeMap<String, f64> = (1..=DEBUG_FIELD_COUNT)
        .map(|i| {
            (
                format!("DEBUG_{i}"),
                generate_random(rng, 0.0, DEBUG_FIELD_MAX, DEBUG_FIELD_PRECISION),
            )
        })
        .collect();
    trace!(fields = data.len(), "Generated debug data");
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn fifteen_fields_in_range() {
        let mut rng = SmallRng::seed_from_u64(7);
        let data = debug_data(&mut rng);
        assert_eq!(data.len(), 15);
        for i in 1..=15 {
            let v = data[&format!("DEBUG_{i}")];
            assert!((0.0..=20.0).contains(&v));
        }
        assert!(!data.contains_key("DEBUG_0"));
        assert!(!data.contains_key("DEBUG_16"));
    }
}
