use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::sim::NodeId;

/// Deterministic pair in `[0, 1)` derived from a node id.
pub fn stable_unit_pair(id: NodeId) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / (u32::MAX as f64 + 1.0)) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / (u32::MAX as f64 + 1.0)) as f32;
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_unit_pair_is_deterministic() {
        assert_eq!(stable_unit_pair(NodeId(7)), stable_unit_pair(NodeId(7)));
    }

    #[test]
    fn test_stable_unit_pair_stays_in_unit_range() {
        for raw in 0..64 {
            let (x, y) = stable_unit_pair(NodeId(raw));
            assert!((0.0..1.0).contains(&x));
            assert!((0.0..1.0).contains(&y));
        }
    }
}
