//! Mapping from cumulative hits to the damage-state image.

/// Ordered damage-state images. Index advances every `hits_per_stage` hits and
/// saturates at the last image.
#[derive(Clone, Debug)]
pub struct DamageImageSet {
    images: Vec<String>,
    hits_per_stage: u32,
}

impl DamageImageSet {
    pub fn new(images: Vec<String>, hits_per_stage: u32) -> Self {
        Self {
            images,
            hits_per_stage: hits_per_stage.max(1),
        }
    }

    pub fn last_index(&self) -> usize {
        self.images.len().saturating_sub(1)
    }

    pub fn index_for(&self, damage: u32) -> usize {
        ((damage / self.hits_per_stage) as usize).min(self.last_index())
    }

    pub fn image(&self, index: usize) -> Option<&str> {
        self.images.get(index).map(String::as_str)
    }

    /// True once `damage` reaches the final damage state.
    pub fn is_destroyed(&self, damage: u32) -> bool {
        self.index_for(damage) == self.last_index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five() -> DamageImageSet {
        DamageImageSet::new((0..5).map(|i| format!("pc{i}")).collect(), 3)
    }

    #[test]
    fn index_is_floor_div_clamped() {
        let set = five();
        for damage in 0..40u32 {
            let expected = ((damage / 3) as usize).min(4);
            assert_eq!(set.index_for(damage), expected, "damage {damage}");
        }
    }

    #[test]
    fn index_never_decreases() {
        let set = five();
        let mut prev = 0;
        for damage in 0..100u32 {
            let idx = set.index_for(damage);
            assert!(idx >= prev);
            prev = idx;
        }
    }

    #[test]
    fn destroyed_exactly_at_last_stage() {
        let set = five();
        assert_eq!(set.image(set.index_for(3)), Some("pc1"));
        assert!(!set.is_destroyed(11));
        assert!(set.is_destroyed(12));
        assert_eq!(set.image(set.index_for(15)), Some("pc4"));
    }

    #[test]
    fn single_image_set_is_destroyed_immediately() {
        let set = DamageImageSet::new(vec!["only".into()], 3);
        assert!(set.is_destroyed(0));
        assert_eq!(set.last_index(), 0);
    }
}
