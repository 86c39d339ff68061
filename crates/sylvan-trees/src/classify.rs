//! Species category and fruit classification from tags.

use glam::DVec2;

use crate::map::Tags;

/// Broad species category, which selects the tree shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TreeSpecies {
    Coniferous,
    BroadLeaved,
}

impl TreeSpecies {
    /// Fraction of the total height taken by the trunk.
    pub fn stem_ratio(self) -> f64 {
        match self {
            TreeSpecies::Coniferous => 0.3,
            TreeSpecies::BroadLeaved => 0.5,
        }
    }

    pub fn is_coniferous(self) -> bool {
        self == TreeSpecies::Coniferous
    }
}

/// Result of classifying one tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeClass {
    pub species: TreeSpecies,
    pub fruit: bool,
}

/// Classify a tree standing at `pos` that belongs to a feature with `tags`.
pub fn classify(tags: &Tags, pos: DVec2) -> TreeClass {
    TreeClass {
        species: species(tags, pos),
        fruit: is_fruit_tree(tags),
    }
}

/// Species from `wood`, then `type`, then `leaf_type`; ambiguous values fall
/// back to [`parity_choice`] on the x coordinate.
pub fn species(tags: &Tags, pos: DVec2) -> TreeSpecies {
    let explicit = tags.get("wood").or_else(|| tags.get("type"));

    let from_tags = match explicit {
        Some("broad_leaved" | "broad_leafed" | "deciduous") => Some(TreeSpecies::BroadLeaved),
        Some("coniferous") => Some(TreeSpecies::Coniferous),
        Some(_) => None,
        None => match tags.get("leaf_type") {
            Some("needleleaved") => Some(TreeSpecies::Coniferous),
            Some("broadleaved") => Some(TreeSpecies::BroadLeaved),
            _ => None,
        },
    };

    from_tags.unwrap_or_else(|| {
        if parity_choice(pos.x) {
            TreeSpecies::Coniferous
        } else {
            TreeSpecies::BroadLeaved
        }
    })
}

/// Orchards, and anything whose species names the genus *Malus*, bear fruit.
pub fn is_fruit_tree(tags: &Tags) -> bool {
    if tags.contains("landuse", "orchard") {
        return true;
    }
    tags.get("species")
        .is_some_and(|s| s.to_ascii_lowercase().contains("malus"))
}

/// Deterministic stand-in for a coin flip: true when the coordinate,
/// truncated toward zero, is even.
pub fn parity_choice(coordinate: f64) -> bool {
    (coordinate as i64) % 2 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64) -> DVec2 {
        DVec2::new(x, 0.0)
    }

    #[test]
    fn test_explicit_coniferous_ignores_position() {
        let tags = Tags::new().with("wood", "coniferous");
        for x in [0.0, 1.0, 2.5, 3.9, -7.0, 1001.0] {
            assert_eq!(species(&tags, at(x)), TreeSpecies::Coniferous);
        }
    }

    #[test]
    fn test_broad_leaved_synonyms() {
        for value in ["broad_leaved", "broad_leafed", "deciduous"] {
            let tags = Tags::new().with("wood", value);
            assert_eq!(species(&tags, at(0.0)), TreeSpecies::BroadLeaved, "{value}");
        }
    }

    #[test]
    fn test_type_is_fallback_for_wood() {
        let tags = Tags::new().with("type", "coniferous");
        assert_eq!(species(&tags, at(1.0)), TreeSpecies::Coniferous);

        // `wood` wins over `type`.
        let tags = Tags::new().with("wood", "deciduous").with("type", "coniferous");
        assert_eq!(species(&tags, at(0.0)), TreeSpecies::BroadLeaved);
    }

    #[test]
    fn test_leaf_type_used_when_wood_and_type_absent() {
        let tags = Tags::new().with("leaf_type", "needleleaved");
        assert_eq!(species(&tags, at(1.0)), TreeSpecies::Coniferous);
        let tags = Tags::new().with("leaf_type", "broadleaved");
        assert_eq!(species(&tags, at(2.0)), TreeSpecies::BroadLeaved);
    }

    #[test]
    fn test_mixed_uses_position_parity() {
        let tags = Tags::new().with("wood", "mixed");
        assert_eq!(species(&tags, at(4.7)), TreeSpecies::Coniferous);
        assert_eq!(species(&tags, at(5.2)), TreeSpecies::BroadLeaved);
    }

    #[test]
    fn test_untagged_is_deterministic() {
        let tags = Tags::new();
        let first = species(&tags, at(4.0));
        for _ in 0..10 {
            assert_eq!(species(&tags, at(4.0)), first);
        }
        assert_eq!(first, TreeSpecies::Coniferous);
    }

    #[test]
    fn test_parity_truncates_toward_zero() {
        assert!(parity_choice(0.9));
        assert!(parity_choice(-0.9));
        assert!(!parity_choice(-1.5));
        assert!(parity_choice(-2.1));
    }

    #[test]
    fn test_orchard_bears_fruit() {
        let tags = Tags::new().with("landuse", "orchard");
        assert!(classify(&tags, at(0.0)).fruit);
    }

    #[test]
    fn test_malus_species_bears_fruit() {
        assert!(is_fruit_tree(&Tags::new().with("species", "Malus domestica")));
        assert!(is_fruit_tree(&Tags::new().with("species", "malus sylvestris")));
        assert!(!is_fruit_tree(&Tags::new().with("species", "Quercus robur")));
        assert!(!is_fruit_tree(&Tags::new()));
    }

    #[test]
    fn test_stem_ratio() {
        assert_eq!(TreeSpecies::Coniferous.stem_ratio(), 0.3);
        assert_eq!(TreeSpecies::BroadLeaved.stem_ratio(), 0.5);
    }
}
