//! Tree height estimation.

use rand::Rng;

use crate::map::{ElementKind, Tags};

/// Height used when a feature has no usable `height` tag, in meters.
pub const DEFAULT_TREE_HEIGHT: f64 = 10.0;

/// Range of the random scale applied to trees inside areas.
pub const AREA_HEIGHT_VARIANCE: (f64, f64) = (0.75, 1.25);

const METERS_PER_FOOT: f64 = 0.3048;
const METERS_PER_INCH: f64 = 0.0254;

/// Height of a tree belonging to a feature of the given kind.
///
/// Area members (forests, orchards) get a random factor in
/// [`AREA_HEIGHT_VARIANCE`] drawn from `rng`; nodes and way segments use the
/// parsed height as is. The result is always positive.
pub fn tree_height<R: Rng + ?Sized>(tags: &Tags, kind: ElementKind, rng: &mut R) -> f64 {
    let base = parse_height(tags, DEFAULT_TREE_HEIGHT);
    match kind {
        ElementKind::Area => {
            let (lo, hi) = AREA_HEIGHT_VARIANCE;
            base * rng.random_range(lo..=hi)
        }
        ElementKind::Node | ElementKind::WaySegment => base,
    }
}

/// Reads the `height` tag, returning `default` when it is absent or unusable.
pub fn parse_height(tags: &Tags, default: f64) -> f64 {
    tags.get("height")
        .and_then(parse_measure)
        .unwrap_or(default)
}

/// Parses a length in meters from values like `12`, `12 m`, `40 ft`, `40'`
/// or `6'6"`. Only finite positive lengths are accepted.
pub fn parse_measure(value: &str) -> Option<f64> {
    let value = value.trim();

    let meters = if let Some(number) = value.strip_suffix('m') {
        number.trim().parse::<f64>().ok()?
    } else if let Some(number) = value.strip_suffix("ft") {
        number.trim().parse::<f64>().ok()? * METERS_PER_FOOT
    } else if let Some((feet, rest)) = value.split_once('\'') {
        let feet = feet.trim().parse::<f64>().ok()?;
        let rest = rest.trim();
        let inches = if rest.is_empty() {
            0.0
        } else {
            rest.strip_suffix('"')?.trim().parse::<f64>().ok()?
        };
        feet * METERS_PER_FOOT + inches * METERS_PER_INCH
    } else {
        value.parse::<f64>().ok()?
    };

    (meters.is_finite() && meters > 0.0).then_some(meters)
}
