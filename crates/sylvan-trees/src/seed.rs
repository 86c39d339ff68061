//! Deterministic per-feature random streams.
//!
//! Every source of randomness is derived from the owning feature's id, so the
//! same input always produces the same trees. Placement and rendering draw
//! from separate ChaCha streams of the same seed: rendering a feature never
//! shifts where its trees stand.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::map::FeatureId;

const PLACEMENT_STREAM: u64 = 0;
const RENDER_STREAM: u64 = 1;

/// RNG used to sample tree positions inside a feature.
pub fn placement_rng(id: FeatureId) -> ChaCha8Rng {
    feature_rng(id, PLACEMENT_STREAM)
}

/// RNG used for per-tree variation (height jitter, rotation) while rendering.
pub fn render_rng(id: FeatureId) -> ChaCha8Rng {
    feature_rng(id, RENDER_STREAM)
}

fn feature_rng(id: FeatureId, stream: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(id.0);
    rng.set_stream(stream);
    rng
}
