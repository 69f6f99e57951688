//! Rasterizer trait: fill regions in an image and re-encode it.

use crate::error::Result;
use crate::types::{BoundingBox, RedactedImage};

/// Image rasterization collaborator.
///
/// Given source image bytes and a list of regions, produces new image bytes
/// with the regions filled, re-encoded to the implementation's target
/// format. Pure CPU work, so the trait is synchronous.
pub trait Rasterizer: Send + Sync {
    /// Fill `regions` in the image and re-encode it.
    ///
    /// An empty region list still re-encodes, so callers get a uniform
    /// output format whether or not anything was redacted.
    fn redact(&self, image: &[u8], regions: &[BoundingBox]) -> Result<RedactedImage>;

    /// Name of this rasterizer (for logging).
    fn name(&self) -> &str;
}
