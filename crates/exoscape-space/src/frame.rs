//! Per-tick animation over pre-generated buffers.
//!
//! Every function here is a pure recomputation from elapsed time and camera
//! position. Nothing allocates; the `update_*` functions overwrite caller-owned
//! slices and report how many entries actually changed.

use glam::{Quat, Vec3};

use crate::galaxy::StarBucket;
use crate::haze::HazePatch;

/// Smallest change worth writing back to a render buffer.
pub const WRITE_EPSILON: f32 = 0.001;

/// Camera distance at which haze opacity reaches its unscaled value.
const HAZE_FADE_DISTANCE: f32 = 250.0;
const HAZE_FADE_DIVISOR: f32 = 2.5;

/// Rotation of the galaxy and planet groups about +Y after `elapsed` seconds.
pub fn group_rotation(elapsed: f32, rotation_speed: f32) -> f32 {
    elapsed * rotation_speed
}

/// World orientation of the tilted galaxy group spun by `rotation` radians.
pub fn group_transform(tilt: f32, rotation: f32) -> Quat {
    Quat::from_rotation_x(tilt) * Quat::from_rotation_y(rotation)
}

/// World orientation of the haze field: tilted with the galaxy, never spun.
pub fn haze_transform(tilt: f32) -> Quat {
    Quat::from_rotation_x(tilt)
}

/// Spin of each planet body about its own axis.
pub fn planet_spin(elapsed: f32, spin_speed: f32) -> f32 {
    elapsed * spin_speed
}

/// Camera-distance zoom factor for galaxy point sprites, in `[1, max_multiplier]`.
pub fn zoom_factor(camera_distance: f32, base_distance: f32, max_multiplier: f32) -> f32 {
    if base_distance <= 0.0 {
        return 1.0;
    }
    (camera_distance / base_distance).clamp(1.0, max_multiplier.max(1.0))
}

/// Point-size settings shared by every galaxy bucket.
#[derive(Clone, Copy, Debug)]
pub struct PointSizing {
    /// Size of a multiplier-1 point at the base distance.
    pub core_base_size: f32,
    /// Camera distance below which points stop shrinking.
    pub base_distance: f32,
    /// Upper bound of the zoom factor.
    pub max_multiplier: f32,
}

impl PointSizing {
    /// Point size of a bucket with `bucket_multiplier` seen from `camera_distance`.
    pub fn size(&self, camera_distance: f32, bucket_multiplier: f32) -> f32 {
        self.core_base_size
            * zoom_factor(camera_distance, self.base_distance, self.max_multiplier)
            * bucket_multiplier
    }
}

/// Rewrite `sizes[i]` for `buckets[i]`. Returns the number of sizes written.
pub fn update_point_sizes(
    sizes: &mut [f32],
    buckets: &[StarBucket],
    sizing: &PointSizing,
    camera_distance: f32,
) -> usize {
    let mut written = 0;
    for (size, bucket) in sizes.iter_mut().zip(buckets) {
        let target = sizing.size(camera_distance, bucket.size_multiplier);
        if (target - *size).abs() > WRITE_EPSILON {
            *size = target;
            written += 1;
        }
    }
    written
}

/// Opacity of a haze patch `distance` away from the camera.
pub fn haze_opacity(distance: f32, max_opacity: f32) -> f32 {
    let scaled = (distance / HAZE_FADE_DISTANCE) / HAZE_FADE_DIVISOR;
    (max_opacity * scaled * scaled).clamp(0.0, max_opacity.max(0.0))
}

/// Rewrite `opacity[i]` for `patches[i]`, measuring distance from the patch's
/// world position (`transform` applied to its local position) to `camera`.
/// Returns the number of opacities written.
pub fn update_haze_opacity(
    opacity: &mut [f32],
    patches: &[HazePatch],
    transform: Quat,
    camera: Vec3,
    max_opacity: f32,
) -> usize {
    let mut written = 0;
    for (value, patch) in opacity.iter_mut().zip(patches) {
        let world = transform * Vec3::from_array(patch.position);
        let target = haze_opacity(world.distance(camera), max_opacity);
        if (target - *value).abs() > WRITE_EPSILON {
            *value = target;
            written += 1;
        }
    }
    written
}
