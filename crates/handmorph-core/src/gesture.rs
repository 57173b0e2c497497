//! Hand-landmark classification: two-hand scale and the closed-fists trigger.
//!
//! Input comes from an external hand tracker as normalized image-space
//! landmarks (MediaPipe layout, 21 per hand). Only the x/y plane is used for
//! distances; z is carried but ignored.

use glam::{Vec2, Vec3};

use crate::config::{GestureConfig, HAND_LANDMARKS};
use crate::error::GestureError;
use crate::math::map_linear;

/// One tracked hand: 21 ordered landmarks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandLandmarks {
    points: [Vec3; HAND_LANDMARKS],
}

impl HandLandmarks {
    pub fn new(points: [Vec3; HAND_LANDMARKS]) -> Self {
        Self { points }
    }

    pub fn from_slice(points: &[Vec3]) -> Result<Self, GestureError> {
        let points: [Vec3; HAND_LANDMARKS] =
            points.try_into().map_err(|_| GestureError::LandmarkCount {
                expected: HAND_LANDMARKS,
                found: points.len(),
            })?;
        Ok(Self { points })
    }

    /// Split a flat `[x, y, z, x, y, z, ...]` buffer into `hands` hands.
    pub fn from_flat(values: &[f32], hands: usize) -> Result<Vec<Self>, GestureError> {
        let stride = HAND_LANDMARKS * 3;
        if hands.checked_mul(stride) != Some(values.len()) {
            return Err(GestureError::FlatBufferLength {
                len: values.len(),
                hands,
            });
        }
        values
            .chunks_exact(stride)
            .map(|hand| {
                let points: Vec<Vec3> = hand.chunks_exact(3).map(Vec3::from_slice).collect();
                Self::from_slice(&points)
            })
            .collect()
    }

    pub fn points(&self) -> &[Vec3; HAND_LANDMARKS] {
        &self.points
    }

    /// Image-plane position of landmark `index`.
    #[inline]
    pub fn planar(&self, index: usize) -> Vec2 {
        self.points[index].truncate()
    }
}

/// Scale from the two knuckles' separation: linear remap, then the hard clamp.
pub fn scale_from_distance(distance: f32, config: &GestureConfig) -> f32 {
    map_linear(
        distance,
        config.distance_min,
        config.distance_max,
        config.scale_min,
        config.scale_max,
    )
    .clamp(config.scale_clamp_min, config.scale_clamp_max)
}

pub fn two_hand_scale(a: &HandLandmarks, b: &HandLandmarks, config: &GestureConfig) -> f32 {
    let distance = a
        .planar(config.knuckle_index)
        .distance(b.planar(config.knuckle_index));
    scale_from_distance(distance, config)
}

/// Fist heuristic: the middle fingertip is pulled in close to the wrist
/// relative to the palm length.
pub fn is_hand_closed(hand: &HandLandmarks, config: &GestureConfig) -> bool {
    let wrist = hand.planar(config.wrist_index);
    let tip_dist = hand.planar(config.tip_index).distance(wrist);
    let palm_dist = hand.planar(config.knuckle_index).distance(wrist);
    tip_dist < palm_dist * config.closed_ratio
}

/// Per-frame classifier output.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureFrame {
    /// False when the tracker produced no frame at all this tick.
    pub tracked: bool,
    pub hands: usize,
    /// Set only when exactly two hands are present.
    pub scale: Option<f32>,
    pub both_closed: Option<bool>,
    /// Rising edge of `both_closed`.
    pub explode: bool,
}

/// Stateful classifier. The only memory is last frame's both-closed flag.
pub struct GestureClassifier {
    config: GestureConfig,
    prev_closed: bool,
}

impl GestureClassifier {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            prev_closed: false,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn was_closed(&self) -> bool {
        self.prev_closed
    }

    /// Forget the last both-closed flag; the next closed frame is an edge.
    pub fn reset(&mut self) {
        self.prev_closed = false;
    }

    /// Classify one frame.
    ///
    /// `None` means the tracker had nothing this tick and leaves the edge
    /// memory untouched. Any hand count other than two resets it, so the
    /// next explosion needs a fresh close.
    pub fn classify(&mut self, hands: Option<&[HandLandmarks]>) -> GestureFrame {
        let Some(hands) = hands else {
            return GestureFrame::default();
        };

        let [a, b] = hands else {
            self.prev_closed = false;
            return GestureFrame {
                tracked: true,
                hands: hands.len(),
                ..GestureFrame::default()
            };
        };

        let scale = two_hand_scale(a, b, &self.config);
        let both_closed = is_hand_closed(a, &self.config) && is_hand_closed(b, &self.config);
        let explode = both_closed && !self.prev_closed;
        self.prev_closed = both_closed;

        GestureFrame {
            tracked: true,
            hands: 2,
            scale: Some(scale),
            both_closed: Some(both_closed),
            explode,
        }
    }
}
