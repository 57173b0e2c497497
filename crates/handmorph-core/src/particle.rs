use glam::Vec3;

/// SoA particle storage shared by every driver.
///
/// Allocated once; contents are overwritten in place on every template change
/// and every tick, never reallocated.
pub struct ParticleBuffer {
    pub count: usize,
    /// Live positions handed to the renderer.
    pub position: Vec<Vec3>,
    pub velocity: Vec<Vec3>,
    /// Active shape's anchor positions. Read-only during steady physics.
    pub target_pos: Vec<Vec3>,
}

impl ParticleBuffer {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            position: vec![Vec3::ZERO; count],
            velocity: vec![Vec3::ZERO; count],
            target_pos: vec![Vec3::ZERO; count],
        }
    }

    /// Buffer at rest on `points`: positions and targets both equal `points`.
    pub fn from_points(points: &[Vec3]) -> Self {
        Self {
            count: points.len(),
            position: points.to_vec(),
            velocity: vec![Vec3::ZERO; points.len()],
            target_pos: points.to_vec(),
        }
    }

    pub fn reset_velocities(&mut self) {
        self.velocity.fill(Vec3::ZERO);
    }

    /// Copy a new anchor set into `target_pos`. Extra or missing points are
    /// ignored; callers always pass exactly `count` points.
    pub fn set_targets(&mut self, points: &[Vec3]) {
        debug_assert_eq!(points.len(), self.count);
        let n = points.len().min(self.count);
        self.target_pos[..n].copy_from_slice(&points[..n]);
    }
}
