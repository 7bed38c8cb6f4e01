use glam::Vec3;

/// World-space pose used for spawn points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position in world coordinates.
    pub position: Vec3,
    /// Yaw rotation in degrees.
    pub yaw: f32,
    /// Pitch rotation in degrees.
    pub pitch: f32,
}

impl Transform {
    /// Pose at the given position with no rotation.
    pub fn from_xyz(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}
