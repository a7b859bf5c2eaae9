use glam::Mat4;
use orbitfield_kernel::CameraRig;

/// View and projection matrices for a camera that looks down -Z.
///
/// The rig never rotates, so the view is a pure inverse translation.
pub trait CameraProjection {
    fn view_matrix(&self) -> Mat4;
    fn projection_matrix(&self) -> Mat4;

    fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

impl CameraProjection for CameraRig {
    fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(-self.position)
    }

    fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn project(rig: &CameraRig, point: Vec3) -> Vec3 {
        rig.view_projection().project_point3(point)
    }

    #[test]
    fn point_ahead_of_camera_lands_at_screen_center() {
        let rig = CameraRig::default();
        let ndc = project(&rig, Vec3::new(0.0, 0.0, 0.0));
        assert!(ndc.x.abs() < 1e-6);
        assert!(ndc.y.abs() < 1e-6);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn camera_drift_shifts_the_view() {
        let mut rig = CameraRig::default();
        rig.position.x += 1.0;
        let ndc = project(&rig, Vec3::ZERO);
        // moving the camera right moves the world left on screen
        assert!(ndc.x < 0.0);
    }

    #[test]
    fn far_points_are_clipped() {
        let rig = CameraRig::default();
        let ndc = project(&rig, Vec3::new(0.0, 0.0, -200.0));
        assert!(ndc.z > 1.0);
    }

    #[test]
    fn view_projection_is_finite() {
        let vp = CameraRig::default().view_projection();
        assert!(vp.to_cols_array().iter().all(|v| v.is_finite()));
    }
}
