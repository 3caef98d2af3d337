//! Planar rectangular area light.
//!
//! The rectangle is centered on `origin` and spanned by `width_vector` and
//! `height_vector`; it emits from the side `direction` points to. Sampling
//! maps two uniform numbers straight onto the two edges, which is uniform
//! over the area for any parallelogram, so lights sheared by a
//! transformation keep sampling correctly.

use lumen_core::{Power, TriangleMesh, UniformSampler};
use lumen_math::{CoordinateFrame, Transformation, Vec3, DEGENERATE_EPSILON};

use crate::{AreaLight, LightError, LightResult, LightSettings, SurfaceElement};

/// A width vector whose component perpendicular to the facing direction is
/// shorter than this fraction of its length counts as parallel.
const PARALLEL_TOLERANCE: f32 = 1e-4;

/// Rectangular (after shearing, parallelogram) emitter.
#[derive(Debug, Clone, PartialEq)]
pub struct RectangularAreaLight {
    /// Center of the rectangle
    origin: Vec3,
    /// Full-length edge along the width
    width_vector: Vec3,
    /// Full-length edge along the height
    height_vector: Vec3,
    /// Unit facing direction
    direction: Vec3,
    width: f32,
    height: f32,
    number_of_samples: u32,
    power: Power,
    settings: LightSettings,
}

impl RectangularAreaLight {
    /// Create a light facing `direction`.
    ///
    /// The width is the length of `width_vector`. Any part of `width_vector`
    /// along `direction` is projected out, and the height edge is
    /// `normalize(direction × width_vector) · height`.
    pub fn new(
        center: Vec3,
        direction: Vec3,
        width_vector: Vec3,
        height: f32,
        power: Power,
    ) -> LightResult<Self> {
        if !(center.is_finite() && direction.is_finite() && width_vector.is_finite()) {
            return Err(LightError::InvalidGeometry(
                "light placement contains non-finite values".to_string(),
            ));
        }
        if !power.watts().is_finite() || power.watts() < 0.0 {
            return Err(LightError::InvalidPower(power.watts()));
        }

        let direction = unit_direction(direction, "facing direction")?;
        let width = width_vector.length();
        let (width_vector, height_vector) = orthogonal_edges(direction, width_vector, width, height)?;

        log::debug!(
            "Rectangular area light at {:?} facing {:?}: {} x {}, {}",
            center,
            direction,
            width,
            height,
            power
        );

        Ok(Self {
            origin: center,
            width_vector,
            height_vector,
            direction,
            width,
            height,
            number_of_samples: 1,
            power,
            settings: LightSettings::default(),
        })
    }

    /// Create a light at `center` facing toward `target`.
    pub fn facing_point(
        center: Vec3,
        target: Vec3,
        width_vector: Vec3,
        height: f32,
        power: Power,
    ) -> LightResult<Self> {
        if (target - center).length() <= DEGENERATE_EPSILON {
            return Err(LightError::InvalidGeometry(
                "target point coincides with the light center".to_string(),
            ));
        }
        Self::new(center, target - center, width_vector, height, power)
    }

    /// Set how many samples the integrator should draw per shading point.
    ///
    /// Zero is raised to one.
    pub fn with_number_of_samples(mut self, number_of_samples: u32) -> Self {
        self.set_number_of_samples(number_of_samples);
        self
    }

    pub fn with_settings(mut self, settings: LightSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn set_number_of_samples(&mut self, number_of_samples: u32) {
        if number_of_samples == 0 {
            log::warn!("Area light sample count of 0 raised to 1");
        }
        self.number_of_samples = number_of_samples.max(1);
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    #[inline]
    pub fn width_vector(&self) -> Vec3 {
        self.width_vector
    }

    #[inline]
    pub fn height_vector(&self) -> Vec3 {
        self.height_vector
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// The four corners in edge order: (−,−), (+,−), (+,+), (−,+).
    ///
    /// Counter-clockwise seen from the emitting side unless the light has been
    /// reflected. A reflected light keeps its clockwise order through
    /// `set_coordinate_frame(&coordinate_frame())`.
    pub fn corners(&self) -> [Vec3; 4] {
        let half_w = self.width_vector * 0.5;
        let half_h = self.height_vector * 0.5;
        [
            self.origin - half_w - half_h,
            self.origin + half_w - half_h,
            self.origin + half_w + half_h,
            self.origin - half_w + half_h,
        ]
    }
}

impl AreaLight for RectangularAreaLight {
    fn coordinate_frame(&self) -> CoordinateFrame {
        CoordinateFrame::new(
            self.origin,
            self.width_vector.normalize(),
            self.height_vector.normalize(),
            self.direction,
        )
    }

    fn surface_area(&self) -> f32 {
        self.width_vector.cross(self.height_vector).length()
    }

    fn number_of_samples(&self) -> u32 {
        self.number_of_samples
    }

    fn mesh(&self) -> TriangleMesh {
        let [c0, c1, c2, c3] = self.corners();

        // Wind so the geometric normal matches the facing direction
        let triangles = if self.width_vector.cross(self.height_vector).dot(self.direction) >= 0.0 {
            [[c0, c1, c2], [c0, c2, c3]]
        } else {
            [[c0, c2, c1], [c0, c3, c2]]
        };

        TriangleMesh::from_triangles(&triangles)
    }

    fn random_point(&self, sampler: &mut dyn UniformSampler) -> Vec3 {
        let uv = sampler.next_2d();
        self.origin - self.width_vector * 0.5 - self.height_vector * 0.5
            + self.width_vector * uv.x
            + self.height_vector * uv.y
    }

    fn random_surface_element(&self, sampler: &mut dyn UniformSampler) -> SurfaceElement {
        let point = self.random_point(sampler);
        SurfaceElement::new(point, self.direction, 1.0 / self.surface_area())
    }

    fn total_power(&self) -> Power {
        self.power
    }

    fn set_coordinate_frame(&mut self, frame: &CoordinateFrame) -> LightResult<()> {
        if !(frame.origin.is_finite() && frame.basis.is_finite()) {
            return Err(LightError::InvalidGeometry(
                "coordinate frame contains non-finite values".to_string(),
            ));
        }

        let direction = unit_direction(frame.z_axis(), "frame z axis")?;
        let (width_vector, perpendicular_height) =
            orthogonal_edges(direction, frame.x_axis(), self.width, self.height)?;

        // Keep the frame's y axis so sheared and reflected lights survive a
        // round trip through coordinate_frame()
        let height_vector = framed_height(direction, width_vector, frame.y_axis(), self.height)
            .unwrap_or(perpendicular_height);

        self.origin = frame.origin;
        self.direction = direction;
        self.width_vector = width_vector;
        self.height_vector = height_vector;
        Ok(())
    }

    fn apply_transformation(&mut self, transformation: &Transformation) -> LightResult<()> {
        if !transformation.is_invertible() {
            return Err(LightError::InvalidTransformation(format!(
                "map is singular or non-finite (determinant {})",
                transformation.determinant()
            )));
        }

        let origin = transformation.apply_point(self.origin);
        let width_vector = transformation.apply_vector(self.width_vector);
        let height_vector = transformation.apply_vector(self.height_vector);
        let width = width_vector.length();
        let height = height_vector.length();
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(LightError::InvalidTransformation(
                "map collapses an edge of the light".to_string(),
            ));
        }

        // Sine of the angle between the mapped edges
        let normal = width_vector.cross(height_vector);
        if normal.length() < PARALLEL_TOLERANCE * width * height {
            return Err(LightError::InvalidTransformation(
                "map makes the light edges parallel".to_string(),
            ));
        }

        // The mapped direction only picks the side; under shear it is no
        // longer perpendicular to the surface.
        let mut direction = normal.normalize();
        if direction.dot(transformation.apply_vector(self.direction)) < 0.0 {
            direction = -direction;
        }

        self.origin = origin;
        self.width_vector = width_vector;
        self.height_vector = height_vector;
        self.direction = direction;
        self.width = width;
        self.height = height;

        log::debug!(
            "Transformed rectangular area light: origin {:?}, direction {:?}, area {}",
            self.origin,
            self.direction,
            self.surface_area()
        );
        Ok(())
    }

    fn transformed(&self, transformation: &Transformation) -> LightResult<Box<dyn AreaLight>> {
        let mut light = self.clone();
        light.apply_transformation(transformation)?;
        Ok(Box::new(light))
    }

    fn settings(&self) -> &LightSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut LightSettings {
        &mut self.settings
    }
}

fn unit_direction(direction: Vec3, what: &str) -> LightResult<Vec3> {
    let length = direction.length();
    if length <= DEGENERATE_EPSILON {
        return Err(LightError::InvalidGeometry(format!("{} has zero length", what)));
    }
    Ok(direction / length)
}

/// Height edge along `height_axis` with its direction component removed.
///
/// Returns `None` when the axis is zero, along `direction`, or along the
/// width edge.
fn framed_height(direction: Vec3, width_vector: Vec3, height_axis: Vec3, height: f32) -> Option<Vec3> {
    let axis_length = height_axis.length();
    if axis_length <= DEGENERATE_EPSILON {
        return None;
    }

    let in_plane = height_axis - direction * height_axis.dot(direction);
    if in_plane.length() < PARALLEL_TOLERANCE * axis_length {
        return None;
    }

    let in_plane = in_plane.normalize();
    if width_vector.normalize().cross(in_plane).length() < PARALLEL_TOLERANCE {
        return None;
    }

    Some(in_plane * height)
}

/// Build the two edges of a rectangle facing the unit `direction`.
fn orthogonal_edges(
    direction: Vec3,
    width_axis: Vec3,
    width: f32,
    height: f32,
) -> LightResult<(Vec3, Vec3)> {
    let axis_length = width_axis.length();
    if axis_length <= DEGENERATE_EPSILON || !(width > 0.0) {
        return Err(LightError::InvalidGeometry(
            "width vector has zero length".to_string(),
        ));
    }
    if !(height > 0.0) || !height.is_finite() {
        return Err(LightError::InvalidGeometry(format!(
            "height must be positive, got {}",
            height
        )));
    }

    let perpendicular = width_axis - direction * width_axis.dot(direction);
    if perpendicular.length() < PARALLEL_TOLERANCE * axis_length {
        return Err(LightError::InvalidGeometry(
            "width vector is parallel to the facing direction".to_string(),
        ));
    }

    let width_vector = perpendicular.normalize() * width;
    let height_vector = direction.cross(width_vector).normalize() * height;
    Ok((width_vector, height_vector))
}
