//! Projection, shading and depth-tested compositing of sample points
use crate::error::{DomainError, SceneError};
use crate::surface::{PointSource, SamplePoint};
use crate::vector::{dot, normalize, sub, Vec3};
use tracing::{debug, trace};

/// Luminance of a pixel that no sample point reached
pub const UNLIT: f64 = f64::NEG_INFINITY;

/// Pinhole camera looking down +z.
///
/// The image plane sits `projection_distance` in front of the camera and the
/// optical axis goes through the centre of the screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    width: usize,
    height: usize,
    projection_distance: f64,
    znear: f64,
    zfar: f64,
}

/// Where a sample point landed on the screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub x: usize,
    pub y: usize,
    /// `1 / z` in camera space, larger is nearer
    pub inv_z: f64,
}

impl Camera {
    pub fn new(
        position: Vec3,
        width: usize,
        height: usize,
        projection_distance: f64,
    ) -> Result<Self, SceneError> {
        if width == 0 || height == 0 {
            return Err(SceneError::EmptyScreen { width, height });
        }
        if !projection_distance.is_finite() || projection_distance <= 0.0 {
            return Err(SceneError::InvalidProjectionDistance(projection_distance));
        }
        Ok(Self {
            position,
            width,
            height,
            projection_distance,
            znear: 0.0,
            zfar: f64::INFINITY,
        })
    }
    /// Camera sitting at `(width / 2, height / 2, 0)`, facing the middle of the screen
    pub fn centered(
        width: usize,
        height: usize,
        projection_distance: f64,
    ) -> Result<Self, SceneError> {
        let position = Vec3::new((width / 2) as f64, (height / 2) as f64, 0.0);
        Self::new(position, width, height, projection_distance)
    }
    /// Only keep points whose camera-space depth lies in `znear..=zfar`
    pub fn with_depth_range(mut self, znear: f64, zfar: f64) -> Result<Self, SceneError> {
        if !(znear >= 0.0 && znear < zfar) {
            return Err(SceneError::InvalidDepthRange { znear, zfar });
        }
        self.znear = znear;
        self.zfar = zfar;
        Ok(self)
    }
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn projection_distance(&self) -> f64 {
        self.projection_distance
    }
    pub fn depth_range(&self) -> (f64, f64) {
        (self.znear, self.zfar)
    }
    /// Pixel the optical axis passes through
    pub fn center(&self) -> (f64, f64) {
        ((self.width / 2) as f64, (self.height / 2) as f64)
    }

    /// Project a world-space position onto the screen.
    ///
    /// Returns `Ok(None)` for points behind the camera, outside the depth range
    /// or off screen. A point on the camera plane has no projection and is an error.
    pub fn project(&self, position: &Vec3) -> Result<Option<Projection>, DomainError> {
        let relative = sub(position, &self.position);
        let z = relative.z;
        if z == 0.0 {
            return Err(DomainError::DegenerateProjection {
                position: *position,
            });
        }
        if z < 0.0 || z < self.znear || z > self.zfar {
            return Ok(None);
        }
        let (center_x, center_y) = self.center();
        let scale = self.projection_distance / z;
        let screen_x = (scale * relative.x + center_x).floor();
        let screen_y = (scale * relative.y + center_y).floor();
        // Also rejects NaN
        if !(screen_x >= 0.0 && screen_x < self.width as f64) {
            return Ok(None);
        }
        if !(screen_y >= 0.0 && screen_y < self.height as f64) {
            return Ok(None);
        }
        Ok(Some(Projection {
            x: screen_x as usize,
            y: screen_y as usize,
            inv_z: 1.0 / z,
        }))
    }
}

/// Single point light
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub intensity: f64,
}

impl Light {
    pub fn new(position: Vec3, intensity: f64) -> Self {
        Self {
            position,
            intensity,
        }
    }
    /// Lambert term scaled by the intensity: `intensity * (unit(point - light) . normal)`,
    /// the ray travelling from the light to the point.
    /// Not clamped, so surfaces the ray does not reach along their normal come out negative.
    pub fn shade(&self, point: &SamplePoint) -> Result<f64, DomainError> {
        let ray = normalize(&sub(&point.position, &self.position))?;
        Ok(self.intensity * dot(&ray, &point.normal))
    }
}

/// Where pixels will be composited.
///
/// Holds the inverse depth of the nearest point seen so far and the luminance it was shaded with.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    pub z_buffer: Vec<f64>,
    pub luminance: Vec<f64>,
    width: usize,
    height: usize,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            z_buffer: vec![0.0; width * height],
            luminance: vec![UNLIT; width * height],
            width,
            height,
        }
    }
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        (x < self.width && y < self.height).then(|| self.luminance[self.index(x, y)])
    }
    /// Whether any point reached this pixel
    pub fn is_lit(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_some_and(|l| l != UNLIT)
    }
    /// Rows of luminance values, top row (`y == 0`) first
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.luminance.chunks(self.width.max(1))
    }
    /// Depth-tested write, the nearest point wins.
    ///
    /// Points at exactly the same depth keep the brightest luminance so that the
    /// result does not depend on the order points arrive in.
    /// Returns whether the pixel changed.
    pub fn plot(&mut self, projection: &Projection, luminance: f64) -> bool {
        let idx = self.index(projection.x, projection.y);
        if projection.inv_z > self.z_buffer[idx] {
            self.z_buffer[idx] = projection.inv_z;
            self.luminance[idx] = luminance;
            true
        } else if projection.inv_z == self.z_buffer[idx] && luminance > self.luminance[idx] {
            self.luminance[idx] = luminance;
            true
        } else {
            false
        }
    }
}

/// Render one frame of a point cloud.
///
/// Every point that lands on the screen is shaded, hidden or not, so a frame with
/// malformed geometry fails the same way whatever order its points arrive in.
/// The partial frame is thrown away.
pub fn render<P: PointSource + ?Sized>(
    points: &P,
    light: &Light,
    camera: &Camera,
) -> Result<Canvas, DomainError> {
    let mut canvas = Canvas::new(camera.width(), camera.height());
    let (mut seen, mut projected, mut written) = (0usize, 0usize, 0usize);
    for point in points.samples() {
        seen += 1;
        let Some(projection) = camera.project(&point.position)? else {
            trace!(position = ?point.position, "point dropped by projection");
            continue;
        };
        projected += 1;
        let luminance = light.shade(&point)?;
        if canvas.plot(&projection, luminance) {
            written += 1;
        }
    }
    debug!(seen, projected, written, "rendered frame");
    Ok(canvas)
}
