use crate::{
    error::{DomainError, SceneError},
    render::{render, Camera, Canvas, Light},
    surface::CubeGenerator,
    vector::Vec3,
};

// Reference scene
const CORNER: [f64; 3] = [10.0, 10.0, 8.0];
const SIDE_LENGTH: f64 = 3.0;
const STEP: f64 = 1.0;
const LIGHT_POSITION: [f64; 3] = [0.0, -2.0, 0.0];
const LIGHT_INTENSITY: f64 = 12.0;
const SCREEN_WIDTH: usize = 15;
const SCREEN_HEIGHT: usize = 15;
const SCREEN_DEPTH: usize = 15;

/// Holding everything needed to render a frame
///
/// Holds the cube being drawn, the camera looking at it and the light shining on it
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub cube: CubeGenerator,
    pub camera: Camera,
    pub light: Light,
}

impl Scene {
    pub fn new(cube: CubeGenerator, camera: Camera, light: Light) -> Self {
        Self {
            cube,
            camera,
            light,
        }
    }
    /// Camera for a screen of `width x height` cells and a viewing depth of `depth`.
    ///
    /// Every extent is grown by one, so the canvas is `(width + 1) x (height + 1)`,
    /// the projection distance is `depth + 1` and the camera sits in the middle.
    pub fn camera_for_screen(
        width: usize,
        height: usize,
        depth: usize,
    ) -> Result<Camera, SceneError> {
        Camera::centered(width + 1, height + 1, (depth + 1) as f64)
    }
    pub fn render(&self) -> Result<Canvas, DomainError> {
        render(&self.cube, &self.light, &self.camera)
    }
    pub fn translate_cube(&mut self, offset: &Vec3) {
        self.cube.translate(offset);
    }
    pub fn translate_light(&mut self, offset: &Vec3) {
        self.light.position += offset;
    }
}

impl Default for Scene {
    fn default() -> Self {
        let cube = CubeGenerator::new(Vec3::from(CORNER), SIDE_LENGTH, STEP)
            .expect("reference cube is valid");
        let camera = Self::camera_for_screen(SCREEN_WIDTH, SCREEN_HEIGHT, SCREEN_DEPTH)
            .expect("reference screen is valid");
        let light = Light::new(Vec3::from(LIGHT_POSITION), LIGHT_INTENSITY);
        Self::new(cube, camera, light)
    }
}
