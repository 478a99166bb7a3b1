use crate::error::SceneError;
use crate::vector::Vec3;
use std::iter::{Copied, FusedIterator};
use std::slice;

/// A point on a surface together with the outward unit normal at that point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub position: Vec3,
    pub normal: Vec3,
}

impl SamplePoint {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }
}

/// Anything that can hand out the sample points of a surface.
/// Every call to `samples` starts a fresh pass over the same points.
pub trait PointSource {
    type Iter<'a>: Iterator<Item = SamplePoint>
    where
        Self: 'a;
    fn samples(&self) -> Self::Iter<'_>;
}

impl PointSource for [SamplePoint] {
    type Iter<'a> = Copied<slice::Iter<'a, SamplePoint>>;
    fn samples(&self) -> Self::Iter<'_> {
        self.iter().copied()
    }
}

impl PointSource for Vec<SamplePoint> {
    type Iter<'a> = Copied<slice::Iter<'a, SamplePoint>>;
    fn samples(&self) -> Self::Iter<'_> {
        self.as_slice().samples()
    }
}

/// One face of the cube: which axis is held fixed, whether it is the far plane,
/// and the two free axes swept in row-major order (`outer`, then `inner`)
struct Face {
    fixed: usize,
    far: bool,
    outer: usize,
    inner: usize,
}

const X: usize = 0;
const Y: usize = 1;
const Z: usize = 2;

// Z faces, then Y faces, then X faces
const FACES: [Face; 6] = [
    Face { fixed: Z, far: false, outer: Y, inner: X },
    Face { fixed: Z, far: true, outer: Y, inner: X },
    Face { fixed: Y, far: false, outer: Z, inner: X },
    Face { fixed: Y, far: true, outer: Z, inner: X },
    Face { fixed: X, far: false, outer: Z, inner: Y },
    Face { fixed: X, far: true, outer: Z, inner: Y },
];

/// Samples the six faces of the axis-aligned cube `[corner, corner + side_length]^3`
#[derive(Debug, Clone, PartialEq)]
pub struct CubeGenerator {
    corner: Vec3,
    side_length: f64,
    step: f64,
    steps: usize,
}

/// Count of `i` with `i * step < side_length`, or `None` when the six faces
/// together would hold more samples than `usize` can count
fn count_steps(side_length: f64, step: f64) -> Option<usize> {
    let ratio = (side_length / step).ceil();
    if !ratio.is_finite() || ratio >= usize::MAX as f64 {
        return None;
    }
    let mut n = ratio as usize;
    while n > 0 && (n - 1) as f64 * step >= side_length {
        n -= 1;
    }
    while (n as f64) * step < side_length {
        n = n.checked_add(1)?;
    }
    n.checked_mul(n)?.checked_mul(FACES.len())?;
    Some(n)
}

impl CubeGenerator {
    /// `corner` is the vertex with the lowest x, y and z values.
    /// `step` is the spacing between neighbouring samples along a face.
    pub fn new(corner: Vec3, side_length: f64, step: f64) -> Result<Self, SceneError> {
        if !side_length.is_finite() || side_length < 1.0 {
            return Err(SceneError::InvalidSideLength(side_length));
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(SceneError::InvalidStep(step));
        }
        let steps = count_steps(side_length, step)
            .ok_or(SceneError::TooManySamples { side_length, step })?;
        Ok(Self {
            corner,
            side_length,
            step,
            steps,
        })
    }
    pub fn corner(&self) -> Vec3 {
        self.corner
    }
    pub fn side_length(&self) -> f64 {
        self.side_length
    }
    pub fn step(&self) -> f64 {
        self.step
    }
    /// Move the cube without changing its size or sampling
    pub fn translate(&mut self, offset: &Vec3) {
        self.corner += offset;
    }
    /// Number of samples along one free axis: the count of `i` with `i * step < side_length`
    pub fn steps_per_side(&self) -> usize {
        self.steps
    }
    /// Total number of samples produced by one pass
    pub fn len(&self) -> usize {
        FACES.len() * self.steps * self.steps
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PointSource for CubeGenerator {
    type Iter<'a> = CubeSamples;
    fn samples(&self) -> CubeSamples {
        CubeSamples {
            corner: self.corner,
            side_length: self.side_length,
            step: self.step,
            steps: self.steps,
            face: 0,
            outer: 0,
            inner: 0,
        }
    }
}

/// Lazy pass over the faces of a `CubeGenerator`
#[derive(Debug, Clone)]
pub struct CubeSamples {
    corner: Vec3,
    side_length: f64,
    step: f64,
    steps: usize,
    face: usize,
    outer: usize,
    inner: usize,
}

impl CubeSamples {
    fn remaining(&self) -> usize {
        if self.face >= FACES.len() {
            return 0;
        }
        let per_face = self.steps * self.steps;
        (FACES.len() - self.face) * per_face - (self.outer * self.steps + self.inner)
    }
}

impl Iterator for CubeSamples {
    type Item = SamplePoint;

    fn next(&mut self) -> Option<SamplePoint> {
        let face = FACES.get(self.face)?;

        let mut position = self.corner;
        if face.far {
            position[face.fixed] += self.side_length;
        }
        position[face.outer] += self.outer as f64 * self.step;
        position[face.inner] += self.inner as f64 * self.step;

        let mut normal = Vec3::zeros();
        normal[face.fixed] = if face.far { 1.0 } else { -1.0 };

        self.inner += 1;
        if self.inner == self.steps {
            self.inner = 0;
            self.outer += 1;
            if self.outer == self.steps {
                self.outer = 0;
                self.face += 1;
            }
        }
        Some(SamplePoint { position, normal })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CubeSamples {}
impl FusedIterator for CubeSamples {}
