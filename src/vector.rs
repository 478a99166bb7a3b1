//! The handful of vector operations the pipeline needs, on top of `nalgebra`
use crate::error::DomainError;
use nalgebra::Vector3;

/// Real-valued 3D vector used for positions, normals and directions
pub type Vec3 = Vector3<f64>;

pub fn add(a: &Vec3, b: &Vec3) -> Vec3 {
    a + b
}

/// `a - b`, written as `a + (-1 * b)`
pub fn sub(a: &Vec3, b: &Vec3) -> Vec3 {
    add(a, &scale(b, -1.0))
}

pub fn scale(v: &Vec3, k: f64) -> Vec3 {
    v * k
}

pub fn dot(a: &Vec3, b: &Vec3) -> f64 {
    a.dot(b)
}

pub fn norm(v: &Vec3) -> f64 {
    dot(v, v).sqrt()
}

/// Scale `v` to unit length.
/// Fails instead of producing NaN components when `v` has no usable length.
pub fn normalize(v: &Vec3) -> Result<Vec3, DomainError> {
    let length = norm(v);
    if length == 0.0 || !length.is_finite() {
        return Err(DomainError::ZeroNorm);
    }
    Ok(scale(v, 1.0 / length))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn scalar() -> impl Strategy<Value = f64> {
        prop_oneof![Just(0.0), Just(1.0), Just(-1.0), Just(0.5), -50.0..=50.0f64]
    }

    fn arbitrary_vector() -> impl Strategy<Value = Vec3> {
        (scalar(), scalar(), scalar()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
    }

    #[test]
    fn test_sub_matches_componentwise_difference() {
        let a = Vec3::new(10.0, 10.0, 8.0);
        let b = Vec3::new(0.0, -2.0, 0.0);
        assert_eq!(sub(&a, &b), Vec3::new(10.0, 12.0, 8.0));
        // Inputs are untouched
        assert_eq!(b, Vec3::new(0.0, -2.0, 0.0));
    }

    #[test]
    fn test_normalize_zero_vector_fails() {
        assert_eq!(normalize(&Vec3::zeros()), Err(DomainError::ZeroNorm));
    }

    #[test]
    fn test_normalize_axis() {
        let n = normalize(&Vec3::new(0.0, 0.0, -4.0)).unwrap();
        assert_eq!(n, Vec3::new(0.0, 0.0, -1.0));
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(v in arbitrary_vector().prop_filter("non-zero", |v| v.norm() > 1e-6)) {
            let once = normalize(&v).unwrap();
            let twice = normalize(&once).unwrap();
            assert_relative_eq!(once, twice, epsilon = 1e-12);
            assert_relative_eq!(norm(&once), 1.0, epsilon = 1e-12);
        }

        #[test]
        fn dot_with_self_is_squared_norm(v in arbitrary_vector()) {
            let n = norm(&v);
            assert_relative_eq!(dot(&v, &v), n * n, epsilon = 1e-9, max_relative = 1e-12);
            prop_assert!(n >= 0.0);
        }
    }
}
