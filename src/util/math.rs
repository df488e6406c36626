//! Math type re-exports and transform helpers.

pub use glam::DVec3;

/// Local transform of a node: translation, Euler rotation in degrees (XYZ order), scaling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalTransform {
    pub translation: DVec3,
    pub rotation: DVec3,
    pub scaling: DVec3,
}

impl LocalTransform {
    pub const IDENTITY: Self = Self {
        translation: DVec3::ZERO,
        rotation: DVec3::ZERO,
        scaling: DVec3::ONE,
    };
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_identity() {
        let t = LocalTransform::default();
        assert_eq!(t, LocalTransform::IDENTITY);
        assert_eq!(t.scaling, DVec3::ONE);
    }
}
