use bevy::prelude::*;

/// Primitive shape of a single scene part, dimensions in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PartShape {
    Box { width: f32, height: f32, depth: f32 },
    Cylinder { radius: f32, height: f32, resolution: u32 },
    /// Cylinder with differing end radii
    Frustum { radius_top: f32, radius_bottom: f32, height: f32, resolution: u32 },
    Cone { radius: f32, height: f32, resolution: u32 },
    Sphere { radius: f32 },
    /// Single-sided quad in the local XY plane, facing +Z
    Plane { width: f32, height: f32 },
}

impl PartShape {
    /// Extent along the local Y axis before rotation.
    pub fn height(&self) -> f32 {
        match *self {
            Self::Box { height, .. }
            | Self::Cylinder { height, .. }
            | Self::Frustum { height, .. }
            | Self::Cone { height, .. }
            | Self::Plane { height, .. } => height,
            Self::Sphere { radius } => radius * 2.0,
        }
    }

    pub fn mesh(&self) -> Mesh {
        match *self {
            Self::Box { width, height, depth } => Cuboid::new(width, height, depth).mesh().build(),
            Self::Cylinder { radius, height, resolution } => Cylinder::new(radius, height)
                .mesh()
                .resolution(resolution)
                .build(),
            Self::Frustum { radius_top, radius_bottom, height, resolution } => ConicalFrustum {
                radius_top,
                radius_bottom,
                height,
            }
            .mesh()
            .resolution(resolution)
            .build(),
            Self::Cone { radius, height, resolution } => Cone { radius, height }
                .mesh()
                .resolution(resolution)
                .build(),
            Self::Sphere { radius } => Sphere::new(radius).mesh().build(),
            Self::Plane { width, height } => Rectangle::new(width, height).mesh().build(),
        }
    }
}

/// Surface description for a part, kept independent of the asset store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartMaterial {
    /// sRGB colour as 0xRRGGBB
    pub colour: u32,
    pub roughness: f32,
    pub metallic: f32,
    /// `Some` makes the part alpha blended
    pub opacity: Option<f32>,
}

impl PartMaterial {
    pub const fn opaque(colour: u32, roughness: f32, metallic: f32) -> Self {
        Self {
            colour,
            roughness,
            metallic,
            opacity: None,
        }
    }

    pub const fn translucent(colour: u32, roughness: f32, metallic: f32, opacity: f32) -> Self {
        Self {
            colour,
            roughness,
            metallic,
            opacity: Some(opacity),
        }
    }

    pub fn base_colour(&self) -> Color {
        let channel = |shift: u32| ((self.colour >> shift) & 0xff) as f32 / 255.0;
        Color::srgba(
            channel(16),
            channel(8),
            channel(0),
            self.opacity.unwrap_or(1.0),
        )
    }

    pub fn standard_material(&self) -> StandardMaterial {
        StandardMaterial {
            base_color: self.base_colour(),
            perceptual_roughness: self.roughness,
            metallic: self.metallic,
            alpha_mode: if self.opacity.is_some() {
                AlphaMode::Blend
            } else {
                AlphaMode::Opaque
            },
            ..default()
        }
    }
}

/// One mesh of a composed object, positioned relative to the object root.
#[derive(Debug, Clone, PartialEq)]
pub struct PartSpec {
    pub name: &'static str,
    pub shape: PartShape,
    pub translation: Vec3,
    pub rotation: Quat,
    pub material: PartMaterial,
    pub casts_shadow: bool,
}

impl PartSpec {
    pub fn new(name: &'static str, shape: PartShape, material: PartMaterial) -> Self {
        Self {
            name,
            shape,
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            material,
            casts_shadow: true,
        }
    }

    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.translation = Vec3::new(x, y, z);
        self
    }

    pub fn rotated(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.translation).with_rotation(self.rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_colour_channels() {
        let red = PartMaterial::opaque(0xcc0000, 0.3, 0.7).base_colour().to_srgba();
        assert!((red.red - 0.8).abs() < 1e-6);
        assert_eq!(red.green, 0.0);
        assert_eq!(red.alpha, 1.0);
    }

    #[test]
    fn test_translucent_material_blends() {
        let glass = PartMaterial::translucent(0x444444, 0.1, 0.9, 0.6);
        let material = glass.standard_material();
        assert!(matches!(material.alpha_mode, AlphaMode::Blend));
        assert!((material.base_color.alpha() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_shape_heights() {
        assert_eq!(PartShape::Sphere { radius: 0.1 }.height(), 0.2);
        let frustum = PartShape::Frustum {
            radius_top: 0.13,
            radius_bottom: 0.1,
            height: 0.5,
            resolution: 16,
        };
        assert_eq!(frustum.height(), 0.5);
    }

    #[test]
    fn test_builder_places_part() {
        let part = PartSpec::new(
            "box",
            PartShape::Box { width: 1.0, height: 1.0, depth: 1.0 },
            PartMaterial::opaque(0xffffff, 0.5, 0.0),
        )
        .at(1.0, 2.0, 3.0);
        assert_eq!(part.transform().translation, Vec3::new(1.0, 2.0, 3.0));
        assert!(part.casts_shadow);
    }
}
