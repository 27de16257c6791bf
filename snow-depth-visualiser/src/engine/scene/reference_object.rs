//! Procedural reference objects.
//!
//! Each `ReferenceKind` lays out a small part hierarchy whose dimensions are
//! proportional to the catalog height, so the silhouette stays correct whatever
//! unit the depth is entered in. Radii and footprints that do not scale with
//! height are fixed per kind.

use std::f32::consts::{FRAC_PI_2, PI};

use bevy::prelude::*;

use super::parts::{PartMaterial, PartShape, PartSpec};
use crate::constants::scene::REFERENCE_OFFSET_X;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    SodaCan,
    Basketball,
    TrafficCone,
    Person,
    Door,
    Car,
    /// Plain box used for catalog entries without bespoke geometry
    Generic,
}

/// Root placement plus the parts hanging off it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLayout {
    pub origin: Vec3,
    pub parts: Vec<PartSpec>,
}

impl ReferenceLayout {
    fn new(origin_y: f32, parts: Vec<PartSpec>) -> Self {
        Self {
            origin: Vec3::new(REFERENCE_OFFSET_X, origin_y, 0.0),
            parts,
        }
    }

    /// Lowest world-space point of the unrotated parts.
    pub fn base_height(&self) -> f32 {
        self.parts
            .iter()
            .filter(|part| part.rotation == Quat::IDENTITY)
            .map(|part| self.origin.y + part.translation.y - part.shape.height() / 2.0)
            .fold(f32::INFINITY, f32::min)
    }
}

/// Build the layout for `kind` at a real-world height in centimetres.
pub fn build_reference_object(kind: ReferenceKind, height_cm: f64) -> ReferenceLayout {
    let height_m = (height_cm / crate::constants::scene::CM_PER_WORLD_UNIT) as f32;
    kind.layout(height_m)
}

impl ReferenceKind {
    pub fn layout(self, h: f32) -> ReferenceLayout {
        match self {
            Self::SodaCan => soda_can(h),
            Self::Basketball => basketball(),
            Self::TrafficCone => traffic_cone(h),
            Self::Person => person(h),
            Self::Door => door(h),
            Self::Car => car(h),
            Self::Generic => generic(h),
        }
    }
}

const CAN_RED: PartMaterial = PartMaterial::opaque(0xcc0000, 0.3, 0.7);
const CAN_SILVER: PartMaterial = PartMaterial::opaque(0xcccccc, 0.2, 0.9);

fn soda_can(h: f32) -> ReferenceLayout {
    let cap = |name| {
        PartSpec::new(
            name,
            PartShape::Cylinder { radius: 0.031, height: h * 0.05, resolution: 16 },
            CAN_SILVER,
        )
    };

    // Parts are centred on the root, so the root sits at half height.
    ReferenceLayout::new(
        h * 0.5,
        vec![
            PartSpec::new(
                "can_body",
                PartShape::Cylinder { radius: 0.03, height: h * 0.9, resolution: 16 },
                CAN_RED,
            ),
            cap("can_top").at(0.0, h * 0.475, 0.0),
            cap("can_bottom").at(0.0, -h * 0.475, 0.0),
        ],
    )
}

pub const BASKETBALL_RADIUS: f32 = 0.12;

fn basketball() -> ReferenceLayout {
    ReferenceLayout::new(
        BASKETBALL_RADIUS,
        vec![PartSpec::new(
            "ball",
            PartShape::Sphere { radius: BASKETBALL_RADIUS },
            PartMaterial::opaque(0xff6600, 0.8, 0.1),
        )],
    )
}

fn traffic_cone(h: f32) -> ReferenceLayout {
    let stripe = PartMaterial::opaque(0xffffff, 0.6, 0.1);
    ReferenceLayout::new(
        0.0,
        vec![
            PartSpec::new(
                "cone_base",
                PartShape::Cylinder { radius: 0.2, height: h * 0.05, resolution: 16 },
                PartMaterial::opaque(0x333333, 0.7, 0.2),
            )
            .at(0.0, h * 0.025, 0.0),
            PartSpec::new(
                "cone",
                PartShape::Cone { radius: 0.15, height: h * 0.85, resolution: 16 },
                PartMaterial::opaque(0xff6600, 0.6, 0.1),
            )
            .at(0.0, h * 0.425, 0.0),
            PartSpec::new(
                "lower_stripe",
                PartShape::Frustum {
                    radius_top: 0.13,
                    radius_bottom: 0.1,
                    height: h * 0.08,
                    resolution: 16,
                },
                stripe,
            )
            .at(0.0, h * 0.35, 0.0),
            PartSpec::new(
                "upper_stripe",
                PartShape::Frustum {
                    radius_top: 0.09,
                    radius_bottom: 0.065,
                    height: h * 0.08,
                    resolution: 16,
                },
                stripe,
            )
            .at(0.0, h * 0.6, 0.0),
        ],
    )
}

pub const PERSON_HEAD_RATIO: f32 = 0.91;
pub const PERSON_TORSO_RATIO: f32 = 0.65;
pub const PERSON_LEG_RATIO: f32 = 0.225;

fn person(h: f32) -> ReferenceLayout {
    let shirt = PartMaterial::opaque(0x4169e1, 0.7, 0.2);
    let trousers = PartMaterial::opaque(0x2c3e50, 0.7, 0.2);
    let arm = PartShape::Cylinder { radius: 0.035, height: h * 0.3, resolution: 8 };
    let leg = PartShape::Cylinder { radius: 0.045, height: h * 0.45, resolution: 8 };
    let arm_tilt = PI / 8.0;

    ReferenceLayout::new(
        0.0,
        vec![
            PartSpec::new(
                "head",
                PartShape::Sphere { radius: 0.1 },
                PartMaterial::opaque(0xffdbac, 0.8, 0.1),
            )
            .at(0.0, h * PERSON_HEAD_RATIO, 0.0),
            PartSpec::new(
                "torso",
                PartShape::Box { width: 0.25, height: h * 0.35, depth: 0.15 },
                shirt,
            )
            .at(0.0, h * PERSON_TORSO_RATIO, 0.0),
            PartSpec::new("left_arm", arm, shirt)
                .at(-0.15, h * PERSON_TORSO_RATIO, 0.0)
                .rotated(Quat::from_rotation_z(arm_tilt)),
            PartSpec::new("right_arm", arm, shirt)
                .at(0.15, h * PERSON_TORSO_RATIO, 0.0)
                .rotated(Quat::from_rotation_z(-arm_tilt)),
            PartSpec::new("left_leg", leg, trousers).at(-0.07, h * PERSON_LEG_RATIO, 0.0),
            PartSpec::new("right_leg", leg, trousers).at(0.07, h * PERSON_LEG_RATIO, 0.0),
        ],
    )
}

fn door(h: f32) -> ReferenceLayout {
    ReferenceLayout::new(
        h * 0.5,
        vec![
            PartSpec::new(
                "door_frame",
                PartShape::Box { width: 0.95, height: h * 1.02, depth: 0.08 },
                PartMaterial::opaque(0x654321, 0.8, 0.1),
            ),
            PartSpec::new(
                "door_panel",
                PartShape::Box { width: 0.85, height: h * 0.96, depth: 0.04 },
                PartMaterial::opaque(0x8b6914, 0.6, 0.2),
            )
            .at(0.0, 0.0, 0.02),
            PartSpec::new(
                "door_handle",
                PartShape::Cylinder { radius: 0.015, height: 0.1, resolution: 8 },
                PartMaterial::opaque(0xffd700, 0.3, 0.8),
            )
            .at(-0.3, 0.0, 0.06)
            .rotated(Quat::from_rotation_z(FRAC_PI_2)),
        ],
    )
}

pub const CAR_LENGTH: f32 = 4.5;
pub const CAR_WIDTH: f32 = 1.8;

fn car(h: f32) -> ReferenceLayout {
    let paint = PartMaterial::opaque(0x3498db, 0.4, 0.7);
    let tyre = PartMaterial::opaque(0x222222, 0.9, 0.3);
    let glass = PartMaterial::translucent(0x444444, 0.1, 0.9, 0.6);
    let wheel = PartShape::Cylinder { radius: 0.35, height: 0.25, resolution: 16 };
    let window = PartShape::Plane { width: CAR_WIDTH * 0.85, height: h * 0.25 };
    let axle = Quat::from_rotation_z(FRAC_PI_2);
    let wheel_x = CAR_WIDTH * 0.55;
    let wheel_z = CAR_LENGTH * 0.25;

    ReferenceLayout::new(
        0.0,
        vec![
            PartSpec::new(
                "car_body",
                PartShape::Box { width: CAR_WIDTH, height: h * 0.4, depth: CAR_LENGTH * 0.7 },
                paint,
            )
            .at(0.0, h * 0.35, 0.0),
            PartSpec::new(
                "car_roof",
                PartShape::Box {
                    width: CAR_WIDTH * 0.9,
                    height: h * 0.35,
                    depth: CAR_LENGTH * 0.4,
                },
                paint,
            )
            .at(0.0, h * 0.65, 0.0),
            PartSpec::new(
                "car_hood",
                PartShape::Box {
                    width: CAR_WIDTH * 0.95,
                    height: h * 0.15,
                    depth: CAR_LENGTH * 0.25,
                },
                paint,
            )
            .at(0.0, h * 0.225, CAR_LENGTH * 0.475),
            PartSpec::new("front_left_wheel", wheel, tyre)
                .at(-wheel_x, h * 0.12, wheel_z)
                .rotated(axle),
            PartSpec::new("front_right_wheel", wheel, tyre)
                .at(wheel_x, h * 0.12, wheel_z)
                .rotated(axle),
            PartSpec::new("rear_left_wheel", wheel, tyre)
                .at(-wheel_x, h * 0.12, -wheel_z)
                .rotated(axle),
            PartSpec::new("rear_right_wheel", wheel, tyre)
                .at(wheel_x, h * 0.12, -wheel_z)
                .rotated(axle),
            PartSpec::new("front_window", window, glass).at(0.0, h * 0.65, CAR_LENGTH * 0.201),
            PartSpec::new("back_window", window, glass)
                .at(0.0, h * 0.65, -CAR_LENGTH * 0.201)
                .rotated(Quat::from_rotation_y(PI)),
        ],
    )
}

fn generic(h: f32) -> ReferenceLayout {
    ReferenceLayout::new(
        h * 0.5,
        vec![PartSpec::new(
            "block",
            PartShape::Box { width: 0.2, height: h, depth: 0.2 },
            PartMaterial::opaque(0x888888, 0.7, 0.3),
        )],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::catalog::{REFERENCE_OBJECTS, lookup};

    fn part<'a>(layout: &'a ReferenceLayout, name: &str) -> &'a PartSpec {
        layout
            .parts
            .iter()
            .find(|p| p.name == name)
            .unwrap_or_else(|| panic!("missing part {name}"))
    }

    #[test]
    fn test_part_counts_per_kind() {
        let counts = [
            (ReferenceKind::SodaCan, 3),
            (ReferenceKind::Basketball, 1),
            (ReferenceKind::TrafficCone, 4),
            (ReferenceKind::Person, 6),
            (ReferenceKind::Door, 3),
            (ReferenceKind::Car, 9),
            (ReferenceKind::Generic, 1),
        ];
        for (kind, expected) in counts {
            assert_eq!(kind.layout(1.0).parts.len(), expected, "{kind:?}");
        }
    }

    #[test]
    fn test_every_catalog_object_stands_beside_slab_and_casts_shadows() {
        for spec in REFERENCE_OBJECTS {
            let layout = build_reference_object(spec.kind, spec.height_cm);
            assert_eq!(layout.origin.x, 2.0, "{}", spec.key);
            assert_eq!(layout.origin.z, 0.0);
            assert!(layout.parts.iter().all(|p| p.casts_shadow), "{}", spec.key);
        }
    }

    #[test]
    fn test_person_proportions() {
        let layout = build_reference_object(ReferenceKind::Person, 170.0);
        assert!((part(&layout, "head").translation.y - 1.547).abs() < 1e-5);
        assert!((part(&layout, "torso").translation.y - 1.105).abs() < 1e-5);
        assert!((part(&layout, "left_leg").translation.y - 0.3825).abs() < 1e-5);
        assert!((layout.base_height()).abs() < 1e-5);
        let left = part(&layout, "left_arm");
        let right = part(&layout, "right_arm");
        assert!(left.translation.x < 0.0 && right.translation.x > 0.0);
        assert_ne!(left.rotation, right.rotation);
    }

    #[test]
    fn test_basketball_radius_ignores_height() {
        let small = ReferenceKind::Basketball.layout(0.24);
        let large = ReferenceKind::Basketball.layout(5.0);
        assert_eq!(small, large);
        assert_eq!(small.origin.y, BASKETBALL_RADIUS);
        assert!(small.base_height().abs() < 1e-6);
    }

    #[test]
    fn test_car_footprint_fixed_height_scaled() {
        let low = ReferenceKind::Car.layout(1.0);
        let tall = ReferenceKind::Car.layout(2.0);
        let (low_body, tall_body) = (part(&low, "car_body"), part(&tall, "car_body"));
        match (low_body.shape, tall_body.shape) {
            (
                PartShape::Box { width: w1, height: h1, depth: d1 },
                PartShape::Box { width: w2, height: h2, depth: d2 },
            ) => {
                assert_eq!((w1, d1), (w2, d2));
                assert_eq!(w1, CAR_WIDTH);
                assert!((h2 - 2.0 * h1).abs() < 1e-6);
            }
            _ => panic!("car body should be a box"),
        }
        let windows = low
            .parts
            .iter()
            .filter(|p| p.material.opacity.is_some())
            .count();
        assert_eq!(windows, 2);
        let wheels = low.parts.iter().filter(|p| p.name.ends_with("wheel")).count();
        assert_eq!(wheels, 4);
    }

    #[test]
    fn test_grounded_objects_touch_ground() {
        for key in ["soda-can", "traffic-cone", "person"] {
            let spec = lookup(key).unwrap();
            let layout = build_reference_object(spec.kind, spec.height_cm);
            assert!(layout.base_height().abs() < 1e-5, "{key}");
        }
    }

    #[test]
    fn test_door_and_generic_centred_at_half_height() {
        let door = build_reference_object(ReferenceKind::Door, 200.0);
        assert!((door.origin.y - 1.0).abs() < 1e-6);
        let block = build_reference_object(ReferenceKind::Generic, 80.0);
        assert!((block.origin.y - 0.4).abs() < 1e-6);
        assert!(block.base_height().abs() < 1e-6);
    }

    #[test]
    fn test_soda_can_scales_with_height() {
        let layout = build_reference_object(ReferenceKind::SodaCan, 12.0);
        let top = part(&layout, "can_top");
        assert!((top.translation.y - 0.057).abs() < 1e-6);
        assert!((layout.origin.y - 0.06).abs() < 1e-6);
    }
}
