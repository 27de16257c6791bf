use serde::Serialize;

use crate::engine::scene::reference_object::ReferenceKind;

/// Real-world object of known height used as a size comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceObjectSpec {
    pub key: &'static str,
    pub display_name: &'static str,
    pub height_cm: f64,
    #[serde(skip)]
    pub kind: ReferenceKind,
}

pub const REFERENCE_OBJECTS: &[ReferenceObjectSpec] = &[
    ReferenceObjectSpec {
        key: "soda-can",
        display_name: "Soda Can",
        height_cm: 12.0,
        kind: ReferenceKind::SodaCan,
    },
    ReferenceObjectSpec {
        key: "basketball",
        display_name: "Basketball",
        height_cm: 24.0,
        kind: ReferenceKind::Basketball,
    },
    ReferenceObjectSpec {
        key: "traffic-cone",
        display_name: "Traffic Cone",
        height_cm: 70.0,
        kind: ReferenceKind::TrafficCone,
    },
    ReferenceObjectSpec {
        key: "person",
        display_name: "Average Person",
        height_cm: 170.0,
        kind: ReferenceKind::Person,
    },
    ReferenceObjectSpec {
        key: "door",
        display_name: "Standard Door",
        height_cm: 200.0,
        kind: ReferenceKind::Door,
    },
    ReferenceObjectSpec {
        key: "car",
        display_name: "Car",
        height_cm: 150.0,
        kind: ReferenceKind::Car,
    },
];

/// Look up a catalog entry by key.
pub fn lookup(key: &str) -> Option<&'static ReferenceObjectSpec> {
    REFERENCE_OBJECTS.iter().find(|spec| spec.key == key)
}
