use super::types::{ActiveHours, Device};

/// Fixed, ordered registry of the simulated device categories.
///
/// The order is significant: breakdown rows and tie-breaks in the device
/// ranking follow it.
pub const CATALOG: [Device; 7] = [
    Device {
        name: "Air conditioning",
        baseline_kwh: 3.5,
        variability_kwh: 1.2,
        active: ActiveHours::Window { start: 8, end: 18 },
    },
    Device {
        name: "Lighting",
        baseline_kwh: 1.2,
        variability_kwh: 0.5,
        active: ActiveHours::Always,
    },
    Device {
        name: "Servers",
        baseline_kwh: 2.0,
        variability_kwh: 0.2,
        active: ActiveHours::Always,
    },
    Device {
        name: "Computers",
        baseline_kwh: 2.5,
        variability_kwh: 1.5,
        active: ActiveHours::Window { start: 8, end: 18 },
    },
    Device {
        name: "Refrigerator",
        baseline_kwh: 0.8,
        variability_kwh: 0.3,
        active: ActiveHours::Always,
    },
    Device {
        name: "Industrial machines",
        baseline_kwh: 8.0,
        variability_kwh: 3.0,
        active: ActiveHours::Window { start: 14, end: 17 },
    },
    Device {
        name: "Phantom load",
        baseline_kwh: 0.5,
        variability_kwh: 0.3,
        active: ActiveHours::Outside { start: 8, end: 18 },
    },
];

/// Returns the device catalog in its fixed order.
pub fn devices() -> &'static [Device] {
    &CATALOG
}

/// Looks up a device by its exact name.
pub fn find(name: &str) -> Option<&'static Device> {
    CATALOG.iter().find(|d| d.name == name)
}
