//! Built-in scene-construction scenarios.

use crate::types::Command;
use crate::Script;

pub const NAMES: [&str; 2] = ["spheres", "lit-cuboid"];

pub fn by_name(name: &str) -> Option<Script> {
    match name {
        "spheres" => Some(spheres()),
        "lit-cuboid" => Some(lit_cuboid()),
        _ => None,
    }
}

/// Two cameras looking at a growing set of spheres, rendered four times.
pub fn spheres() -> Script {
    Script::new(
        "spheres",
        vec![
            Command::create("cam1", "camera"),
            Command::translate("cam1", [0.0, 0.0, 0.0]),
            Command::create("cam2", "camera"),
            Command::translate("cam2", [0.0, -7.0, -3.5]),
            Command::spin("cam2", [-45.0, 0.0, 0.0]),
            Command::create("sphere1", "sphere"),
            Command::translate("sphere1", [0.0, -0.1, 2.0]),
            Command::render(),
            Command::create("sphere2", "sphere"),
            Command::translate("sphere2", [0.0, 0.0, 9.0]),
            Command::radius("sphere2", 4.0),
            Command::render(),
            Command::radius("sphere2", 3.0),
            Command::create("sphere3", "sphere"),
            Command::translate("sphere3", [0.3, 0.0, 2.0]),
            Command::render(),
            Command::translate("sphere3", [0.1, 0.2, 0.0]),
            Command::render(),
        ],
    )
}

/// Clears the scene, then lights a sphere and a spun cuboid with two point
/// lights; the second render moves one light below the scene.
pub fn lit_cuboid() -> Script {
    Script::new(
        "lit-cuboid",
        vec![
            Command::clear(),
            Command::create("lightpoint1", "lightpoint"),
            Command::translate("lightpoint1", [10.0, 0.0, 0.0]),
            Command::color("lightpoint1", [0.0, 0.0, 0.9]),
            Command::create("lightpoint2", "lightpoint"),
            Command::translate("lightpoint2", [0.0, 1.0, 0.0]),
            Command::color("lightpoint2", [0.8, 0.8, 0.8]),
            Command::create("cam1", "camera"),
            Command::translate("cam1", [0.0, 0.0, 0.0]),
            Command::create("sphere1", "sphere"),
            Command::create("cuboid1", "cuboid"),
            Command::translate("cuboid1", [0.0, 0.0, 8.0]),
            Command::spin("cuboid1", [45.0, 0.0, 0.0]),
            Command::spin("cuboid1", [0.0, 45.0, 0.0]),
            Command::translate("sphere1", [0.0, -0.1, 2.0]),
            Command::render(),
            Command::translate("lightpoint2", [0.0, -20.0, 0.0]),
            Command::render(),
        ],
    )
}
