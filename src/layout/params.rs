use std::cell::Cell;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Description of one layout control as presented by a front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderSpec {
    /// Stable key used in config files and CLI overrides
    pub key: &'static str,

    /// Human-readable label
    pub label: &'static str,

    pub min: i32,
    pub max: i32,
    pub default: i32,
}

impl SliderSpec {
    /// Check whether a value lies within this slider's range
    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }
}

pub const BANNER_SIZE: SliderSpec = SliderSpec {
    key: "banner_size",
    label: "Banner size (%)",
    min: 10,
    max: 100,
    default: 80,
};

pub const LOGO_POSITION: SliderSpec = SliderSpec {
    key: "logo_position",
    label: "Logo horizontal position",
    min: 0,
    max: 100,
    default: 100,
};

pub const LOGO_Y: SliderSpec = SliderSpec {
    key: "logo_y",
    label: "Logo vertical position",
    min: -100,
    max: 300,
    default: 0,
};

pub const BANNER_Y: SliderSpec = SliderSpec {
    key: "banner_y",
    label: "Banner vertical position",
    min: -100,
    max: 300,
    default: 0,
};

pub const LOGO_SIZE: SliderSpec = SliderSpec {
    key: "logo_size",
    label: "Logo size (%)",
    min: 10,
    max: 200,
    default: 100,
};

pub const LOGO_ROTATION: SliderSpec = SliderSpec {
    key: "logo_rotation",
    label: "Logo rotation (°)",
    min: -180,
    max: 180,
    default: 0,
};

pub const LOGO_OPACITY: SliderSpec = SliderSpec {
    key: "logo_opacity",
    label: "Logo opacity (%)",
    min: 0,
    max: 100,
    default: 100,
};

/// All layout controls in display order
pub const SLIDERS: [SliderSpec; 7] = [
    BANNER_SIZE,
    LOGO_POSITION,
    LOGO_Y,
    BANNER_Y,
    LOGO_SIZE,
    LOGO_ROTATION,
    LOGO_OPACITY,
];

/// The seven numeric controls that drive a render
///
/// Values are read once per render and passed by value; the compositor never
/// holds on to widget state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParameters {
    /// Banner width as a percentage of the background width
    pub banner_size: i32,

    /// Logo left edge within the available band (0 = margin, 100 = rightmost)
    pub logo_position: i32,

    /// Logo vertical offset from the top margin, in pixels
    pub logo_y: i32,

    /// Banner vertical offset from the bottom edge, in pixels
    pub banner_y: i32,

    /// Logo scale as a percentage of its base width
    pub logo_size: i32,

    /// Logo rotation in degrees, counter-clockwise positive
    pub logo_rotation: i32,

    /// Logo opacity percentage
    pub logo_opacity: i32,
}

impl Default for LayoutParameters {
    fn default() -> Self {
        Self {
            banner_size: BANNER_SIZE.default,
            logo_position: LOGO_POSITION.default,
            logo_y: LOGO_Y.default,
            banner_y: BANNER_Y.default,
            logo_size: LOGO_SIZE.default,
            logo_rotation: LOGO_ROTATION.default,
            logo_opacity: LOGO_OPACITY.default,
        }
    }
}

impl LayoutParameters {
    /// Snapshot the current value of every bound control
    pub fn read(controls: &LayoutControls<'_>) -> Self {
        Self {
            banner_size: controls.banner_size.get(),
            logo_position: controls.logo_position.get(),
            logo_y: controls.logo_y.get(),
            banner_y: controls.banner_y.get(),
            logo_size: controls.logo_size.get(),
            logo_rotation: controls.logo_rotation.get(),
            logo_opacity: controls.logo_opacity.get(),
        }
    }

    /// Pair every field with its slider description
    pub fn entries(&self) -> [(SliderSpec, i32); 7] {
        [
            (BANNER_SIZE, self.banner_size),
            (LOGO_POSITION, self.logo_position),
            (LOGO_Y, self.logo_y),
            (BANNER_Y, self.banner_y),
            (LOGO_SIZE, self.logo_size),
            (LOGO_ROTATION, self.logo_rotation),
            (LOGO_OPACITY, self.logo_opacity),
        ]
    }

    /// Return a copy with `key` set to `value`
    pub fn with(mut self, key: &str, value: i32) -> Result<Self, ConfigError> {
        let field = match key {
            "banner_size" => &mut self.banner_size,
            "logo_position" => &mut self.logo_position,
            "logo_y" => &mut self.logo_y,
            "banner_y" => &mut self.banner_y,
            "logo_size" => &mut self.logo_size,
            "logo_rotation" => &mut self.logo_rotation,
            "logo_opacity" => &mut self.logo_opacity,
            _ => {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                })
            }
        };
        *field = value;
        Ok(self)
    }

    /// Reject the first field that falls outside its slider range
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (spec, value) in self.entries() {
            if !spec.contains(value) {
                return Err(ConfigError::InvalidValue {
                    key: format!("layout.{}", spec.key),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Return a copy with every field clamped into its slider range
    pub fn clamped(&self) -> Self {
        Self {
            banner_size: BANNER_SIZE.clamp(self.banner_size),
            logo_position: LOGO_POSITION.clamp(self.logo_position),
            logo_y: LOGO_Y.clamp(self.logo_y),
            banner_y: BANNER_Y.clamp(self.banner_y),
            logo_size: LOGO_SIZE.clamp(self.logo_size),
            logo_rotation: LOGO_ROTATION.clamp(self.logo_rotation),
            logo_opacity: LOGO_OPACITY.clamp(self.logo_opacity),
        }
    }
}

/// Read access to a front-end control's current integer value
pub trait SliderValue {
    fn get(&self) -> i32;
}

impl SliderValue for i32 {
    fn get(&self) -> i32 {
        *self
    }
}

impl SliderValue for Cell<i32> {
    fn get(&self) -> i32 {
        Cell::get(self)
    }
}

/// One bound control per layout field
///
/// A UI wires each widget here explicitly instead of assigning attributes by name.
pub struct LayoutControls<'a> {
    pub banner_size: &'a dyn SliderValue,
    pub logo_position: &'a dyn SliderValue,
    pub logo_y: &'a dyn SliderValue,
    pub banner_y: &'a dyn SliderValue,
    pub logo_size: &'a dyn SliderValue,
    pub logo_rotation: &'a dyn SliderValue,
    pub logo_opacity: &'a dyn SliderValue,
}
