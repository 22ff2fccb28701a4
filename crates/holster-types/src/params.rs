use serde::{Deserialize, Serialize};

/// Validated numeric input for one holster build. Created once per
/// invocation and read-only afterwards; every geometric quantity the
/// planner derives comes from these fields.
///
/// Field values are in raw model units; the planner applies the
/// unit-conversion scale, never this struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HolsterParams {
    /// Name given to the generated body.
    pub name: String,
    /// Width of the remote across its buttons.
    pub remote_width: f64,
    /// Length of the remote along its long axis.
    pub remote_length: f64,
    /// Thickness of the remote front-to-back.
    pub remote_thickness: f64,
    /// Width of the access slot in the front wall.
    pub front_slot_width: f64,
    /// Height of the lowered front wall.
    pub front_height: f64,
    /// Radius for rounding the two top back corners. Zero skips the pass.
    pub back_corner_round: f64,
    /// Radius of the final all-edge cosmetic fillet.
    pub soften_fillet: f64,
    /// Radius for rounding the slot's top corners. Zero skips the pass.
    pub front_slot_round: f64,
    /// Wall thickness on the sides and front.
    pub side_thickness: f64,
    /// Wall thickness behind the remote.
    pub back_thickness: f64,
    /// Floor thickness under the remote.
    pub bottom_thickness: f64,
    /// Fit allowance. Accepted and range-checked but not currently part of
    /// any derived dimension.
    pub tolerance: f64,
}

impl Default for HolsterParams {
    fn default() -> Self {
        Self {
            name: "TV Remote Holster".to_string(),
            remote_width: 80.0,
            remote_length: 44.0,
            remote_thickness: 15.0,
            front_slot_width: 10.0,
            front_height: 22.0,
            back_corner_round: 4.0,
            soften_fillet: 0.5,
            front_slot_round: 3.0,
            side_thickness: 3.0,
            back_thickness: 3.0,
            bottom_thickness: 3.0,
            tolerance: 0.5,
        }
    }
}

/// Allowed range and default for one numeric parameter. Exposed so front
/// ends can build input controls from it; `validate()` enforces the same
/// bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamRange {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

const fn range(field: &'static str, min: f64, max: f64, default: f64) -> ParamRange {
    ParamRange {
        field,
        min,
        max,
        default,
    }
}

/// Ranges for the twelve numeric fields, in declaration order.
pub const PARAM_RANGES: [ParamRange; 12] = [
    range("remote_width", 0.25, 100.0, 80.0),
    range("remote_length", 0.25, 100.0, 44.0),
    range("remote_thickness", 0.25, 100.0, 15.0),
    range("front_slot_width", 0.25, 100.0, 10.0),
    range("front_height", 0.25, 100.0, 22.0),
    range("back_corner_round", 0.0, 100.0, 4.0),
    range("soften_fillet", 0.0, 100.0, 0.5),
    range("front_slot_round", 0.0, 30.0, 3.0),
    range("side_thickness", 0.25, 100.0, 3.0),
    range("back_thickness", 0.25, 100.0, 3.0),
    range("bottom_thickness", 0.25, 100.0, 3.0),
    range("tolerance", 0.1, 10.0, 0.5),
];

/// A validation failure, reported before any planning or kernel work.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParameterError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("front_slot_width ({slot}) must be narrower than the front face ({front_face})")]
    SlotTooWide { slot: f64, front_face: f64 },

    #[error("front_height ({front_height}) cannot exceed the shell height ({shell_height})")]
    FrontTooTall {
        front_height: f64,
        shell_height: f64,
    },

    #[error("holster name must not be empty")]
    EmptyName,
}

impl HolsterParams {
    /// Numeric field values in the same order as [`PARAM_RANGES`].
    pub fn numeric_fields(&self) -> [f64; 12] {
        [
            self.remote_width,
            self.remote_length,
            self.remote_thickness,
            self.front_slot_width,
            self.front_height,
            self.back_corner_round,
            self.soften_fillet,
            self.front_slot_round,
            self.side_thickness,
            self.back_thickness,
            self.bottom_thickness,
            self.tolerance,
        ]
    }

    /// Check every field range and the cross-field ordering invariants.
    /// Fails fast with the first offending field; NaN never passes a range
    /// check.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.name.trim().is_empty() {
            return Err(ParameterError::EmptyName);
        }

        for (range, value) in PARAM_RANGES.iter().zip(self.numeric_fields()) {
            if !(value >= range.min && value <= range.max) {
                return Err(ParameterError::OutOfRange {
                    field: range.field,
                    min: range.min,
                    max: range.max,
                    value,
                });
            }
        }

        // The slot must fit within the front face width.
        let front_face = self.remote_width + 2.0 * self.side_thickness;
        if self.front_slot_width >= front_face {
            return Err(ParameterError::SlotTooWide {
                slot: self.front_slot_width,
                front_face,
            });
        }

        // The lowered front wall cannot be taller than the shell itself.
        let shell_height = self.remote_length + self.bottom_thickness;
        if self.front_height > shell_height {
            return Err(ParameterError::FrontTooTall {
                front_height: self.front_height,
                shell_height,
            });
        }

        Ok(())
    }
}
