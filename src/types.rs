use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Semantic class id as written in the annotation files.
pub type ClassId = i64;

/// Number of decimals both point sources are quantized to before matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Precision(u32);

impl Precision {
    /// Largest supported number of decimals. Keeps `10^decimals` exact in `f64`.
    pub const MAX_DECIMALS: u32 = 9;

    pub fn new(decimals: u32) -> Option<Self> {
        (decimals <= Self::MAX_DECIMALS).then_some(Self(decimals))
    }

    pub fn decimals(self) -> u32 {
        self.0
    }

    fn scale(self) -> f64 {
        10f64.powi(self.0 as i32)
    }

    /// Round `value` to this precision and return it in fixed-point units.
    ///
    /// Ties go to the even neighbour. `None` when the scaled value does not
    /// fit in an `i64`; a saturating cast would fold distinct points together.
    pub fn quantize(self, value: f64) -> Option<i64> {
        let scaled = (value * self.scale()).round_ties_even();
        // i64::MAX as f64 rounds up to 2^63, which is already out of range.
        (scaled.is_finite() && scaled >= i64::MIN as f64 && scaled < i64::MAX as f64)
            .then_some(scaled as i64)
    }

    /// Inverse of [`quantize`](Self::quantize).
    pub fn to_f64(self, fixed: i64) -> f64 {
        fixed as f64 / self.scale()
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self(2)
    }
}

/// Fixed-precision coordinate triple used as the matching key.
///
/// Each component is the coordinate multiplied by `10^decimals` and rounded,
/// so `1.0` and `1.00` map to the same key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PointKey {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl PointKey {
    /// `None` if any coordinate is out of range at `precision`.
    pub fn quantize(x: f64, y: f64, z: f64, precision: Precision) -> Option<Self> {
        Some(Self {
            x: precision.quantize(x)?,
            y: precision.quantize(y)?,
            z: precision.quantize(z)?,
        })
    }

    /// Back to floating point coordinates.
    pub fn to_f64(self, precision: Precision) -> [f64; 3] {
        [
            precision.to_f64(self.x),
            precision.to_f64(self.y),
            precision.to_f64(self.z),
        ]
    }

    /// Formats the key as `"x, y, z"` with exactly `precision` decimals.
    pub fn display(self, precision: Precision) -> PointKeyDisplay {
        PointKeyDisplay {
            key: self,
            precision,
        }
    }
}

pub struct PointKeyDisplay {
    key: PointKey,
    precision: Precision,
}

impl fmt::Display for PointKeyDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.key.to_f64(self.precision);
        let d = self.precision.decimals() as usize;
        write!(f, "{x:.d$}, {y:.d$}, {z:.d$}")
    }
}

/// Tree part classes the segmentation is expected to recover.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TreeClass {
    Foliage,
    SmallTrunk,
    LargeTrunk,
    ThinBranch,
    ThickBranch,
}

impl TreeClass {
    pub const ALL: [TreeClass; 5] = [
        TreeClass::Foliage,
        TreeClass::SmallTrunk,
        TreeClass::LargeTrunk,
        TreeClass::ThinBranch,
        TreeClass::ThickBranch,
    ];

    pub fn id(self) -> ClassId {
        match self {
            TreeClass::Foliage => 1300,
            TreeClass::SmallTrunk => 1302,
            TreeClass::LargeTrunk => 1303,
            TreeClass::ThinBranch => 1304,
            TreeClass::ThickBranch => 1305,
        }
    }

    pub fn from_id(id: ClassId) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.id() == id)
    }

    pub fn name(self) -> &'static str {
        match self {
            TreeClass::Foliage => "foliage",
            TreeClass::SmallTrunk => "small_trunk",
            TreeClass::LargeTrunk => "large_trunk",
            TreeClass::ThinBranch => "thin_branch",
            TreeClass::ThickBranch => "thick_branch",
        }
    }
}

/// Class ids counted as foreground: points the segmentation should output.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ForegroundClasses(BTreeSet<ClassId>);

impl ForegroundClasses {
    /// The five tree part classes (1300, 1302, 1303, 1304, 1305).
    pub fn tree_parts() -> Self {
        Self(TreeClass::ALL.iter().map(|c| c.id()).collect())
    }

    pub fn contains(&self, id: ClassId) -> bool {
        self.0.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ClassId> + '_ {
        self.0.iter().copied()
    }
}

impl Default for ForegroundClasses {
    fn default() -> Self {
        Self::tree_parts()
    }
}

impl FromIterator<ClassId> for ForegroundClasses {
    fn from_iter<I: IntoIterator<Item = ClassId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Human readable label for a class id, falling back to the raw number.
pub fn class_label(id: ClassId) -> String {
    TreeClass::from_id(id)
        .map(|c| c.name().to_string())
        .unwrap_or_else(|| id.to_string())
}
