use std::fmt::{Display, Formatter};
use std::ops::{Add, AddAssign, Index, IndexMut, Sub};

use serde::{Deserialize, Serialize};

/// Number of distinct defect classes.
pub const N_DEFECT_CLASSES: usize = 3;

/// Class of a defect on the [`Board`](crate::entities::Board). The set of classes is closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DefectClass {
    #[serde(rename = "a")]
    A,
    #[serde(rename = "b")]
    B,
    #[serde(rename = "c")]
    C,
}

impl DefectClass {
    pub const ALL: [DefectClass; N_DEFECT_CLASSES] =
        [DefectClass::A, DefectClass::B, DefectClass::C];

    /// Parses a class label, case-insensitive. Returns `None` for unknown labels.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "a" | "A" => Some(DefectClass::A),
            "b" | "B" => Some(DefectClass::B),
            "c" | "C" => Some(DefectClass::C),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            DefectClass::A => "a",
            DefectClass::B => "b",
            DefectClass::C => "c",
        }
    }
}

impl Display for DefectClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A point flaw on the board.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Defect {
    pub position: f32,
    pub class: DefectClass,
}

impl Defect {
    pub fn new(position: f32, class: DefectClass) -> Self {
        Self { position, class }
    }
}

/// Number of defects per class, stored in a fixed-size array indexed by [`DefectClass`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DefectCounts(pub [u32; N_DEFECT_CLASSES]);

impl DefectCounts {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, class: DefectClass) {
        self.0[class.index()] += 1;
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DefectClass, u32)> + '_ {
        DefectClass::ALL.iter().map(|c| (*c, self.0[c.index()]))
    }
}

impl Index<DefectClass> for DefectCounts {
    type Output = u32;

    fn index(&self, class: DefectClass) -> &u32 {
        &self.0[class.index()]
    }
}

impl IndexMut<DefectClass> for DefectCounts {
    fn index_mut(&mut self, class: DefectClass) -> &mut u32 {
        &mut self.0[class.index()]
    }
}

impl Add for DefectCounts {
    type Output = DefectCounts;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign for DefectCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.0.iter_mut().zip(rhs.0).for_each(|(a, b)| *a += b);
    }
}

/// Element-wise difference, used on prefix sums where `self >= rhs` always holds.
impl Sub for DefectCounts {
    type Output = DefectCounts;

    fn sub(mut self, rhs: Self) -> Self::Output {
        self.0.iter_mut().zip(rhs.0).for_each(|(a, b)| *a -= b);
        self
    }
}

impl Display for DefectCounts {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{a: {}, b: {}, c: {}}}", self.0[0], self.0[1], self.0[2])
    }
}
