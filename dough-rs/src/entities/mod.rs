mod board;
mod catalog;
mod defect;
mod instance;
mod item;
mod placement;
mod solution;

#[doc(inline)]
pub use board::Board;

#[doc(inline)]
pub use catalog::Catalog;

#[doc(inline)]
pub use defect::Defect;

#[doc(inline)]
pub use defect::DefectClass;

#[doc(inline)]
pub use defect::DefectCounts;

#[doc(inline)]
pub use defect::N_DEFECT_CLASSES;

#[doc(inline)]
pub use instance::Instance;

#[doc(inline)]
pub use item::DefectThresholds;

#[doc(inline)]
pub use item::Item;

#[doc(inline)]
pub use placement::Gene;

#[doc(inline)]
pub use placement::Placement;

#[doc(inline)]
pub use solution::Solution;
