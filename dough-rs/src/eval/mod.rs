mod fitness;
mod validation;

#[doc(inline)]
pub use fitness::FITNESS_INFEASIBLE;
#[doc(inline)]
pub use fitness::count_defects;
#[doc(inline)]
pub use fitness::fitness;
#[doc(inline)]
pub use fitness::fitness_of_genes;
#[doc(inline)]
pub use fitness::is_valid_placement;
#[doc(inline)]
pub use fitness::uncovered_length;
#[doc(inline)]
pub use validation::Anomaly;
#[doc(inline)]
pub use validation::ValidationReport;
#[doc(inline)]
pub use validation::validate;
