use crate::entities::{Board, Catalog};

/// A problem instance: a board and the catalog of items which can be placed on it.
/// Read-only for the duration of any search.
#[derive(Clone, Debug)]
pub struct Instance {
    pub name: String,
    pub board: Board,
    pub catalog: Catalog,
}

impl Instance {
    pub fn new(name: impl Into<String>, board: Board, catalog: Catalog) -> Self {
        Self {
            name: name.into(),
            board,
            catalog,
        }
    }
}
