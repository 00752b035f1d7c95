use anyhow::{Context, Result};
use itertools::Itertools;
use log::warn;

use crate::entities::{
    Board, Catalog, Defect, DefectClass, DefectThresholds, Instance, Item,
};
use crate::io::ext_repr::{ExtBoard, ExtInstance, ExtItem, ExtThresholds};

/// Imports an instance into the library
pub fn import(ext_instance: &ExtInstance) -> Result<Instance> {
    let board = import_board(&ext_instance.board)?;
    let catalog = match &ext_instance.items {
        None => Catalog::default_biscuits(),
        Some(ext_items) => import_catalog(ext_items)?,
    };
    Ok(Instance::new(ext_instance.name.clone(), board, catalog))
}

/// Imports the board. Defects of an unknown class are skipped with a warning,
/// defects outside the board are an error.
pub fn import_board(ext_board: &ExtBoard) -> Result<Board> {
    let mut board = Board::new(ext_board.length, [])?;
    let mut n_skipped = 0;
    for (i, ext_defect) in ext_board.defects.iter().enumerate() {
        match DefectClass::from_label(&ext_defect.class) {
            Some(class) => board
                .add_defect(Defect::new(ext_defect.x, class))
                .with_context(|| format!("invalid defect #{i}"))?,
            None => {
                warn!(
                    "[IMPORT] skipping defect #{i} at {} with unknown class {:?}",
                    ext_defect.x, ext_defect.class
                );
                n_skipped += 1;
            }
        }
    }
    if n_skipped > 0 {
        warn!("[IMPORT] {n_skipped} defect(s) of unknown class were skipped");
    }
    Ok(board)
}

pub fn import_catalog(ext_items: &[ExtItem]) -> Result<Catalog> {
    let items = ext_items
        .iter()
        .sorted_by_key(|ext_item| ext_item.id)
        .map(import_item)
        .collect::<Result<Vec<Item>>>()?;
    Catalog::new(items)
}

pub fn import_item(ext_item: &ExtItem) -> Result<Item> {
    let id = ext_item.id as usize;
    let name = ext_item
        .name
        .clone()
        .unwrap_or_else(|| format!("item_{id}"));
    Item::new(
        id,
        name,
        ext_item.length,
        ext_item.value,
        import_thresholds(&ext_item.max_defects),
    )
}

fn import_thresholds(ext: &ExtThresholds) -> DefectThresholds {
    DefectThresholds([ext.a, ext.b, ext.c])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ext_repr::ExtDefect;

    fn ext_board(defects: &[(f32, &str)]) -> ExtBoard {
        ExtBoard {
            length: 10,
            defects: defects
                .iter()
                .map(|(x, class)| ExtDefect {
                    x: *x,
                    class: class.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn unknown_classes_are_skipped() {
        let board = import_board(&ext_board(&[(1.0, "a"), (2.0, "z"), (3.0, "C")])).unwrap();
        assert_eq!(board.defects().len(), 2);
        assert_eq!(board.defects()[1].class, DefectClass::C);
    }

    #[test]
    fn out_of_range_defects_fail_the_import() {
        assert!(import_board(&ext_board(&[(1.0, "a"), (10.5, "b")])).is_err());
    }

    #[test]
    fn instance_json_roundtrip_through_import() {
        let json = r#"{
            "Name": "toy",
            "Board": { "Length": 10, "Defects": [{ "X": 0.5, "Class": "b" }] },
            "Items": [
                { "Id": 1, "Length": 2, "Value": 1.0, "MaxDefects": { "a": 0 } },
                { "Id": 0, "Name": "long", "Length": 4, "Value": 3.0 }
            ]
        }"#;
        let ext: ExtInstance = serde_json::from_str(json).unwrap();
        let instance = import(&ext).unwrap();
        assert_eq!(instance.name, "toy");
        assert_eq!(instance.catalog.item(0).name, "long");
        assert_eq!(instance.catalog.item(1).name, "item_1");
        assert_eq!(
            instance.catalog.item(1).max_defects,
            DefectThresholds([Some(0), None, None])
        );
        assert_eq!(instance.board.defects().len(), 1);
    }

    #[test]
    fn gaps_in_item_ids_fail_the_import() {
        let json = r#"[
            { "Id": 0, "Length": 2, "Value": 1.0 },
            { "Id": 2, "Length": 4, "Value": 3.0 }
        ]"#;
        let ext_items: Vec<ExtItem> = serde_json::from_str(json).unwrap();
        assert!(import_catalog(&ext_items).is_err());
        assert!(import_catalog(&ext_items[..1]).is_ok());
    }

    #[test]
    fn missing_items_fall_back_to_default_catalog() {
        let ext = ExtInstance {
            name: "default".into(),
            board: ext_board(&[]),
            items: None,
        };
        assert_eq!(import(&ext).unwrap().catalog, Catalog::default_biscuits());
    }
}
