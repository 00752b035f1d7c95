use svg::Document;
use svg::node::element::{Group, Line, Rectangle, Text, Title};

use crate::entities::{Instance, Solution};
use crate::eval;
use crate::io::svg::svg_util;
use crate::io::svg::svg_util::SvgDrawOptions;

/// Draws the board, its defects and the placements of a solution.
pub fn solution_to_svg(
    instance: &Instance,
    solution: &Solution,
    options: SvgDrawOptions,
    title: &str,
) -> Document {
    let Instance { board, catalog, .. } = instance;
    let theme = &options.theme;

    let length = board.length as f32;
    let height = length * options.aspect;
    let margin = 0.05 * length;
    let font_size = 0.4 * height;
    let stroke_width = height * 0.01 * theme.stroke_width_multiplier;

    let label = {
        let fitness = eval::fitness(board, catalog, solution);
        let label_content = format!(
            "length: {} | placements: {} ({} valid) | value: {:.1} | fitness: {:.1} | {}",
            board.length,
            solution.len(),
            solution.n_valid(),
            solution.valid_value(catalog),
            fitness,
            title,
        );
        Text::new(label_content)
            .set("x", 0.0)
            .set("y", -0.5 * font_size)
            .set("font-size", font_size)
            .set("font-family", "monospace")
            .set("font-weight", "500")
    };

    let board_group = Group::new()
        .set("id", "board")
        .add(
            Rectangle::new()
                .set("x", 0.0)
                .set("y", 0.0)
                .set("width", length)
                .set("height", height)
                .set("fill", format!("{}", theme.board_fill))
                .set("stroke", "black")
                .set("stroke-width", 2.0 * stroke_width),
        )
        .add(Title::new(format!("board, length: {}", board.length)));

    let item_group = {
        let mut item_group = Group::new().set("id", "placements");
        for p in solution
            .placements
            .iter()
            .filter(|p| p.is_valid || options.draw_invalid)
        {
            let item = catalog.item(p.item_id);
            let fill = match p.is_valid {
                true => theme.item_fill,
                false => theme.invalid_item_fill,
            };
            let mut group = Group::new()
                .add(
                    Rectangle::new()
                        .set("x", p.position as f32)
                        .set("y", 0.0)
                        .set("width", item.length as f32)
                        .set("height", height)
                        .set("fill", format!("{fill}"))
                        .set("fill-opacity", 0.8)
                        .set("stroke", format!("{}", svg_util::change_brightness(fill, 0.5)))
                        .set("stroke-width", stroke_width),
                )
                .add(Title::new(format!(
                    "{}, id: {}, position: {}, length: {}, value: {}, valid: {}",
                    item.name, item.id, p.position, item.length, item.value, p.is_valid
                )));
            if options.item_labels {
                group = group.add(
                    Text::new(item.name.clone())
                        .set("x", p.position as f32 + 0.1 * item.length as f32)
                        .set("y", 0.6 * height)
                        .set("font-size", 0.25 * height)
                        .set("font-family", "monospace"),
                );
            }
            item_group = item_group.add(group);
        }
        item_group
    };

    let defect_group = {
        let mut defect_group = Group::new().set("id", "defects");
        for d in board.defects() {
            defect_group = defect_group.add(
                Line::new()
                    .set("x1", d.position)
                    .set("y1", 0.0)
                    .set("x2", d.position)
                    .set("y2", height)
                    .set("stroke", format!("{}", theme.defect_fill[d.class.index()]))
                    .set("stroke-width", stroke_width)
                    .add(Title::new(format!(
                        "defect, class: {}, position: {:.3}",
                        d.class, d.position
                    ))),
            );
        }
        defect_group
    };

    Document::new()
        .set(
            "viewBox",
            (-margin, -height - margin, length + 2.0 * margin, 2.0 * height + 2.0 * margin),
        )
        .add(board_group)
        .add(item_group)
        .add(defect_group)
        .add(label)
}
