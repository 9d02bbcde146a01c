use std::path::Path;

use serde::Serialize;

use crate::{
    app::{DecodeOptions, GlobalOptions},
    commands::common::load_gradients,
    output::{print_output, Align, Columns},
};

#[derive(Debug, Serialize)]
pub struct GradientSummary {
    pub index: usize,
    pub name: String,
    pub color_stops: usize,
    pub opacity_stops: usize,
    pub points: usize,
}

pub fn run(path: &Path, decode: &DecodeOptions, opts: &GlobalOptions) -> anyhow::Result<()> {
    let gradients = load_gradients(path, decode)?;

    let rows: Vec<GradientSummary> = gradients
        .definitions()
        .iter()
        .zip(gradients.gradients())
        .enumerate()
        .map(|(index, (definition, map))| GradientSummary {
            index,
            name: map.name.clone(),
            color_stops: definition.color_stops.len(),
            opacity_stops: definition.opacity_stops.len(),
            points: map.len(),
        })
        .collect();

    print_output(&rows, opts, |rows| {
        if rows.is_empty() {
            println!("No gradients.");
            return;
        }

        let mut columns = Columns::new(&[
            ("#", Align::Right),
            ("Name", Align::Left),
            ("Colors", Align::Right),
            ("Opacities", Align::Right),
            ("Points", Align::Right),
        ]);
        for row in rows {
            columns.row(vec![
                row.index.to_string(),
                row.name.clone(),
                row.color_stops.to_string(),
                row.opacity_stops.to_string(),
                row.points.to_string(),
            ]);
        }
        columns.print();
    })
}
