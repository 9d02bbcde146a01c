use std::path::Path;

use anyhow::bail;
use grdscope::{GradientMap, GradientPoint};
use serde::Serialize;

use crate::{
    app::{DecodeOptions, GlobalOptions},
    commands::common::load_gradients,
    output::{print_output, unit, Align, Columns},
};

#[derive(Debug, Serialize)]
pub struct PointInfo {
    pub location: f64,
    pub color: String,
    pub rgb: [u8; 3],
    pub opacity: f64,
}

impl From<&GradientPoint> for PointInfo {
    fn from(point: &GradientPoint) -> Self {
        PointInfo {
            location: point.location,
            color: point.color.to_hex(),
            rgb: [point.color.r, point.color.g, point.color.b],
            opacity: point.opacity,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GradientDump {
    pub name: String,
    pub points: Vec<PointInfo>,
}

fn dump(map: &GradientMap, samples: Option<usize>) -> GradientDump {
    let points = match samples {
        Some(count) => {
            let steps = count.saturating_sub(1).max(1) as f64;
            (0..count)
                .filter_map(|i| map.sample(i as f64 / steps))
                .map(|point| PointInfo::from(&point))
                .collect()
        }
        None => map.points.iter().map(PointInfo::from).collect(),
    };

    GradientDump {
        name: map.name.clone(),
        points,
    }
}

pub fn run(
    path: &Path,
    name: Option<&str>,
    samples: Option<usize>,
    decode: &DecodeOptions,
    opts: &GlobalOptions,
) -> anyhow::Result<()> {
    let gradients = load_gradients(path, decode)?;

    let dumps: Vec<GradientDump> = match name {
        Some(name) => match gradients.get(name) {
            Some(map) => vec![dump(map, samples)],
            None => bail!("no gradient named '{name}' in {}", path.display()),
        },
        None => gradients
            .gradients()
            .iter()
            .map(|map| dump(map, samples))
            .collect(),
    };

    print_output(&dumps, opts, |dumps| {
        for (i, gradient) in dumps.iter().enumerate() {
            if i > 0 {
                println!();
            }
            println!("{} ({} points)", gradient.name, gradient.points.len());

            let mut columns = Columns::new(&[
                ("Location", Align::Right),
                ("Color", Align::Left),
                ("Opacity", Align::Right),
            ])
            .indent("  ");
            for point in &gradient.points {
                columns.row(vec![
                    unit(point.location),
                    point.color.clone(),
                    unit(point.opacity),
                ]);
            }
            columns.print();
        }
    })
}
