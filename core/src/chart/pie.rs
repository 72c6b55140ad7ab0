//! Share of customers per risk tag.

use super::{polar, Anchor, Figure, Shape};
use crate::evaluator::{EvaluatedRecord, RiskDistribution, RiskTag};

const SIZE: f64 = 800.0;
const CENTER_X: f64 = SIZE / 2.0;
const CENTER_Y: f64 = SIZE / 2.0 + 20.0;
const RADIUS: f64 = 280.0;
const START_DEG: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieSlice {
    pub tag: RiskTag,
    pub count: usize,
    pub fraction: f64,
    pub start_deg: f64,
    pub end_deg: f64,
}

impl PieSlice {
    pub fn mid_deg(&self) -> f64 {
        (self.start_deg + self.end_deg) / 2.0
    }
}

/// Slices for every tag present, most frequent first, laid out
/// counter-clockwise from 12 o'clock.
pub fn pie_slices(records: &[EvaluatedRecord]) -> Vec<PieSlice> {
    let dist = RiskDistribution::from_records(records);
    let total = dist.total();
    let mut start_deg = START_DEG;
    dist.present()
        .into_iter()
        .map(|(tag, count)| {
            let fraction = count as f64 / total as f64;
            let end_deg = start_deg + fraction * 360.0;
            let slice = PieSlice {
                tag,
                count,
                fraction,
                start_deg,
                end_deg,
            };
            start_deg = end_deg;
            slice
        })
        .collect()
}

pub fn render_pie(records: &[EvaluatedRecord]) -> Figure {
    let mut fig = Figure::new(SIZE, SIZE, "Impact to Business");
    let slices = pie_slices(records);

    for slice in &slices {
        let fill = slice.tag.color().to_string();
        if slices.len() == 1 {
            // An SVG arc cannot close a full turn.
            fig.push(Shape::Disc {
                class: "slice",
                cx: CENTER_X,
                cy: CENTER_Y,
                r: RADIUS,
                fill,
            });
        } else {
            fig.push(Shape::Wedge {
                class: "slice",
                cx: CENTER_X,
                cy: CENTER_Y,
                r: RADIUS,
                start_deg: slice.start_deg,
                end_deg: slice.end_deg,
                fill,
            });
        }

        let mid = slice.mid_deg();
        let (lx, ly) = polar(CENTER_X, CENTER_Y, RADIUS * 1.1, mid);
        let anchor = if mid.to_radians().cos() >= 0.0 {
            Anchor::Start
        } else {
            Anchor::End
        };
        fig.push(Shape::label("slice-label", lx, ly, slice.tag.label(), 12.0, anchor));

        let (px, py) = polar(CENTER_X, CENTER_Y, RADIUS * 0.6, mid);
        fig.push(Shape::label(
            "slice-pct",
            px,
            py,
            format!("{:.1}%", slice.fraction * 100.0),
            12.0,
            Anchor::Middle,
        ));
    }

    log::debug!("chart: pie chart with {} slices", slices.len());
    fig
}
