//! Per-customer exposure bar chart.

use super::{Anchor, Figure, Shape};
use crate::evaluator::{EvaluatedRecord, RiskTag};

const WIDTH: f64 = 1200.0;
const HEIGHT: f64 = 600.0;
const MARGIN_LEFT: f64 = 110.0;
const MARGIN_RIGHT: f64 = 210.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 100.0;
const Y_TICKS: u32 = 5;

/// One bar per customer, colored by risk tag and annotated with the
/// delinquent-day count.
pub fn render_bar(records: &[EvaluatedRecord]) -> Figure {
    let mut fig = Figure::new(WIDTH, HEIGHT, "Customer Impact to Business");

    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let baseline = MARGIN_TOP + plot_h;

    let max_cost = records
        .iter()
        .map(|r| r.cost_to_business)
        .fold(0.0, f64::max);
    let y_max = nice_ceiling(max_cost);

    draw_axes(&mut fig, plot_w, plot_h, y_max);

    let slot = plot_w / records.len().max(1) as f64;
    let bar_w = slot * 0.8;
    for (i, r) in records.iter().enumerate() {
        let x = MARGIN_LEFT + slot * i as f64 + (slot - bar_w) / 2.0;
        let h = r.cost_to_business / y_max * plot_h;
        let top = baseline - h;
        let center = x + bar_w / 2.0;

        fig.push(Shape::Rect {
            class: "bar",
            x,
            y: top,
            width: bar_w,
            height: h,
            fill: r.risk_tag.color().to_string(),
        });
        fig.push(Shape::label(
            "annotation",
            center,
            top - 4.0,
            format!("{}d", r.record.days_delinquent),
            10.0,
            Anchor::Middle,
        ));
        fig.push(Shape::Text {
            class: "tick-x",
            x: center,
            y: baseline + 16.0,
            content: r.record.customer_id.to_string(),
            size: 10.0,
            anchor: Anchor::End,
            rotate: -45.0,
        });
    }

    draw_legend(&mut fig);
    log::debug!("chart: bar chart with {} bars (y_max={y_max})", records.len());
    fig
}

fn draw_axes(fig: &mut Figure, plot_w: f64, plot_h: f64, y_max: f64) {
    let baseline = MARGIN_TOP + plot_h;
    fig.push(Shape::Line {
        class: "axis",
        x1: MARGIN_LEFT,
        y1: baseline,
        x2: MARGIN_LEFT + plot_w,
        y2: baseline,
    });
    fig.push(Shape::Line {
        class: "axis",
        x1: MARGIN_LEFT,
        y1: MARGIN_TOP,
        x2: MARGIN_LEFT,
        y2: baseline,
    });

    for k in 0..=Y_TICKS {
        let value = y_max * f64::from(k) / f64::from(Y_TICKS);
        let y = baseline - plot_h * f64::from(k) / f64::from(Y_TICKS);
        fig.push(Shape::Line {
            class: "tick-y",
            x1: MARGIN_LEFT - 5.0,
            y1: y,
            x2: MARGIN_LEFT,
            y2: y,
        });
        fig.push(Shape::label(
            "tick-y",
            MARGIN_LEFT - 8.0,
            y + 4.0,
            format_tick(value),
            10.0,
            Anchor::End,
        ));
    }

    fig.push(Shape::label(
        "axis-label",
        MARGIN_LEFT + plot_w / 2.0,
        HEIGHT - 20.0,
        "Customer ID",
        20.0,
        Anchor::Middle,
    ));
    fig.push(Shape::Text {
        class: "axis-label",
        x: 30.0,
        y: MARGIN_TOP + plot_h / 2.0,
        content: "Current Total Cost to Business ($)".into(),
        size: 20.0,
        anchor: Anchor::Middle,
        rotate: -90.0,
    });
}

fn draw_legend(fig: &mut Figure) {
    let x = WIDTH - MARGIN_RIGHT + 24.0;
    let mut y = MARGIN_TOP + 10.0;
    fig.push(Shape::label("legend-title", x, y, "Impact Levels", 14.0, Anchor::Start));
    for tag in RiskTag::ALL {
        y += 26.0;
        fig.push(Shape::Rect {
            class: "legend",
            x,
            y: y - 11.0,
            width: 28.0,
            height: 12.0,
            fill: tag.color().to_string(),
        });
        fig.push(Shape::label("legend", x + 36.0, y, tag.label(), 12.0, Anchor::Start));
    }
}

/// Smallest 1/2/5 x 10^k at or above `v`. Non-positive input gives 1.
pub(crate) fn nice_ceiling(v: f64) -> f64 {
    if v <= 0.0 || !v.is_finite() {
        return 1.0;
    }
    let exp = 10f64.powi(v.log10().floor() as i32);
    let f = v / exp;
    let nice = if f <= 1.0 {
        1.0
    } else if f <= 2.0 {
        2.0
    } else if f <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * exp
}

fn format_tick(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_ceiling_rounds_up_to_1_2_5() {
        assert_eq!(nice_ceiling(0.0), 1.0);
        assert_eq!(nice_ceiling(96.9), 100.0);
        assert_eq!(nice_ceiling(21.5), 50.0);
        assert_eq!(nice_ceiling(150.0), 200.0);
        assert_eq!(nice_ceiling(100.0), 100.0);
    }

    #[test]
    fn tick_labels_drop_needless_decimals() {
        assert_eq!(format_tick(20.0), "20");
        assert_eq!(format_tick(0.4), "0.4");
    }
}
