//! Renderer-independent figures.
//!
//! A `Figure` is plain owned data: a canvas size, a title and an ordered
//! list of shapes. Shapes carry a class so callers (and tests) can pick
//! out bars, slices or legend entries without parsing the SVG.

pub mod bar;
pub mod pie;

pub use bar::render_bar;
pub use pie::{pie_slices, render_pie, PieSlice};

use crate::error::ThermostatResult;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_svg(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        class: &'static str,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: String,
    },
    Line {
        class: &'static str,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    /// `rotate` is in degrees, clockwise on screen.
    Text {
        class: &'static str,
        x: f64,
        y: f64,
        content: String,
        size: f64,
        anchor: Anchor,
        rotate: f64,
    },
    /// Angles in degrees, counter-clockwise from the positive x axis.
    Wedge {
        class: &'static str,
        cx: f64,
        cy: f64,
        r: f64,
        start_deg: f64,
        end_deg: f64,
        fill: String,
    },
    Disc {
        class: &'static str,
        cx: f64,
        cy: f64,
        r: f64,
        fill: String,
    },
}

impl Shape {
    pub fn class(&self) -> &'static str {
        match self {
            Self::Rect { class, .. }
            | Self::Line { class, .. }
            | Self::Text { class, .. }
            | Self::Wedge { class, .. }
            | Self::Disc { class, .. } => *class,
        }
    }

    pub fn fill(&self) -> Option<&str> {
        match self {
            Self::Rect { fill, .. } | Self::Wedge { fill, .. } | Self::Disc { fill, .. } => {
                Some(fill.as_str())
            }
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text { content, .. } => Some(content.as_str()),
            _ => None,
        }
    }

    pub(crate) fn label(
        class: &'static str,
        x: f64,
        y: f64,
        content: impl Into<String>,
        size: f64,
        anchor: Anchor,
    ) -> Self {
        Self::Text {
            class,
            x,
            y,
            content: content.into(),
            size,
            anchor,
            rotate: 0.0,
        }
    }

    fn to_svg(&self) -> String {
        match self {
            Self::Rect {
                class,
                x,
                y,
                width,
                height,
                fill,
            } => format!(
                r#"<rect class="{class}" x="{x:.2}" y="{y:.2}" width="{width:.2}" height="{height:.2}" fill="{}"/>"#,
                escape(fill)
            ),
            Self::Line {
                class,
                x1,
                y1,
                x2,
                y2,
            } => format!(
                r#"<line class="{class}" x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}" stroke="black"/>"#
            ),
            Self::Text {
                class,
                x,
                y,
                content,
                size,
                anchor,
                rotate,
            } => {
                let transform = if *rotate == 0.0 {
                    String::new()
                } else {
                    format!(r#" transform="rotate({rotate:.1} {x:.2} {y:.2})""#)
                };
                format!(
                    r#"<text class="{class}" x="{x:.2}" y="{y:.2}" font-size="{size:.0}" text-anchor="{}"{transform}>{}</text>"#,
                    anchor.as_svg(),
                    escape(content)
                )
            }
            Self::Wedge {
                class,
                cx,
                cy,
                r,
                start_deg,
                end_deg,
                fill,
            } => {
                let (x0, y0) = polar(*cx, *cy, *r, *start_deg);
                let (x1, y1) = polar(*cx, *cy, *r, *end_deg);
                let large_arc = u8::from(end_deg - start_deg > 180.0);
                // sweep-flag 0: counter-clockwise on screen.
                format!(
                    r#"<path class="{class}" d="M {cx:.2} {cy:.2} L {x0:.2} {y0:.2} A {r:.2} {r:.2} 0 {large_arc} 0 {x1:.2} {y1:.2} Z" fill="{}" stroke="white"/>"#,
                    escape(fill)
                )
            }
            Self::Disc {
                class,
                cx,
                cy,
                r,
                fill,
            } => format!(
                r#"<circle class="{class}" cx="{cx:.2}" cy="{cy:.2}" r="{r:.2}" fill="{}"/>"#,
                escape(fill)
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub width: f64,
    pub height: f64,
    pub title: String,
    pub shapes: Vec<Shape>,
}

impl Figure {
    pub fn new(width: f64, height: f64, title: impl Into<String>) -> Self {
        Self {
            width,
            height,
            title: title.into(),
            shapes: Vec::new(),
        }
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn shapes_of<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Shape> + 'a {
        self.shapes.iter().filter(move |s| s.class() == class)
    }

    pub fn count(&self, class: &str) -> usize {
        self.shapes_of(class).count()
    }

    /// Serialize to a standalone SVG document.
    pub fn to_svg(&self) -> String {
        let (w, h) = (self.width, self.height);
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}" font-family="sans-serif">"#
        );
        svg.push('\n');
        svg.push_str(&format!(
            r#"<rect class="background" x="0" y="0" width="{w:.0}" height="{h:.0}" fill="white"/>"#
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"<text class="title" x="{:.2}" y="36" font-size="20" text-anchor="middle">{}</text>"#,
            w / 2.0,
            escape(&self.title)
        ));
        svg.push('\n');
        for shape in &self.shapes {
            svg.push_str(&shape.to_svg());
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }

    pub fn save(&self, path: impl AsRef<Path>) -> ThermostatResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_svg())?;
        log::info!("chart: wrote {}", path.display());
        Ok(())
    }
}

/// Screen coordinates of a point at `deg` on a circle (y grows downward).
pub(crate) fn polar(cx: f64, cy: f64, r: f64, deg: f64) -> (f64, f64) {
    let rad = deg.to_radians();
    (cx + r * rad.cos(), cy - r * rad.sin())
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
