// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG dump utilities for `tally_charts_demo`.

use kurbo::Rect;
use peniko::Brush;
use tally_core::{MarkPayload, Surface, SurfaceGrid, TextAnchor, TextBaseline};

fn write_header(out: &mut String, view: Rect) {
    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
    out.push_str(&format!(
        r#"viewBox="{} {} {} {}" width="{}" height="{}" preserveAspectRatio="xMinYMin meet">"#,
        view.x0,
        view.y0,
        view.width(),
        view.height(),
        view.width(),
        view.height()
    ));
    out.push('\n');
}

fn write_paint_attr(out: &mut String, attr: &str, brush: &Brush) {
    match brush {
        Brush::Solid(color) => {
            let [r, g, b, a] = color.components;
            #[allow(
                clippy::cast_possible_truncation,
                reason = "clamped to [0, 255] before the cast"
            )]
            let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
            out.push_str(&format!(
                r##" {}="#{:02x}{:02x}{:02x}""##,
                attr,
                to_u8(r),
                to_u8(g),
                to_u8(b)
            ));
            if a < 1.0 {
                out.push_str(&format!(r#" {attr}-opacity="{a}""#));
            }
        }
        _ => {
            out.push_str(&format!(r#" {attr}="none""#));
        }
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn write_surface(out: &mut String, surface: &Surface) {
    for mark in surface.marks_sorted() {
        match &mark.payload {
            MarkPayload::Rect(r) => {
                out.push_str(&format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                    r.rect.x0,
                    r.rect.y0,
                    r.rect.width(),
                    r.rect.height(),
                ));
                write_paint_attr(out, "fill", &r.fill);
                out.push_str("/>\n");
            }
            MarkPayload::Text(t) => {
                let baseline = match t.baseline {
                    TextBaseline::Alphabetic => "alphabetic",
                    TextBaseline::Middle => "middle",
                    TextBaseline::Hanging => "hanging",
                };
                out.push_str(&format!(
                    r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{}""#,
                    t.pos.x, t.pos.y, t.font_size, baseline
                ));
                if t.angle != 0.0 {
                    out.push_str(&format!(
                        r#" transform="rotate({} {} {})""#,
                        t.angle, t.pos.x, t.pos.y
                    ));
                }
                out.push_str(match t.anchor {
                    TextAnchor::Start => r#" text-anchor="start""#,
                    TextAnchor::Middle => r#" text-anchor="middle""#,
                    TextAnchor::End => r#" text-anchor="end""#,
                });
                write_paint_attr(out, "fill", &t.fill);
                out.push('>');
                out.push_str(&escape_xml(&t.text));
                out.push_str("</text>\n");
            }
            MarkPayload::Path(p) => {
                let d = p.path.to_svg();
                out.push_str(&format!(r#"<path d="{d}""#));
                write_paint_attr(out, "fill", &p.fill);
                if p.stroke_width > 0.0 {
                    write_paint_attr(out, "stroke", &p.stroke);
                    out.push_str(&format!(r#" stroke-width="{}""#, p.stroke_width));
                }
                out.push_str("/>\n");
            }
        }
    }
}

/// Renders one surface as a standalone SVG document.
pub(crate) fn surface_svg(surface: &Surface) -> String {
    let mut out = String::new();
    write_header(&mut out, surface.area());
    write_surface(&mut out, surface);
    out.push_str("</svg>\n");
    out
}

/// Renders a whole surface grid as one SVG document.
pub(crate) fn grid_svg(grid: &SurfaceGrid) -> String {
    let mut out = String::new();
    write_header(&mut out, grid.view());
    for (_row, _col, surface) in grid.iter() {
        write_surface(&mut out, surface);
    }
    out.push_str("</svg>\n");
    out
}
