//! Typeface fonts and extruded text geometry.
//!
//! Fonts use the typeface JSON format (glyph outlines as `m`/`l`/`q`/`b` command
//! strings in font units). Outlines are flattened with `lyon`, the caps are filled
//! with lyon's tessellator and the side walls are generated per flattened edge.

use std::collections::HashMap;

use anyhow::{Context as _, anyhow};
use cgmath::{InnerSpace, Vector3};
use lyon_path::{Path, PathEvent, iterator::PathIterator, math::point};
use lyon_tessellation::{BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, VertexBuffers};
use serde::Deserialize;

use crate::data_structures::mesh::{Geometry, MeshVertex};

#[derive(Clone, Debug, Deserialize)]
pub struct Glyph {
    /// Horizontal advance in font units.
    pub ha: f32,
    /// Outline commands, absent for whitespace.
    #[serde(default)]
    pub o: Option<String>,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typeface {
    #[serde(default)]
    pub family_name: String,
    pub glyphs: HashMap<String, Glyph>,
    pub resolution: f32,
    pub bounding_box: BoundingBox,
    #[serde(default)]
    pub underline_thickness: f32,
}

impl Typeface {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let face: Typeface = serde_json::from_str(json).context("invalid typeface json")?;
        if face.resolution <= 0.0 {
            return Err(anyhow!("typeface resolution must be positive, got {}", face.resolution));
        }
        Ok(face)
    }

    fn glyph(&self, ch: char) -> Option<&Glyph> {
        let mut buf = [0u8; 4];
        self.glyphs
            .get(ch.encode_utf8(&mut buf) as &str)
            .or_else(|| self.glyphs.get("?"))
    }

    /// Outline of `text` at `size` world units per em, one subpath per contour.
    pub fn outline(&self, text: &str, size: f32) -> Path {
        let scale = size / self.resolution;
        let bb = self.bounding_box;
        let line_height = (bb.y_max - bb.y_min + self.underline_thickness) * scale;
        let mut builder = Path::builder();
        let (mut offset_x, mut offset_y) = (0.0f32, 0.0f32);

        for ch in text.chars() {
            if ch == '\n' {
                offset_x = 0.0;
                offset_y -= line_height;
                continue;
            }
            let Some(glyph) = self.glyph(ch) else {
                log::warn!("Character '{}' does not exist in font family {}.", ch, self.family_name);
                continue;
            };
            if let Some(commands) = &glyph.o {
                if let Err(e) = trace_glyph(&mut builder, commands, scale, offset_x, offset_y) {
                    log::warn!("Skipping malformed outline for '{}': {}", ch, e);
                }
            }
            offset_x += glyph.ha * scale;
        }
        builder.build()
    }
}

fn trace_glyph(
    builder: &mut lyon_path::path::Builder,
    commands: &str,
    scale: f32,
    offset_x: f32,
    offset_y: f32,
) -> anyhow::Result<()> {
    let mut tokens = commands.split_whitespace();
    let mut open = false;
    let next = |tokens: &mut std::str::SplitWhitespace, axis_offset: f32| -> anyhow::Result<f32> {
        let raw = tokens.next().ok_or_else(|| anyhow!("truncated outline"))?;
        Ok(raw.parse::<f32>()? * scale + axis_offset)
    };

    while let Some(action) = tokens.next() {
        match action {
            "m" => {
                let x = next(&mut tokens, offset_x)?;
                let y = next(&mut tokens, offset_y)?;
                if open {
                    builder.end(true);
                }
                builder.begin(point(x, y));
                open = true;
            }
            "l" => {
                let x = next(&mut tokens, offset_x)?;
                let y = next(&mut tokens, offset_y)?;
                builder.line_to(point(x, y));
            }
            // end point first, then the control point
            "q" => {
                let x = next(&mut tokens, offset_x)?;
                let y = next(&mut tokens, offset_y)?;
                let cx = next(&mut tokens, offset_x)?;
                let cy = next(&mut tokens, offset_y)?;
                builder.quadratic_bezier_to(point(cx, cy), point(x, y));
            }
            "b" => {
                let x = next(&mut tokens, offset_x)?;
                let y = next(&mut tokens, offset_y)?;
                let c1x = next(&mut tokens, offset_x)?;
                let c1y = next(&mut tokens, offset_y)?;
                let c2x = next(&mut tokens, offset_x)?;
                let c2y = next(&mut tokens, offset_y)?;
                builder.cubic_bezier_to(point(c1x, c1y), point(c2x, c2y), point(x, y));
            }
            "z" => {
                if open {
                    builder.end(true);
                    open = false;
                }
            }
            other => return Err(anyhow!("unknown outline command {other:?}")),
        }
    }
    if open {
        builder.end(true);
    }
    Ok(())
}

/// Parameters for [`extrude_text`].
#[derive(Clone, Copy, Debug)]
pub struct TextOptions {
    /// Height of an em in world units.
    pub size: f32,
    /// Extrusion depth along +z.
    pub depth: f32,
    /// Maximum distance between curves and their flattened polylines.
    pub tolerance: f32,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            size: 100.0,
            depth: 50.0,
            tolerance: 0.5,
        }
    }
}

impl TextOptions {
    pub fn new(size: f32, depth: f32) -> Self {
        Self {
            size,
            depth,
            tolerance: size * 0.005,
        }
    }
}

/// Build a solid text mesh: front cap at z = depth, back cap at z = 0, side walls.
///
/// Fails when nothing in `text` has an outline in `face`.
pub fn extrude_text(face: &Typeface, text: &str, options: TextOptions) -> anyhow::Result<Geometry> {
    let outline = face.outline(text, options.size);
    let geometry = extrude_path(&outline, options.depth, options.tolerance)?;
    if geometry.indices.is_empty() {
        return Err(anyhow!("{} has no outline for any glyph of {:?}", face.family_name, text));
    }
    Ok(geometry)
}

/// Flattened closed contours of a path.
fn contours(path: &Path, tolerance: f32) -> Vec<Vec<[f32; 2]>> {
    let mut contours = Vec::new();
    let mut current: Vec<[f32; 2]> = Vec::new();
    for event in path.iter().flattened(tolerance) {
        match event {
            PathEvent::Begin { at } => {
                current = vec![at.to_array()];
            }
            PathEvent::Line { to, .. } => current.push(to.to_array()),
            PathEvent::End { .. } => {
                // drop the duplicated closing point
                if current.len() > 1 && current.first() == current.last() {
                    current.pop();
                }
                if current.len() >= 3 {
                    contours.push(std::mem::take(&mut current));
                }
            }
            PathEvent::Quadratic { .. } | PathEvent::Cubic { .. } => {
                unreachable!("flattened paths only contain line segments")
            }
        }
    }
    contours
}

fn signed_area(contour: &[[f32; 2]]) -> f32 {
    let n = contour.len();
    (0..n)
        .map(|i| {
            let [x0, y0] = contour[i];
            let [x1, y1] = contour[(i + 1) % n];
            x0 * y1 - x1 * y0
        })
        .sum::<f32>()
        * 0.5
}

/// Append a triangle, flipping its winding if needed so it faces `normal`.
fn push_facing(geometry: &mut Geometry, corners: [[f32; 3]; 3], normal: Vector3<f32>) {
    let [a, b, c] = corners.map(Vector3::from);
    let face = (b - a).cross(c - a);
    if face.magnitude2() <= f32::EPSILON * f32::EPSILON {
        return;
    }
    let ordered = if face.dot(normal) >= 0.0 {
        corners
    } else {
        [corners[0], corners[2], corners[1]]
    };
    let base = geometry.vertices.len() as u32;
    for position in ordered {
        geometry.vertices.push(MeshVertex {
            position,
            normal: normal.into(),
            tex_coords: [position[0], position[1]],
        });
    }
    geometry.indices.extend_from_slice(&[base, base + 1, base + 2]);
}

fn extrude_path(path: &Path, depth: f32, tolerance: f32) -> anyhow::Result<Geometry> {
    let contours = contours(path, tolerance);
    let mut geometry = Geometry::default();
    if contours.is_empty() {
        return Ok(geometry);
    }

    // caps: tessellate the flattened contours so cap and wall edges match
    let mut flat = Path::builder();
    for contour in &contours {
        flat.begin(point(contour[0][0], contour[0][1]));
        for p in &contour[1..] {
            flat.line_to(point(p[0], p[1]));
        }
        flat.end(true);
    }
    let flat = flat.build();
    let mut buffers: VertexBuffers<[f32; 2], u32> = VertexBuffers::new();
    FillTessellator::new()
        .tessellate_path(
            &flat,
            &FillOptions::tolerance(tolerance).with_fill_rule(FillRule::NonZero),
            &mut BuffersBuilder::new(&mut buffers, |v: FillVertex| v.position().to_array()),
        )
        .map_err(|e| anyhow!("text tessellation failed: {:?}", e))?;

    for tri in buffers.indices.chunks_exact(3) {
        let [a, b, c] = [0, 1, 2].map(|k| buffers.vertices[tri[k] as usize]);
        push_facing(
            &mut geometry,
            [[a[0], a[1], depth], [b[0], b[1], depth], [c[0], c[1], depth]],
            Vector3::unit_z(),
        );
        push_facing(
            &mut geometry,
            [[a[0], a[1], 0.0], [b[0], b[1], 0.0], [c[0], c[1], 0.0]],
            -Vector3::unit_z(),
        );
    }

    // walls: outward is away from the contour's own interior, flipped for holes.
    // Holes wind opposite to the outer contours; the largest contour is an outer one.
    let areas: Vec<f32> = contours.iter().map(|c| signed_area(c)).collect();
    let outer_ccw = areas
        .iter()
        .copied()
        .fold(0.0f32, |largest, a| if a.abs() > largest.abs() { a } else { largest })
        > 0.0;
    for (contour, area) in contours.iter().zip(areas) {
        let ccw = area > 0.0;
        let is_hole = ccw != outer_ccw;
        let n = contour.len();
        for i in 0..n {
            let [x0, y0] = contour[i];
            let [x1, y1] = contour[(i + 1) % n];
            let (dx, dy) = (x1 - x0, y1 - y0);
            let mut normal = if ccw {
                Vector3::new(dy, -dx, 0.0)
            } else {
                Vector3::new(-dy, dx, 0.0)
            };
            if is_hole {
                normal = -normal;
            }
            if normal.magnitude2() == 0.0 {
                continue;
            }
            let normal = normal.normalize();
            let (a0, b0) = ([x0, y0, 0.0], [x1, y1, 0.0]);
            let (a1, b1) = ([x0, y0, depth], [x1, y1, depth]);
            push_facing(&mut geometry, [a0, b0, b1], normal);
            push_facing(&mut geometry, [a0, b1, a1], normal);
        }
    }
    Ok(geometry)
}
