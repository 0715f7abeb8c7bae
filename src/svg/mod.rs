//! SVG icon parsing
//!
//! Reads icon markup with roxmltree, walks the element tree depth first, and
//! converts every drawable element into [`Shape`]s in source coordinates.
//! Transforms declared on ancestor `g` elements apply before an element's own
//! transforms.

pub mod elements;
pub mod path;
pub mod tokenizer;
pub mod transform_attr;

use crate::geometry::{transform_shape, Shape, Transform};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

pub use path::{parse_path_data, serialize_shapes};
pub use transform_attr::parse_transform_list;

/// Source coordinate space declared by the root element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// Parse a `viewBox` value; needs four numbers separated by whitespace
    /// and/or commas
    pub fn parse(value: &str) -> Option<Self> {
        let parts: Vec<f64> = value
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .map(str::parse::<f64>)
            .collect::<Result<_, _>>()
            .ok()?;

        match parts.as_slice() {
            [min_x, min_y, width, height, ..] => Some(Self {
                min_x: *min_x,
                min_y: *min_y,
                width: *width,
                height: *height,
            }),
            _ => None,
        }
    }
}

/// Everything the pipeline needs from one icon file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSvg {
    pub shapes: Vec<Shape>,
    pub view_box: Option<ViewBox>,
}

#[derive(Debug, Error)]
pub enum SvgError {
    #[error("invalid SVG markup: {0}")]
    Xml(#[from] roxmltree::Error),
}

/// Parse icon markup into shapes
pub fn parse_svg(markup: &str) -> Result<ParsedSvg, SvgError> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let document = roxmltree::Document::parse_with_options(markup, options)?;

    let root = document.root_element();
    let svg = if is_tag(root, "svg") {
        Some(root)
    } else {
        root.descendants().find(|node| is_tag(*node, "svg"))
    };

    let Some(svg) = svg else {
        debug!("No <svg> element found");
        return Ok(ParsedSvg::default());
    };

    let view_box = svg.attribute("viewBox").and_then(ViewBox::parse);
    let mut shapes = Vec::new();
    collect_children(svg, &[], &mut shapes);

    debug!("Parsed {} shapes", shapes.len());
    Ok(ParsedSvg { shapes, view_box })
}

fn is_tag(node: roxmltree::Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.tag_name().name().eq_ignore_ascii_case(name)
}

fn collect_children(
    parent: roxmltree::Node<'_, '_>,
    inherited: &[Transform],
    shapes: &mut Vec<Shape>,
) {
    for child in parent.children().filter(|node| node.is_element()) {
        let mut transforms = inherited.to_vec();
        if let Some(own) = child.attribute("transform") {
            transforms.extend(parse_transform_list(own));
        }

        let tag = child.tag_name().name().to_ascii_lowercase();
        if tag == "g" {
            collect_children(child, &transforms, shapes);
            continue;
        }

        let element_shapes = element_shapes(&tag, child);
        if element_shapes.is_empty() {
            trace!("<{}> produced no shapes", tag);
        }
        shapes.extend(
            element_shapes
                .iter()
                .map(|shape| transform_shape(shape, &transforms)),
        );
    }
}

fn element_shapes(tag: &str, node: roxmltree::Node<'_, '_>) -> Vec<Shape> {
    let num = |name: &str, default: f64| numeric_attribute(node, name, default);

    match tag {
        "path" => parse_path_data(node.attribute("d").unwrap_or_default()),
        "rect" => elements::rect_shapes(
            num("x", 0.0),
            num("y", 0.0),
            num("width", 0.0),
            num("height", 0.0),
            num("rx", 0.0),
            num("ry", 0.0),
        ),
        "circle" => elements::circle_shapes(num("cx", 0.0), num("cy", 0.0), num("r", 0.0)),
        "ellipse" => elements::ellipse_shapes(
            num("cx", 0.0),
            num("cy", 0.0),
            num("rx", 0.0),
            num("ry", 0.0),
        ),
        "line" => elements::line_shapes(
            num("x1", 0.0),
            num("y1", 0.0),
            num("x2", 0.0),
            num("y2", 0.0),
        ),
        "polygon" => elements::polygon_shapes(node.attribute("points").unwrap_or_default()),
        "polyline" => elements::polyline_shapes(node.attribute("points").unwrap_or_default()),
        _ => Vec::new(),
    }
}

/// Absent, empty, or non-numeric attributes fall back to `default`
fn numeric_attribute(node: roxmltree::Node<'_, '_>, name: &str, default: f64) -> f64 {
    node.attribute(name)
        .and_then(tokenizer::leading_number)
        .unwrap_or(default)
}
