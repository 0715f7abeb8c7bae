//! `transform` attribute parsing

use super::tokenizer::numbers;
use crate::geometry::Transform;
use kurbo::Point;

/// Parse a transform list such as `translate(10 5) rotate(45, 12, 12)`.
///
/// Functions are returned in declaration order. Unknown functions and
/// functions missing required arguments are skipped.
pub fn parse_transform_list(input: &str) -> Vec<Transform> {
    let mut transforms = Vec::new();
    let mut rest = input;

    while let Some(open) = rest.find('(') {
        let Some(close_offset) = rest[open + 1..].find(')') else {
            break;
        };
        let name = rest[..open]
            .trim_matches(|c: char| c.is_whitespace() || c == ',')
            .to_ascii_lowercase();
        let args = numbers(&rest[open + 1..open + 1 + close_offset]);

        if let Some(transform) = build_transform(&name, &args) {
            transforms.push(transform);
        }
        rest = &rest[open + 1 + close_offset + 1..];
    }

    transforms
}

fn build_transform(name: &str, args: &[f64]) -> Option<Transform> {
    let transform = match name {
        "translate" => Transform::Translate {
            dx: *args.first()?,
            dy: args.get(1).copied().unwrap_or(0.0),
        },
        "scale" => {
            let sx = *args.first()?;
            Transform::Scale {
                sx,
                sy: args.get(1).copied().unwrap_or(sx),
                about: None,
            }
        }
        "rotate" => Transform::Rotate {
            angle_deg: *args.first()?,
            about: match args {
                [_, cx, cy, ..] => Some(Point::new(*cx, *cy)),
                _ => None,
            },
        },
        "skewx" => Transform::SkewX {
            angle_deg: *args.first()?,
        },
        "skewy" => Transform::SkewY {
            angle_deg: *args.first()?,
        },
        "matrix" => match args {
            [a, b, c, d, e, f, ..] => Transform::Matrix([*a, *b, *c, *d, *e, *f]),
            _ => return None,
        },
        _ => return None,
    };
    Some(transform)
}
