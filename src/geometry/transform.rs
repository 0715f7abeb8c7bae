//! Coordinate transforms applied to figures
//!
//! Transforms compose by sequential application in declaration order, not by
//! matrix pre-multiplication, so `translate` then `scale` differs from
//! `scale` then `translate`.

use super::figure::{Figure, Shape};
use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Transform {
    Translate {
        dx: f64,
        dy: f64,
    },
    Scale {
        sx: f64,
        sy: f64,
        about: Option<Point>,
    },
    Rotate {
        angle_deg: f64,
        about: Option<Point>,
    },
    SkewX {
        angle_deg: f64,
    },
    SkewY {
        angle_deg: f64,
    },
    /// Raw affine coefficients `[a b c d e f]`
    Matrix([f64; 6]),
}

impl Transform {
    /// The affine equivalent of this single transform step
    pub fn to_affine(&self) -> Affine {
        match *self {
            Transform::Translate { dx, dy } => Affine::translate(Vec2::new(dx, dy)),
            Transform::Scale { sx, sy, about } => {
                around(about, Affine::scale_non_uniform(sx, sy))
            }
            Transform::Rotate { angle_deg, about } => {
                around(about, Affine::rotate(angle_deg.to_radians()))
            }
            Transform::SkewX { angle_deg } => Affine::skew(angle_deg.to_radians().tan(), 0.0),
            Transform::SkewY { angle_deg } => Affine::skew(0.0, angle_deg.to_radians().tan()),
            Transform::Matrix(coeffs) => Affine::new(coeffs),
        }
    }

    pub fn apply(&self, figure: &Figure) -> Figure {
        figure.transformed(self.to_affine())
    }
}

/// Conjugate `affine` so it acts around `about` instead of the origin
fn around(about: Option<Point>, affine: Affine) -> Affine {
    match about {
        Some(center) => {
            let offset = center.to_vec2();
            Affine::translate(offset) * affine * Affine::translate(-offset)
        }
        None => affine,
    }
}

/// Apply every transform in order to a copy of `figure`
pub fn apply_transforms(figure: &Figure, transforms: &[Transform]) -> Figure {
    transforms
        .iter()
        .fold(*figure, |current, transform| transform.apply(&current))
}

/// Apply the transform chain to every figure of `shape`
pub fn transform_shape(shape: &Shape, transforms: &[Transform]) -> Shape {
    if transforms.is_empty() {
        return shape.clone();
    }
    shape.map_figures(|figure| apply_transforms(figure, transforms))
}
