//! Path data interpreter
//!
//! Walks the token stream produced by [`tokenize`] and turns it into
//! [`Shape`]s. Parsing is permissive: unknown letters are dropped by the
//! tokenizer, stray numbers are skipped, and a command whose operand group is
//! incomplete simply emits nothing.

use super::tokenizer::{tokenize, Token};
use crate::geometry::curves::arc_figures;
use crate::geometry::{Figure, Shape};
use kurbo::Point;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    MoveTo,
    LineTo,
    HorizontalTo,
    VerticalTo,
    CubicTo,
    SmoothCubicTo,
    QuadTo,
    SmoothQuadTo,
    ArcTo,
    ClosePath,
}

impl Command {
    /// Decode a command letter, returning the command and whether it is relative
    fn from_letter(letter: char) -> Option<(Self, bool)> {
        let command = match letter.to_ascii_uppercase() {
            'M' => Command::MoveTo,
            'L' => Command::LineTo,
            'H' => Command::HorizontalTo,
            'V' => Command::VerticalTo,
            'C' => Command::CubicTo,
            'S' => Command::SmoothCubicTo,
            'Q' => Command::QuadTo,
            'T' => Command::SmoothQuadTo,
            'A' => Command::ArcTo,
            'Z' => Command::ClosePath,
            _ => return None,
        };
        Some((command, letter.is_ascii_lowercase()))
    }
}

/// Control point available for reflection by the next smooth curve
#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum SmoothAnchor {
    #[default]
    None,
    /// Second control point of the previous `C`/`S`
    Cubic(Point),
    /// Control point of the previous `Q`/`T`
    Quad(Point),
}

/// Cursor state threaded through command dispatch
#[derive(Debug, Default)]
struct PathState {
    current: Point,
    subpath_start: Point,
    anchor: SmoothAnchor,
    figures: Vec<Figure>,
    shapes: Vec<Shape>,
}

impl PathState {
    fn resolve(&self, x: f64, y: f64, relative: bool) -> Point {
        if relative {
            Point::new(self.current.x + x, self.current.y + y)
        } else {
            Point::new(x, y)
        }
    }

    fn push(&mut self, figure: Figure) {
        self.current = figure.end();
        self.figures.push(figure);
    }

    /// Move the in-progress figures into a new shape, if there are any
    fn flush(&mut self, is_closed: bool) {
        if self.figures.is_empty() {
            return;
        }
        let figures = std::mem::take(&mut self.figures);
        self.shapes.push(Shape { figures, is_closed });
    }

    fn reflected(&self, anchor: Option<Point>) -> Point {
        match anchor {
            Some(control) => Point::new(
                2.0 * self.current.x - control.x,
                2.0 * self.current.y - control.y,
            ),
            None => self.current,
        }
    }
}

/// Reader over the token stream
struct Operands<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl Operands<'_> {
    /// Consume the next `N` tokens if they are all numbers
    fn take<const N: usize>(&mut self) -> Option<[f64; N]> {
        let window = self.tokens.get(self.pos..self.pos + N)?;
        let mut values = [0.0; N];
        for (slot, token) in values.iter_mut().zip(window) {
            match token {
                Token::Number(value) => *slot = *value,
                Token::Command(_) => return None,
            }
        }
        self.pos += N;
        Some(values)
    }
}

/// Parse a path `d` attribute into shapes
pub fn parse_path_data(data: &str) -> Vec<Shape> {
    let tokens = tokenize(data);
    let mut operands = Operands {
        tokens: &tokens,
        pos: 0,
    };
    let mut state = PathState::default();

    while let Some(token) = operands.tokens.get(operands.pos).copied() {
        operands.pos += 1;
        let Token::Command(letter) = token else {
            continue;
        };
        if let Some((command, relative)) = Command::from_letter(letter) {
            execute(command, relative, &mut operands, &mut state);
        }
    }

    state.flush(false);
    state.shapes
}

fn execute(command: Command, relative: bool, operands: &mut Operands, state: &mut PathState) {
    match command {
        Command::MoveTo => {
            state.flush(false);
            if let Some([x, y]) = operands.take() {
                let target = state.resolve(x, y, relative);
                state.current = target;
                state.subpath_start = target;
                state.anchor = SmoothAnchor::None;
                // Further pairs are implicit line-tos
                while let Some([x, y]) = operands.take() {
                    let end = state.resolve(x, y, relative);
                    state.push(Figure::line(state.current, end));
                }
            }
        }
        Command::LineTo => {
            while let Some([x, y]) = operands.take() {
                let end = state.resolve(x, y, relative);
                state.push(Figure::line(state.current, end));
                state.anchor = SmoothAnchor::None;
            }
        }
        Command::HorizontalTo => {
            while let Some([x]) = operands.take() {
                let end_x = if relative { state.current.x + x } else { x };
                let end = Point::new(end_x, state.current.y);
                state.push(Figure::line(state.current, end));
                state.anchor = SmoothAnchor::None;
            }
        }
        Command::VerticalTo => {
            while let Some([y]) = operands.take() {
                let end_y = if relative { state.current.y + y } else { y };
                let end = Point::new(state.current.x, end_y);
                state.push(Figure::line(state.current, end));
                state.anchor = SmoothAnchor::None;
            }
        }
        Command::CubicTo => {
            while let Some([x1, y1, x2, y2, x, y]) = operands.take() {
                let c1 = state.resolve(x1, y1, relative);
                let c2 = state.resolve(x2, y2, relative);
                let end = state.resolve(x, y, relative);
                state.push(Figure::cubic(state.current, c1, c2, end));
                state.anchor = SmoothAnchor::Cubic(c2);
            }
        }
        Command::SmoothCubicTo => {
            while let Some([x2, y2, x, y]) = operands.take() {
                let previous = match state.anchor {
                    SmoothAnchor::Cubic(control) => Some(control),
                    _ => None,
                };
                let c1 = state.reflected(previous);
                let c2 = state.resolve(x2, y2, relative);
                let end = state.resolve(x, y, relative);
                state.push(Figure::cubic(state.current, c1, c2, end));
                state.anchor = SmoothAnchor::Cubic(c2);
            }
        }
        Command::QuadTo => {
            while let Some([x1, y1, x, y]) = operands.take() {
                let control = state.resolve(x1, y1, relative);
                let end = state.resolve(x, y, relative);
                state.push(Figure::quad(state.current, control, end));
                state.anchor = SmoothAnchor::Quad(control);
            }
        }
        Command::SmoothQuadTo => {
            while let Some([x, y]) = operands.take() {
                let previous = match state.anchor {
                    SmoothAnchor::Quad(control) => Some(control),
                    _ => None,
                };
                let control = state.reflected(previous);
                let end = state.resolve(x, y, relative);
                state.push(Figure::quad(state.current, control, end));
                state.anchor = SmoothAnchor::Quad(control);
            }
        }
        Command::ArcTo => {
            while let Some([rx, ry, rotation, large_arc, sweep, x, y]) = operands.take() {
                let end = state.resolve(x, y, relative);
                let start = state.current;
                for figure in arc_figures(start, rx, ry, rotation, large_arc != 0.0, sweep != 0.0, end) {
                    state.figures.push(figure);
                }
                state.current = end;
                state.anchor = SmoothAnchor::None;
            }
        }
        Command::ClosePath => {
            if state.current != state.subpath_start {
                state.push(Figure::line(state.current, state.subpath_start));
            }
            state.flush(true);
            state.current = state.subpath_start;
            state.anchor = SmoothAnchor::None;
        }
    }
}

/// Serialise shapes back into absolute path data.
///
/// Parsing the result with [`parse_path_data`] reproduces the same figures.
pub fn serialize_shapes(shapes: &[Shape]) -> String {
    let mut data = String::new();
    for shape in shapes {
        let Some(first) = shape.figures.first() else {
            continue;
        };
        let start = first.start();
        let _ = write!(data, "M{} {}", start.x, start.y);
        for figure in &shape.figures {
            let _ = match figure {
                Figure::Line(line) => write!(data, " L{} {}", line.p1.x, line.p1.y),
                Figure::Cubic(c) => write!(
                    data,
                    " C{} {} {} {} {} {}",
                    c.p1.x, c.p1.y, c.p2.x, c.p2.y, c.p3.x, c.p3.y
                ),
                Figure::Quad(q) => {
                    write!(data, " Q{} {} {} {}", q.p1.x, q.p1.y, q.p2.x, q.p2.y)
                }
            };
        }
        if shape.is_closed {
            data.push_str(" Z");
        }
        data.push(' ');
    }
    data.trim_end().to_string()
}
