//! SVG path data (`d` attribute) parsing.
//!
//! Supports every path command (M, L, H, V, C, S, Q, T, A, Z) in absolute
//! and relative form, including implicit command repetition.

use lasercam_core::{Point, Primitive};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Command(char),
    Number(f64),
}

/// Tokenize SVG path data into commands and numbers
///
/// The two flag arguments of an arc are single characters and may be
/// written without separators (`a5 5 0 0110 0`).
fn tokenize(path_data: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut number = String::new();
    // Index of the next argument while inside an arc command
    let mut arc_arg: Option<usize> = None;

    fn flush(number: &mut String, tokens: &mut Vec<Token>, arc_arg: &mut Option<usize>) {
        if !number.is_empty() {
            if let Ok(value) = number.parse() {
                tokens.push(Token::Number(value));
                if let Some(arg) = arc_arg.as_mut() {
                    *arg += 1;
                }
            }
            number.clear();
        }
    }

    for ch in path_data.chars() {
        match ch {
            'M' | 'm' | 'L' | 'l' | 'H' | 'h' | 'V' | 'v' | 'C' | 'c' | 'S' | 's' | 'Q'
            | 'q' | 'T' | 't' | 'A' | 'a' | 'Z' | 'z' => {
                flush(&mut number, &mut tokens, &mut arc_arg);
                tokens.push(Token::Command(ch));
                arc_arg = matches!(ch, 'A' | 'a').then_some(0);
            }
            '0' | '1' if number.is_empty() && is_arc_flag(arc_arg) => {
                number.push(ch);
                flush(&mut number, &mut tokens, &mut arc_arg);
            }
            '-' | '+' => {
                // A sign starts a new number unless it belongs to an exponent
                if !(number.ends_with('e') || number.ends_with('E')) {
                    flush(&mut number, &mut tokens, &mut arc_arg);
                }
                number.push(ch);
            }
            '.' => {
                if number.contains('.') || number.contains(['e', 'E']) {
                    flush(&mut number, &mut tokens, &mut arc_arg);
                }
                number.push(ch);
            }
            '0'..='9' | 'e' | 'E' => number.push(ch),
            _ => flush(&mut number, &mut tokens, &mut arc_arg),
        }
    }
    flush(&mut number, &mut tokens, &mut arc_arg);

    tokens
}

/// True when the next arc argument is the large-arc or sweep flag.
fn is_arc_flag(arc_arg: Option<usize>) -> bool {
    matches!(arc_arg.map(|arg| arg % 7), Some(3 | 4))
}

struct PathParser {
    tokens: Vec<Token>,
    pos: usize,
    current: Point,
    subpath_start: Point,
    cubic_ctrl: Option<Point>,
    quad_ctrl: Option<Point>,
    primitives: Vec<Primitive>,
}

impl PathParser {
    fn new(path_data: &str) -> Self {
        Self {
            tokens: tokenize(path_data),
            pos: 0,
            current: Point::default(),
            subpath_start: Point::default(),
            cubic_ctrl: None,
            quad_ctrl: None,
            primitives: Vec::new(),
        }
    }

    fn numbers<const N: usize>(&mut self) -> Option<[f64; N]> {
        let mut out = [0.0; N];
        for slot in out.iter_mut() {
            match self.tokens.get(self.pos) {
                Some(Token::Number(n)) => *slot = *n,
                _ => return None,
            }
            self.pos += 1;
        }
        Some(out)
    }

    fn point(&self, relative: bool, x: f64, y: f64) -> Point {
        if relative {
            Point::new(self.current.x + x, self.current.y + y)
        } else {
            Point::new(x, y)
        }
    }

    fn reflect(ctrl: Option<Point>, about: Point) -> Point {
        match ctrl {
            Some(c) => Point::new(2.0 * about.x - c.x, 2.0 * about.y - c.y),
            None => about,
        }
    }

    fn line_to(&mut self, to: Point) {
        if to != self.current {
            self.primitives.push(Primitive::line(self.current, to));
        }
        self.current = to;
    }

    fn parse(mut self) -> Vec<Primitive> {
        let mut command: Option<char> = None;

        while self.pos < self.tokens.len() {
            let cmd = match self.tokens[self.pos] {
                Token::Command(c) => {
                    self.pos += 1;
                    c
                }
                // Implicit repetition; extra coordinates after M/m are lines
                Token::Number(_) => match command {
                    Some('M') => 'L',
                    Some('m') => 'l',
                    Some(c) if !matches!(c, 'Z' | 'z') => c,
                    _ => {
                        self.pos += 1;
                        continue;
                    }
                },
            };
            command = Some(cmd);
            let relative = cmd.is_ascii_lowercase();

            if self.step(cmd, relative).is_none() {
                tracing::debug!("Truncated path data after '{}' command", cmd);
                break;
            }
        }

        self.primitives
    }

    fn step(&mut self, cmd: char, relative: bool) -> Option<()> {
        let mut cubic_ctrl = None;
        let mut quad_ctrl = None;

        match cmd.to_ascii_uppercase() {
            'M' => {
                let [x, y] = self.numbers::<2>()?;
                self.current = self.point(relative, x, y);
                self.subpath_start = self.current;
            }
            'L' => {
                let [x, y] = self.numbers::<2>()?;
                let to = self.point(relative, x, y);
                self.line_to(to);
            }
            'H' => {
                let [x] = self.numbers::<1>()?;
                let x = if relative { self.current.x + x } else { x };
                self.line_to(Point::new(x, self.current.y));
            }
            'V' => {
                let [y] = self.numbers::<1>()?;
                let y = if relative { self.current.y + y } else { y };
                self.line_to(Point::new(self.current.x, y));
            }
            'C' => {
                let [x1, y1, x2, y2, x, y] = self.numbers::<6>()?;
                let c1 = self.point(relative, x1, y1);
                let c2 = self.point(relative, x2, y2);
                let to = self.point(relative, x, y);
                self.primitives
                    .push(Primitive::cubic(self.current, c1, c2, to));
                cubic_ctrl = Some(c2);
                self.current = to;
            }
            'S' => {
                let [x2, y2, x, y] = self.numbers::<4>()?;
                let c1 = Self::reflect(self.cubic_ctrl, self.current);
                let c2 = self.point(relative, x2, y2);
                let to = self.point(relative, x, y);
                self.primitives
                    .push(Primitive::cubic(self.current, c1, c2, to));
                cubic_ctrl = Some(c2);
                self.current = to;
            }
            'Q' => {
                let [x1, y1, x, y] = self.numbers::<4>()?;
                let c = self.point(relative, x1, y1);
                let to = self.point(relative, x, y);
                self.primitives
                    .push(Primitive::quadratic(self.current, c, to));
                quad_ctrl = Some(c);
                self.current = to;
            }
            'T' => {
                let [x, y] = self.numbers::<2>()?;
                let c = Self::reflect(self.quad_ctrl, self.current);
                let to = self.point(relative, x, y);
                self.primitives
                    .push(Primitive::quadratic(self.current, c, to));
                quad_ctrl = Some(c);
                self.current = to;
            }
            'A' => {
                let [rx, ry, rotation, large_arc, sweep, x, y] = self.numbers::<7>()?;
                let to = self.point(relative, x, y);
                if to != self.current {
                    self.primitives.push(Primitive::svg_arc(
                        self.current,
                        to,
                        rx,
                        ry,
                        rotation,
                        large_arc != 0.0,
                        sweep != 0.0,
                    ));
                }
                self.current = to;
            }
            'Z' => {
                let start = self.subpath_start;
                self.line_to(start);
            }
            _ => {}
        }

        self.cubic_ctrl = cubic_ctrl;
        self.quad_ctrl = quad_ctrl;
        Some(())
    }
}

/// Parses a `d` attribute into primitives. Subpaths follow each other in
/// one list; the gap between them is left for the sequencer to bridge.
pub(crate) fn parse_path_data(path_data: &str) -> Vec<Primitive> {
    PathParser::new(path_data).parse()
}

/// Parses a `points` attribute (polyline/polygon) into points.
pub(crate) fn parse_points(points: &str) -> Vec<Point> {
    let numbers: Vec<f64> = tokenize(points)
        .into_iter()
        .filter_map(|t| match t {
            Token::Number(n) => Some(n),
            Token::Command(_) => None,
        })
        .collect();
    numbers
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect()
}
