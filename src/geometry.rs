//! Rectangles in model coordinate space.
//!
//! On screen the Y axis points down, so a rectangle is a top-left and a
//! bottom-right corner. The document's Y axis points up and `a:Rect` stores
//! `((x1,y2), (x2,y1))`: the two Y values are swapped relative to reading order.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rect {
    pub top_left: Point,
    pub bottom_right: Point,
}

impl Rect {
    pub fn new(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        Self {
            top_left: Point { x: x1, y: y1 },
            bottom_right: Point { x: x2, y: y2 },
        }
    }

    pub fn width(&self) -> i64 {
        (self.bottom_right.x - self.top_left.x).abs()
    }

    pub fn height(&self) -> i64 {
        (self.bottom_right.y - self.top_left.y).abs()
    }

    /// Encode as the `a:Rect` field value.
    pub fn to_symbol_rect(&self) -> String {
        format!(
            "(({},{}), ({},{}))",
            self.top_left.x, self.bottom_right.y, self.bottom_right.x, self.top_left.y
        )
    }

    /// Decode an `a:Rect` field value.
    pub fn parse_symbol_rect(s: &str) -> Option<Self> {
        let cleaned: String = s.chars().filter(|c| *c != '(' && *c != ')').collect();
        let coords: Vec<i64> = cleaned
            .split(',')
            .map(|part| part.trim().parse().ok())
            .collect::<Option<_>>()?;

        match coords[..] {
            [x1, y2, x2, y1] => Some(Self::new(x1, y1, x2, y2)),
            _ => None,
        }
    }
}
