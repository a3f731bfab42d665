//! The card attribute space.
//!
//! Four attributes, three values each, 3^4 = 81 distinct cards. Every value
//! type exposes `ALL` in deck-traversal order and an `index()` in `0..3`
//! so the rules can compare attributes uniformly.

use serde::{Deserialize, Serialize};

/// Symbol drawn on the card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Shape {
    Oval,
    Diamond,
    Squiggle,
}

impl Shape {
    pub const ALL: [Shape; 3] = [Shape::Oval, Shape::Diamond, Shape::Squiggle];

    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }
}

/// Shading of the symbols.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Fill {
    Empty,
    Striped,
    Solid,
}

impl Fill {
    pub const ALL: [Fill; 3] = [Fill::Empty, Fill::Striped, Fill::Solid];

    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Drawing opacity: 0.0, 0.5 or 1.0.
    #[must_use]
    pub const fn opacity(self) -> f32 {
        match self {
            Fill::Empty => 0.0,
            Fill::Striped => 0.5,
            Fill::Solid => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Red,
    Green,
    Blue,
}

impl Color {
    pub const ALL: [Color; 3] = [Color::Red, Color::Green, Color::Blue];

    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }
}

/// Number of symbols on the card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Count {
    One,
    Two,
    Three,
}

impl Count {
    pub const ALL: [Count; 3] = [Count::One, Count::Two, Count::Three];

    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Symbol count, 1 to 3.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8 + 1
    }

    /// Parse a symbol count.
    #[must_use]
    pub const fn from_value(value: u8) -> Option<Count> {
        match value {
            1 => Some(Count::One),
            2 => Some(Count::Two),
            3 => Some(Count::Three),
            _ => None,
        }
    }
}

/// Names one of the four attributes, for attribute-by-attribute checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Shape,
    Fill,
    Color,
    Count,
}

impl Attribute {
    pub const ALL: [Attribute; 4] = [
        Attribute::Shape,
        Attribute::Fill,
        Attribute::Color,
        Attribute::Count,
    ];
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Attribute::Shape => "shape",
            Attribute::Fill => "fill",
            Attribute::Color => "color",
            Attribute::Count => "count",
        };
        f.write_str(name)
    }
}

/// The four attribute values of one card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Traits {
    pub shape: Shape,
    pub fill: Fill,
    pub color: Color,
    pub count: Count,
}

impl Traits {
    #[must_use]
    pub const fn new(shape: Shape, fill: Fill, color: Color, count: Count) -> Self {
        Self {
            shape,
            fill,
            color,
            count,
        }
    }

    /// Value index (`0..3`) of one attribute.
    #[must_use]
    pub const fn index_of(&self, attribute: Attribute) -> u8 {
        match attribute {
            Attribute::Shape => self.shape.index(),
            Attribute::Fill => self.fill.index(),
            Attribute::Color => self.color.index(),
            Attribute::Count => self.count.index(),
        }
    }

    /// All 81 combinations: fill outermost, then shape, color, count.
    pub fn all() -> impl Iterator<Item = Traits> {
        Fill::ALL.into_iter().flat_map(|fill| {
            Shape::ALL.into_iter().flat_map(move |shape| {
                Color::ALL.into_iter().flat_map(move |color| {
                    Count::ALL
                        .into_iter()
                        .map(move |count| Traits::new(shape, fill, color, count))
                })
            })
        })
    }
}
