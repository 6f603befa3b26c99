/// Stroke Codes - 5-bit beam control words
///
/// Each ROM word drives one step of the character generator. Bit layout,
/// most significant first: V1 V2 H1 H2 U.

use std::fmt;

pub const STROKE_MASK: u8 = 0b11111;

pub const V1: u8 = 0b10000;
pub const V2: u8 = 0b01000;
pub const H1: u8 = 0b00100;
pub const H2: u8 = 0b00010;
pub const U: u8 = 0b00001;

/// What one stroke does along a single axis.
///
/// Setting both movement bits of an axis does not move the beam: it reverses
/// the direction every later move on that axis will take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisStroke {
    NoOp,
    Move(i32),
    ToggleDirection,
}

impl AxisStroke {
    #[inline]
    pub fn from_bits(one: bool, two: bool) -> Self {
        match (one, two) {
            (true, true) => AxisStroke::ToggleDirection,
            (true, false) => AxisStroke::Move(1),
            (false, true) => AxisStroke::Move(2),
            (false, false) => AxisStroke::NoOp,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct StrokeCode(u8);

impl StrokeCode {
    pub const BLANK: StrokeCode = StrokeCode(0);

    /// Wrap a raw ROM word. Bits above the low five are dropped.
    #[inline]
    pub const fn new(raw: u8) -> Self {
        Self(raw & STROKE_MASK)
    }

    pub const fn from_flags(v1: bool, v2: bool, h1: bool, h2: bool, u: bool) -> Self {
        let mut raw = 0;
        if v1 { raw |= V1; }
        if v2 { raw |= V2; }
        if h1 { raw |= H1; }
        if h2 { raw |= H2; }
        if u { raw |= U; }
        Self(raw)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn v1(self) -> bool { self.0 & V1 != 0 }
    #[inline]
    pub const fn v2(self) -> bool { self.0 & V2 != 0 }
    #[inline]
    pub const fn h1(self) -> bool { self.0 & H1 != 0 }
    #[inline]
    pub const fn h2(self) -> bool { self.0 & H2 != 0 }
    #[inline]
    pub const fn unblank(self) -> bool { self.0 & U != 0 }

    #[inline]
    pub fn vertical(self) -> AxisStroke {
        AxisStroke::from_bits(self.v1(), self.v2())
    }

    #[inline]
    pub fn horizontal(self) -> AxisStroke {
        AxisStroke::from_bits(self.h1(), self.h2())
    }
}

impl From<u8> for StrokeCode {
    fn from(raw: u8) -> Self {
        StrokeCode::new(raw)
    }
}

/// Renders as the five flag names, with `-` for clear bits: `V1 -- H1 -- U`.
impl fmt::Display for StrokeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |set: bool, name: &'static str| if set { name } else { "--" };
        write!(
            f,
            "{} {} {} {} {}",
            flag(self.v1(), "V1"),
            flag(self.v2(), "V2"),
            flag(self.h1(), "H1"),
            flag(self.h2(), "H2"),
            if self.unblank() { "U" } else { "-" },
        )
    }
}
