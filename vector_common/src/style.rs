// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fill and stroke style parameters consumed by the rasterizer.

use bytemuck::{Pod, Zeroable};

use crate::flags::Flags;

/// How the inside of a possibly self-intersecting path is decided.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FillRule {
    /// Inside where a ray crosses the outline an odd number of times.
    EvenOdd = 0,
    /// Inside where the winding number is non-zero.
    #[default]
    Winding = 1,
}

/// The geometry generated at the corners of a stroked path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum JoinStyle {
    /// Extend the outer edges until they meet.
    #[default]
    Miter = 0,
    /// Connect the outer corners with a straight line.
    Bevel = 1,
    /// Connect the outer corners with a circular arc.
    Round = 2,
}

/// The geometry generated at the open ends of a stroked path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CapStyle {
    /// End exactly at the endpoint.
    #[default]
    Flat = 0,
    /// Extend past the endpoint by half the line width.
    Square = 1,
    /// Close with a half circle centered on the endpoint.
    Round = 2,
}

/// The bits of a packed [`Style`] word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum StyleBit {
    /// No bits set: a fill with the winding rule.
    None = 0,
    /// Set for strokes, clear for fills.
    Stroke = 0x8000_0000,
    /// Fills only: set for even-odd, clear for winding.
    EvenOdd = 0x4000_0000,
    /// Strokes only. With neither join bit set, the join is a miter.
    JoinBevel = 0x1000_0000,
    /// Strokes only. See [`StyleBit::JoinBevel`].
    JoinRound = 0x2000_0000,
    /// Strokes only. With neither cap bit set, the cap is flat.
    CapSquare = 0x0100_0000,
    /// Strokes only. See [`StyleBit::CapSquare`].
    CapRound = 0x0200_0000,
}

crate::impl_flag!(
    FillRule: u8,
    JoinStyle: u8,
    CapStyle: u8,
    StyleBit: u32,
);

/// Fill or stroke style, packed for upload next to the path data.
///
/// ```text
/// flags: |stroke|even-odd|join|cap|reserved|
///  bits:  31     30       28-29 24-25 0-23
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Style {
    /// See [`StyleBit`].
    pub flags: u32,
    /// The stroke width. Ignored for fills.
    pub line_width: f32,
}

impl Style {
    /// Creates a style for a fill.
    pub fn from_fill(rule: FillRule) -> Self {
        let flags = match rule {
            FillRule::EvenOdd => Flags::from(StyleBit::EvenOdd),
            FillRule::Winding => Flags::empty(),
        };
        Self {
            flags: flags.bits(),
            line_width: 0.,
        }
    }

    /// Creates a style for a stroke.
    ///
    /// As it isn't meaningful to encode a stroke without extent, returns `None` unless the width
    /// is finite and greater than zero. Any positive width is kept, however thin.
    pub fn from_stroke(join: JoinStyle, cap: CapStyle, line_width: f32) -> Option<Self> {
        if !(line_width.is_finite() && line_width > 0.0) {
            return None;
        }
        let join = match join {
            JoinStyle::Miter => StyleBit::None,
            JoinStyle::Bevel => StyleBit::JoinBevel,
            JoinStyle::Round => StyleBit::JoinRound,
        };
        let cap = match cap {
            CapStyle::Flat => StyleBit::None,
            CapStyle::Square => StyleBit::CapSquare,
            CapStyle::Round => StyleBit::CapRound,
        };
        Some(Self {
            flags: (StyleBit::Stroke | join | cap).bits(),
            line_width,
        })
    }

    /// The packed flags as a set.
    pub fn style_flags(&self) -> Flags<StyleBit> {
        Flags::from_bits(self.flags)
    }

    /// Returns `true` for fills, `false` for strokes.
    pub fn is_fill(&self) -> bool {
        !self.style_flags().test_flag(StyleBit::Stroke)
    }

    /// The fill rule, or `None` for strokes.
    pub fn fill_rule(&self) -> Option<FillRule> {
        if !self.is_fill() {
            return None;
        }
        Some(if self.style_flags().test_flag(StyleBit::EvenOdd) {
            FillRule::EvenOdd
        } else {
            FillRule::Winding
        })
    }

    /// The join style, or `None` for fills.
    pub fn join(&self) -> Option<JoinStyle> {
        if self.is_fill() {
            return None;
        }
        let flags = self.style_flags();
        Some(if flags.test_flag(StyleBit::JoinRound) {
            JoinStyle::Round
        } else if flags.test_flag(StyleBit::JoinBevel) {
            JoinStyle::Bevel
        } else {
            JoinStyle::Miter
        })
    }

    /// The cap style, or `None` for fills.
    pub fn cap(&self) -> Option<CapStyle> {
        if self.is_fill() {
            return None;
        }
        let flags = self.style_flags();
        Some(if flags.test_flag(StyleBit::CapRound) {
            CapStyle::Round
        } else if flags.test_flag(StyleBit::CapSquare) {
            CapStyle::Square
        } else {
            CapStyle::Flat
        })
    }

    /// The stroke width, or `None` for fills.
    pub fn line_width(&self) -> Option<f32> {
        if self.is_fill() {
            return None;
        }
        Some(self.line_width)
    }
}

impl From<FillRule> for Style {
    fn from(rule: FillRule) -> Self {
        Self::from_fill(rule)
    }
}

#[cfg(feature = "peniko")]
mod peniko_interop {
    use peniko::kurbo::{Cap, Join};
    use peniko::Fill;

    use super::{CapStyle, FillRule, JoinStyle};

    impl From<FillRule> for Fill {
        fn from(rule: FillRule) -> Self {
            match rule {
                FillRule::EvenOdd => Self::EvenOdd,
                FillRule::Winding => Self::NonZero,
            }
        }
    }

    impl From<Fill> for FillRule {
        fn from(fill: Fill) -> Self {
            match fill {
                Fill::EvenOdd => Self::EvenOdd,
                Fill::NonZero => Self::Winding,
            }
        }
    }

    impl From<JoinStyle> for Join {
        fn from(join: JoinStyle) -> Self {
            match join {
                JoinStyle::Miter => Self::Miter,
                JoinStyle::Bevel => Self::Bevel,
                JoinStyle::Round => Self::Round,
            }
        }
    }

    impl From<Join> for JoinStyle {
        fn from(join: Join) -> Self {
            match join {
                Join::Miter => Self::Miter,
                Join::Bevel => Self::Bevel,
                Join::Round => Self::Round,
            }
        }
    }

    impl From<CapStyle> for Cap {
        fn from(cap: CapStyle) -> Self {
            match cap {
                CapStyle::Flat => Self::Butt,
                CapStyle::Square => Self::Square,
                CapStyle::Round => Self::Round,
            }
        }
    }

    impl From<Cap> for CapStyle {
        fn from(cap: Cap) -> Self {
            match cap {
                Cap::Butt => Self::Flat,
                Cap::Square => Self::Square,
                Cap::Round => Self::Round,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JOINS: [JoinStyle; 3] = [JoinStyle::Miter, JoinStyle::Bevel, JoinStyle::Round];
    const CAPS: [CapStyle; 3] = [CapStyle::Flat, CapStyle::Square, CapStyle::Round];

    #[test]
    fn fill_style() {
        assert_eq!(
            Some(FillRule::Winding),
            Style::from_fill(FillRule::Winding).fill_rule()
        );
        assert_eq!(
            Some(FillRule::EvenOdd),
            Style::from(FillRule::EvenOdd).fill_rule()
        );
        assert_eq!(Style::default(), Style::from_fill(FillRule::default()));
        assert!(Style::default().style_flags().test_flag(StyleBit::None));
        assert_eq!(None, Style::from_fill(FillRule::EvenOdd).join());
        assert_eq!(None, Style::from_fill(FillRule::EvenOdd).line_width());
    }

    #[test]
    fn stroke_style() {
        for join in JOINS {
            for cap in CAPS {
                let style = Style::from_stroke(join, cap, 2.5).unwrap();
                assert!(!style.is_fill());
                assert_eq!(None, style.fill_rule());
                assert_eq!(Some(join), style.join());
                assert_eq!(Some(cap), style.cap());
                assert_eq!(Some(2.5), style.line_width());
                assert!(!style.style_flags().test_flag(StyleBit::EvenOdd));
            }
        }
    }

    #[test]
    fn degenerate_stroke_width() {
        for width in [0.0, -0.0, -2.0, f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            assert_eq!(
                None,
                Style::from_stroke(JoinStyle::Round, CapStyle::Round, width),
                "width {width}"
            );
        }
    }

    #[test]
    fn thin_stroke_is_kept() {
        for width in [1e-7, 1e-6, f32::MIN_POSITIVE] {
            let style = Style::from_stroke(JoinStyle::Miter, CapStyle::Flat, width).unwrap();
            assert_eq!(Some(width), style.line_width());
        }
    }

    #[test]
    fn style_is_pod() {
        let style = Style::from_stroke(JoinStyle::Bevel, CapStyle::Square, 1.0).unwrap();
        let words: [u32; 2] = bytemuck::cast(style);
        assert_eq!(words, [0x9100_0000, 1.0_f32.to_bits()]);
    }

    #[test]
    fn style_enums_as_flags() {
        let joins: Flags<JoinStyle> = [JoinStyle::Bevel, JoinStyle::Round].into_iter().collect();
        assert_eq!(joins.bits(), 0b11);
        assert!(joins.test_flag(JoinStyle::Round));
        assert!(!joins.test_flag(JoinStyle::Miter));
        assert!(Flags::<CapStyle>::empty().test_flag(CapStyle::Flat));
    }

    #[cfg(feature = "peniko")]
    #[test]
    fn peniko_conversions() {
        use peniko::kurbo::{Cap, Join};
        use peniko::Fill;

        assert_eq!(Fill::from(FillRule::Winding), Fill::NonZero);
        assert_eq!(FillRule::from(Fill::EvenOdd), FillRule::EvenOdd);
        for join in JOINS {
            assert_eq!(JoinStyle::from(Join::from(join)), join);
        }
        for cap in CAPS {
            assert_eq!(CapStyle::from(Cap::from(cap)), cap);
        }
        assert_eq!(Cap::from(CapStyle::Flat), Cap::Butt);
    }
}
