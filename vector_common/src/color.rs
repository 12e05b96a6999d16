// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! RGBA colors and their premultiplied packed form.

use core::fmt;

use bytemuck::{Pod, Zeroable};

use crate::error::{Error, Result};

/// An RGBA color with 8-bit channels.
///
/// Channels are stored widened to `u16` so that the premultiplication products
/// never overflow. The type does not clamp: every channel is expected to be in
/// `0..=255`, and values outside that range are stored as given. Use
/// [`Color::checked`] or [`Color::is_valid`] where the input is not trusted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct Color {
    r: u16,
    g: u16,
    b: u16,
    a: u16,
}

static_assertions::assert_eq_size!(Color, u64);

/// One of the four channels of a [`Color`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// The red channel.
    Red,
    /// The green channel.
    Green,
    /// The blue channel.
    Blue,
    /// The alpha (opacity) channel.
    Alpha,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Alpha => "alpha",
        })
    }
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create a color from its four channels.
    pub const fn new(red: u16, green: u16, blue: u16, alpha: u16) -> Self {
        Self {
            r: red,
            g: green,
            b: blue,
            a: alpha,
        }
    }

    /// Create an opaque color.
    pub const fn rgb(red: u16, green: u16, blue: u16) -> Self {
        Self::new(red, green, blue, 255)
    }

    /// Create a color, rejecting any channel above 255.
    pub fn checked(red: u16, green: u16, blue: u16, alpha: u16) -> Result<Self> {
        let color = Self::new(red, green, blue, alpha);
        color.to_rgba8()?;
        Ok(color)
    }

    /// The red channel.
    pub const fn red(&self) -> u16 {
        self.r
    }

    /// The green channel.
    pub const fn green(&self) -> u16 {
        self.g
    }

    /// The blue channel.
    pub const fn blue(&self) -> u16 {
        self.b
    }

    /// The alpha channel.
    pub const fn alpha(&self) -> u16 {
        self.a
    }

    /// Replace the red channel. The value is not clamped.
    pub fn set_red(&mut self, red: u16) {
        self.r = red;
    }

    /// Replace the green channel. The value is not clamped.
    pub fn set_green(&mut self, green: u16) {
        self.g = green;
    }

    /// Replace the blue channel. The value is not clamped.
    pub fn set_blue(&mut self, blue: u16) {
        self.b = blue;
    }

    /// Replace the alpha channel. The value is not clamped.
    pub fn set_alpha(&mut self, alpha: u16) {
        self.a = alpha;
    }

    /// Returns `true` if alpha is exactly 255.
    pub const fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Returns `true` if every channel is in `0..=255`.
    pub const fn is_valid(&self) -> bool {
        self.r <= 255 && self.g <= 255 && self.b <= 255 && self.a <= 255
    }

    /// The channels as straight (not premultiplied) RGBA8.
    ///
    /// Fails with [`Error::ChannelOutOfRange`] naming the first channel above 255.
    pub fn to_rgba8(&self) -> Result<[u8; 4]> {
        let narrow = |channel, value: u16| {
            u8::try_from(value).map_err(|_| Error::ChannelOutOfRange { channel, value })
        };
        Ok([
            narrow(Channel::Red, self.r)?,
            narrow(Channel::Green, self.g)?,
            narrow(Channel::Blue, self.b)?,
            narrow(Channel::Alpha, self.a)?,
        ])
    }

    /// Pack the color as premultiplied ARGB.
    ///
    /// Each of red, green and blue is scaled by `alpha / 255` with integer truncation,
    /// then the word is laid out as `alpha << 24 | red << 16 | green << 8 | blue`.
    /// This is the pixel format handed to the rasterizer.
    ///
    /// Channels above 255 are not masked and spill into their neighbors.
    pub const fn premul_argb(&self) -> u32 {
        let a = self.a as u32;
        let r = self.r as u32 * a / 255;
        let g = self.g as u32 * a / 255;
        let b = self.b as u32 * a / 255;
        (a << 24) | (r << 16) | (g << 8) | b
    }

    /// The premultiplied color as RGBA8 bytes, in the order used by pixmaps.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "each byte is extracted from the packed word"
    )]
    pub const fn premul_rgba8(&self) -> [u8; 4] {
        let argb = self.premul_argb();
        [
            (argb >> 16) as u8,
            (argb >> 8) as u8,
            argb as u8,
            (argb >> 24) as u8,
        ]
    }
}

#[cfg(feature = "peniko")]
impl TryFrom<Color> for peniko::Color {
    type Error = Error;

    fn try_from(color: Color) -> Result<Self> {
        let [r, g, b, a] = color.to_rgba8()?;
        Ok(Self::rgba8(r, g, b, a))
    }
}

#[cfg(feature = "peniko")]
impl From<peniko::Color> for Color {
    fn from(color: peniko::Color) -> Self {
        Self::new(color.r.into(), color.g.into(), color.b.into(), color.a.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premultiplied_packing() {
        assert_eq!(Color::new(10, 20, 30, 128).premul_argb(), 0x8005_0A0F);
        assert_eq!(Color::new(10, 20, 30, 128).premul_rgba8(), [5, 10, 15, 128]);
        assert_eq!(Color::rgb(0x12, 0x34, 0x56).premul_argb(), 0xFF12_3456);
        assert_eq!(Color::new(255, 255, 255, 0).premul_argb(), 0);
        assert_eq!(Color::TRANSPARENT.premul_argb(), 0);
        assert_eq!(Color::WHITE.premul_argb(), 0xFFFF_FFFF);
    }

    #[test]
    fn premultiplication_truncates() {
        // 255 * 254 / 255 = 254 exactly, 1 * 254 / 255 = 0.996 -> 0.
        assert_eq!(Color::new(255, 1, 128, 254).premul_argb(), 0xFEFE_007F);
    }

    #[test]
    fn opacity() {
        assert!(Color::new(200, 200, 200, 255).is_opaque());
        assert!(Color::rgb(1, 2, 3).is_opaque());
        for alpha in [0, 1, 128, 254] {
            assert!(!Color::new(200, 200, 200, alpha).is_opaque());
        }
    }

    #[test]
    fn accessors() {
        let mut color = Color::default();
        assert_eq!(color, Color::TRANSPARENT);
        color.set_red(1);
        color.set_green(2);
        color.set_blue(3);
        color.set_alpha(4);
        assert_eq!(
            (color.red(), color.green(), color.blue(), color.alpha()),
            (1, 2, 3, 4)
        );
        assert_eq!(color, Color::new(1, 2, 3, 4));
        assert_ne!(color, Color::new(1, 2, 3, 5));
    }

    #[test]
    fn unclamped_storage() {
        let color = Color::new(300, 0, 0, 255);
        assert_eq!(color.red(), 300);
        assert!(!color.is_valid());
        assert_eq!(
            color.to_rgba8(),
            Err(Error::ChannelOutOfRange {
                channel: Channel::Red,
                value: 300
            })
        );
        assert_eq!(
            Color::checked(0, 0, 0, 256),
            Err(Error::ChannelOutOfRange {
                channel: Channel::Alpha,
                value: 256
            })
        );
        assert_eq!(Color::checked(1, 2, 3, 4), Ok(Color::new(1, 2, 3, 4)));
    }

    #[test]
    fn pod_layout() {
        let color = Color::new(1, 2, 3, 4);
        let channels: [u16; 4] = bytemuck::cast(color);
        assert_eq!(channels, [1, 2, 3, 4]);
    }

    #[cfg(feature = "peniko")]
    #[test]
    fn peniko_round_trip() {
        let color = Color::new(10, 20, 30, 128);
        let converted = peniko::Color::try_from(color).unwrap();
        assert_eq!(Color::from(converted), color);
        assert!(peniko::Color::try_from(Color::new(0, 0, 0, 999)).is_err());
    }
}
