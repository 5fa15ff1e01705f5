//! Fixed-point RGB pixels.
//!
//! A pixel stores three unsigned integer channels. The channel type sets the
//! color depth: `u8` for 8-bit output, `u16` for 16-bit intermediate
//! rendering, `u32` when many samples are averaged.

use std::fmt::{Debug, Display};
use std::ops::{Add, Div};

use lumen_math::{Interval, Vec3};

/// An unsigned integer color channel.
pub trait Channel: Copy + Default + Eq + Ord + Debug + Display + Send + Sync + 'static {
    /// Brightest channel value (`2^bits - 1`).
    const MAX: Self;

    /// Bit depth of the channel.
    const BITS: u32;

    /// Accumulator wide enough to sum many channel values without overflow.
    type Wide: Copy + Default + Add<Output = Self::Wide> + Div<Output = Self::Wide> + From<u32>;

    fn to_u64(self) -> u64;

    /// Truncating conversion; callers keep `v <= MAX`.
    fn from_u64(v: u64) -> Self;

    fn widen(self) -> Self::Wide;

    /// Truncating conversion; callers keep `w <= MAX`.
    fn narrow(w: Self::Wide) -> Self;

    #[inline]
    fn max_u64() -> u64 {
        Self::MAX.to_u64()
    }

    /// Channel value for a normalized intensity. Out-of-range input is clamped.
    #[inline]
    fn from_normalized(v: f64) -> Self {
        let v = Interval::UNIT.clamp(v);
        Self::from_u64((v * Self::max_u64() as f64).round() as u64)
    }

    /// The channel as a normalized intensity in [0, 1].
    #[inline]
    fn to_normalized(self) -> f64 {
        self.to_u64() as f64 / Self::max_u64() as f64
    }
}

macro_rules! impl_channel {
    ($t:ty, $wide:ty) => {
        impl Channel for $t {
            const MAX: Self = <$t>::MAX;
            const BITS: u32 = <$t>::BITS;
            type Wide = $wide;

            #[inline]
            fn to_u64(self) -> u64 {
                self as u64
            }

            #[inline]
            fn from_u64(v: u64) -> Self {
                v as $t
            }

            #[inline]
            fn widen(self) -> $wide {
                self as $wide
            }

            #[inline]
            fn narrow(w: $wide) -> Self {
                w as $t
            }
        }
    };
}

impl_channel!(u8, u64);
impl_channel!(u16, u64);
impl_channel!(u32, u128);

/// An RGB pixel with channel depth `T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pixel<T: Channel> {
    pub r: T,
    pub g: T,
    pub b: T,
}

/// 8-bit pixel.
pub type Pixel8 = Pixel<u8>;

/// 16-bit pixel.
pub type Pixel16 = Pixel<u16>;

impl<T: Channel> Pixel<T> {
    pub const fn new(r: T, g: T, b: T) -> Self {
        Self { r, g, b }
    }

    pub fn black() -> Self {
        Self::default()
    }

    pub fn white() -> Self {
        Self::new(T::MAX, T::MAX, T::MAX)
    }

    /// Pixel from normalized [0, 1] intensities.
    pub fn from_normalized(r: f64, g: f64, b: f64) -> Self {
        Self::new(T::from_normalized(r), T::from_normalized(g), T::from_normalized(b))
    }

    /// Pixel from a linear color vector with components in [0, 1].
    pub fn from_color(color: Vec3) -> Self {
        Self::from_normalized(color.x, color.y, color.z)
    }

    /// The pixel as normalized [0, 1] intensities.
    pub fn to_color(self) -> Vec3 {
        Vec3::new(
            self.r.to_normalized(),
            self.g.to_normalized(),
            self.b.to_normalized(),
        )
    }

    fn map(self, f: impl Fn(T) -> T) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b))
    }

    /// Rescale to another channel depth by the ratio of the max values.
    pub fn convert<U: Channel>(self) -> Pixel<U> {
        let rescale = |c: T| {
            let v = c.to_u64() as u128 * U::max_u64() as u128 / T::max_u64() as u128;
            U::from_u64(v as u64)
        };
        Pixel::new(rescale(self.r), rescale(self.g), rescale(self.b))
    }

    /// Gamma-2 correction: the square root of every normalized channel.
    pub fn gamma2(self) -> Self {
        self.map(|c| T::from_normalized(c.to_normalized().sqrt()))
    }

    /// Multiply every channel by `factor`, clamped to the valid range.
    pub fn scale(self, factor: f64) -> Self {
        self.attenuate(Vec3::splat(factor))
    }

    /// Multiply every channel by the matching component of `decay`.
    pub fn attenuate(self, decay: Vec3) -> Self {
        let apply = |c: T, k: f64| T::from_normalized(c.to_normalized() * k);
        Self::new(apply(self.r, decay.x), apply(self.g, decay.y), apply(self.b, decay.z))
    }

    /// Linear blend `a * wa + b * wb`.
    ///
    /// Weights must be non-negative and sum to at most one.
    pub fn mix(a: Self, b: Self, wa: f64, wb: f64) -> Self {
        assert!(wa >= 0.0 && wb >= 0.0, "mix weights must be non-negative");
        assert!(wa + wb <= 1.0 + 1e-9, "mix weights must sum to at most one");
        let blend = |x: T, y: T| {
            let v = x.to_u64() as f64 * wa + y.to_u64() as f64 * wb;
            T::from_u64((v.round() as u64).min(T::max_u64()))
        };
        Self::new(blend(a.r, b.r), blend(a.g, b.g), blend(a.b, b.b))
    }
}
