use std::ops;

/// A color sample with three independent floating point channels.
///
/// The channels carry no range: after filtering they may be negative or exceed
/// the range of the decoded input. Quantization belongs to the encoder, see
/// [`crate::ops::to_rgb8`].
///
/// # Examples
///
/// ```
/// use rgbfilter_image::Rgb;
///
/// let mut acc = Rgb::default();
/// acc += Rgb::new(10.0, 20.0, 30.0) * 0.5;
///
/// assert_eq!(acc, Rgb::new(5.0, 10.0, 15.0));
/// assert_eq!(acc.mean(), 10.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgb {
    /// Red channel intensity.
    pub r: f32,
    /// Green channel intensity.
    pub g: f32,
    /// Blue channel intensity.
    pub b: f32,
}

impl Rgb {
    /// Create a sample from its channel intensities.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a sample with the same intensity on every channel.
    pub const fn splat(v: f32) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Average of the three channels.
    pub fn mean(&self) -> f32 {
        (self.r + self.g + self.b) / 3.0
    }

    /// Whether every channel is finite.
    pub fn is_finite(&self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }
}

impl From<[f32; 3]> for Rgb {
    fn from([r, g, b]: [f32; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for [f32; 3] {
    fn from(px: Rgb) -> Self {
        [px.r, px.g, px.b]
    }
}

impl ops::Add for Rgb {
    type Output = Rgb;

    fn add(self, rhs: Rgb) -> Rgb {
        Rgb::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl ops::AddAssign for Rgb {
    fn add_assign(&mut self, rhs: Rgb) {
        self.r += rhs.r;
        self.g += rhs.g;
        self.b += rhs.b;
    }
}

impl ops::Mul for Rgb {
    type Output = Rgb;

    fn mul(self, rhs: Rgb) -> Rgb {
        Rgb::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}

impl ops::MulAssign for Rgb {
    fn mul_assign(&mut self, rhs: Rgb) {
        self.r *= rhs.r;
        self.g *= rhs.g;
        self.b *= rhs.b;
    }
}

/// Weight every channel by the same coefficient.
impl ops::Mul<f32> for Rgb {
    type Output = Rgb;

    fn mul(self, weight: f32) -> Rgb {
        Rgb::new(self.r * weight, self.g * weight, self.b * weight)
    }
}
