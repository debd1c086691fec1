pub trait ColorType: ::std::fmt::Debug + Clone + Copy {
    const COLOR_MAX_VALUE: Self;
    const COLOR_MIN_VALUE: Self;
}

impl ColorType for u8 {
    const COLOR_MAX_VALUE: u8 = 255;
    const COLOR_MIN_VALUE: u8 = 0;
}

impl ColorType for f32 {
    const COLOR_MAX_VALUE: f32 = 1.0f32;
    const COLOR_MIN_VALUE: f32 = 0.0f32;
}

/// An RGBA color, either in u8 (0-255) or f32 (0.0-1.0) depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color<T: ColorType> {
    pub r: T,
    pub g: T,
    pub b: T,
    pub a: T
}

impl<T: ColorType> Color<T> {
    pub fn from_rgba(r: T, g: T, b: T, a: T) -> Color<T> {
        Color {r, g, b, a}
    }

    pub fn from_rgb(r: T, g: T, b: T) -> Color<T> {
        Color {r, g, b, a: T::COLOR_MAX_VALUE}
    }

    pub fn white() -> Color<T> {
        let max = T::COLOR_MAX_VALUE;
        Color::from_rgb(max, max, max)
    }

    pub fn black() -> Color<T> {
        let min = T::COLOR_MIN_VALUE;
        Color::from_rgb(min, min, min)
    }

    pub fn rgb(self) -> (T, T, T) {
        (self.r, self.g, self.b)
    }

    pub fn rgba(self) -> (T, T, T, T) {
        (self.r, self.g, self.b, self.a)
    }
}

impl Color<u8> {
    pub fn to_color_f32(self) -> Color<f32> {
        Color {
            r: (self.r as f32) / 255.0,
            g: (self.g as f32) / 255.0,
            b: (self.b as f32) / 255.0,
            a: (self.a as f32) / 255.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u8_to_f32_conversion() {
        let c = Color::<u8>::from_rgba(255, 0, 51, 255).to_color_f32();
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert_eq!(c.b, 0.2);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn from_rgb_is_opaque() {
        assert_eq!(Color::<u8>::from_rgb(1, 2, 3).a, 255);
        assert_eq!(Color::<f32>::white().rgba(), (1.0, 1.0, 1.0, 1.0));
    }
}
