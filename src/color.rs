use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("expected 6 hex digits, got `{0}`")]
    Malformed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parses `#RRGGBB` or `RRGGBB`.
    pub fn from_hex(input: &str) -> Result<Self, ColorError> {
        let digits = input.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(ColorError::Malformed(input.to_string()));
        }
        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| ColorError::Malformed(input.to_string()))?;
        Ok(Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Shifts every channel by the same amount, saturating at 0 and 255.
    pub fn shift(self, amount: i32) -> Self {
        let apply = |channel: u8| (i32::from(channel) + amount).clamp(0, 255) as u8;
        Self {
            r: apply(self.r),
            g: apply(self.g),
            b: apply(self.b),
        }
    }
}

/// Channel offset for a percentage of full scale (`2.55 * percent`, rounded half away from zero).
pub fn percent_amount(percent: f32) -> i32 {
    (255.0_f64 * f64::from(percent) / 100.0).round() as i32
}

/// Lightens (or with a negative percent, darkens) a hex color.
///
/// Input that does not parse is returned unchanged.
pub fn lighten(color: &str, percent: f32) -> String {
    match Rgb::from_hex(color) {
        Ok(rgb) => rgb.shift(percent_amount(percent)).to_hex(),
        Err(_) => color.to_string(),
    }
}
