use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{ReelError, ReelResult};

/// Parse a CSS-style color string.
///
/// Accepted forms: `#RGB`, `#RRGGBB`, `#RRGGBBAA`, `rgb(r, g, b)`, `rgba(r, g, b, a)` with `a` in
/// `0..=1`, and the names `white`, `black`, `transparent`.
pub fn parse_color(s: &str) -> ReelResult<Rgba8> {
    let s = s.trim();
    match s.to_ascii_lowercase().as_str() {
        "white" => return Ok(Rgba8::WHITE),
        "black" => return Ok(Rgba8::BLACK),
        "transparent" => return Ok(Rgba8::TRANSPARENT),
        _ => {}
    }

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lower = s.to_ascii_lowercase();
    if let Some(body) = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_functional(body, s);
    }

    Err(ReelError::validation(format!("unsupported color \"{s}\"")))
}

fn parse_hex(hex: &str) -> ReelResult<Rgba8> {
    fn hex_byte(pair: &str) -> ReelResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| ReelError::validation(format!("invalid hex byte \"{pair}\"")))
    }

    if !hex.is_ascii() {
        return Err(ReelError::validation("hex color must be ASCII"));
    }

    match hex.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, ch) in hex.chars().enumerate() {
                let pair = format!("{ch}{ch}");
                out[i] = hex_byte(&pair)?;
            }
            Ok(Rgba8::rgb(out[0], out[1], out[2]))
        }
        6 => Ok(Rgba8::rgb(
            hex_byte(&hex[0..2])?,
            hex_byte(&hex[2..4])?,
            hex_byte(&hex[4..6])?,
        )),
        8 => Ok(Rgba8::rgba(
            hex_byte(&hex[0..2])?,
            hex_byte(&hex[2..4])?,
            hex_byte(&hex[4..6])?,
            hex_byte(&hex[6..8])?,
        )),
        _ => Err(ReelError::validation(
            "hex color must be #RGB, #RRGGBB or #RRGGBBAA",
        )),
    }
}

fn parse_functional(body: &str, original: &str) -> ReelResult<Rgba8> {
    let parts = body.split(',').map(str::trim).collect::<Vec<_>>();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(ReelError::validation(format!(
            "color \"{original}\" must have 3 or 4 components"
        )));
    }

    let channel = |p: &str| -> ReelResult<u8> {
        let v: f64 = p
            .parse()
            .map_err(|_| ReelError::validation(format!("invalid color channel \"{p}\"")))?;
        if !(0.0..=255.0).contains(&v) {
            return Err(ReelError::validation(format!(
                "color channel \"{p}\" must be within 0..=255"
            )));
        }
        Ok(v.round() as u8)
    };

    let r = channel(parts[0])?;
    let g = channel(parts[1])?;
    let b = channel(parts[2])?;
    let a = match parts.get(3) {
        Some(p) => {
            let v: f64 = p
                .parse()
                .map_err(|_| ReelError::validation(format!("invalid alpha \"{p}\"")))?;
            if !(0.0..=1.0).contains(&v) {
                return Err(ReelError::validation(format!(
                    "alpha \"{p}\" must be within 0..=1"
                )));
            }
            (v * 255.0).round() as u8
        }
        None => 255,
    };
    Ok(Rgba8::rgba(r, g, b, a))
}

impl Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            self.r, self.g, self.b, self.a
        ))
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Css(String),
            Arr(Vec<u8>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Css(s) => parse_color(&s).map_err(serde::de::Error::custom),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Rgba8::rgb(*r, *g, *b)),
                [r, g, b, a] => Ok(Rgba8::rgba(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
