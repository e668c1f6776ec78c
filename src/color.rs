//! Utility for parsing line color strings (`#rrggbb`, `#rgb`, `rgb(r,g,b)` or a color name)
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// `#rrggbb`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

pub fn parse_color(val: &str) -> Option<Rgb> {
    let val = val.trim();
    if let Some(hex) = val.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(inner) = val
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        // rgb(255, 128, 0)
        let parts: Vec<&str> = inner.split(',').map(|s| s.trim()).collect();
        if parts.len() != 3 {
            return None;
        }
        let r = parts[0].parse::<u8>().ok()?;
        let g = parts[1].parse::<u8>().ok()?;
        let b = parts[2].parse::<u8>().ok()?;
        return Some(Rgb(r, g, b));
    }
    named_color(&val.to_ascii_lowercase())
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            // #abc == #aabbcc
            let c: Vec<u8> = hex
                .chars()
                .map(|ch| ch.to_digit(16).map(|d| (d * 17) as u8))
                .collect::<Option<_>>()?;
            Some(Rgb(c[0], c[1], c[2]))
        }
        _ => None,
    }
}

fn named_color(name: &str) -> Option<Rgb> {
    let rgb = match name {
        "white" => Rgb(255, 255, 255),
        "black" => Rgb(0, 0, 0),
        "red" => Rgb(255, 0, 0),
        "green" => Rgb(0, 128, 0),
        "blue" => Rgb(0, 0, 255),
        "yellow" => Rgb(255, 255, 0),
        "orange" => Rgb(255, 165, 0),
        "cyan" => Rgb(0, 255, 255),
        "magenta" => Rgb(255, 0, 255),
        "lightblue" => Rgb(173, 216, 230),
        "darkgreen" => Rgb(0, 100, 0),
        "gray" | "grey" => Rgb(128, 128, 128),
        "lightgray" | "lightgrey" => Rgb(211, 211, 211),
        "darkgray" | "darkgrey" => Rgb(169, 169, 169),
        "brown" => Rgb(165, 42, 42),
        "purple" => Rgb(128, 0, 128),
        "pink" => Rgb(255, 192, 203),
        "lime" => Rgb(0, 255, 0),
        "navy" => Rgb(0, 0, 128),
        "teal" => Rgb(0, 128, 128),
        "olive" => Rgb(128, 128, 0),
        "maroon" => Rgb(128, 0, 0),
        "silver" => Rgb(192, 192, 192),
        _ => return None,
    };
    Some(rgb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_forms() {
        assert_eq!(parse_color("#ff8000"), Some(Rgb(255, 128, 0)));
        assert_eq!(parse_color("#F80"), Some(Rgb(255, 136, 0)));
        assert_eq!(parse_color("#12345"), None);
    }

    #[test]
    fn parses_rgb_and_names() {
        assert_eq!(parse_color("rgb(1, 2, 3)"), Some(Rgb(1, 2, 3)));
        assert_eq!(parse_color(" Navy "), Some(Rgb(0, 0, 128)));
        assert_eq!(parse_color("chartreuse-ish"), None);
    }
}
