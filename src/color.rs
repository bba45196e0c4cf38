//! Color conversions shared by the brush, the color wheel, and the tone
//! mapper. All functions are pure; callers own validation of anything that
//! reaches the UI.

/// HSL to RGB with all inputs in `[0, 1]`. Achromatic colors short-circuit.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (u8, u8, u8) {
    if s == 0.0 {
        let v = (l * 255.0).round() as u8;
        return (v, v, v);
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let r = hue_to_channel(p, q, h + 1.0 / 3.0);
    let g = hue_to_channel(p, q, h);
    let b = hue_to_channel(p, q, h - 1.0 / 3.0);
    (
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    )
}

fn hue_to_channel(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

/// Lowercase `#rrggbb`.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Accepts `#rgb` and `#rrggbb` only.
pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if !digits.is_ascii() {
        return None;
    }
    match digits.len() {
        3 => {
            let r = u8::from_str_radix(&digits[0..1], 16).ok()?;
            let g = u8::from_str_radix(&digits[1..2], 16).ok()?;
            let b = u8::from_str_radix(&digits[2..3], 16).ok()?;
            Some((r * 17, g * 17, b * 17))
        }
        6 => {
            let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
            let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
            let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}

/// Hex string to `(hue [0,360), saturation [0,100], lightness [0,100])`.
pub fn hex_to_hsl(hex: &str) -> Option<(f32, f32, f32)> {
    let (r, g, b) = parse_hex(hex)?;
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    if max == min {
        return Some((0.0, 0.0, l * 100.0));
    }
    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    Some((h * 60.0, s * 100.0, l * 100.0))
}

/// Human color name for a hue in degrees. Buckets are half-open, no gaps.
pub fn hue_to_color_name(hue: f32) -> &'static str {
    if hue < 15.0 {
        "Red"
    } else if hue < 45.0 {
        "Orange"
    } else if hue < 75.0 {
        "Yellow"
    } else if hue < 150.0 {
        "Green"
    } else if hue < 195.0 {
        "Cyan"
    } else if hue < 255.0 {
        "Blue"
    } else if hue < 285.0 {
        "Purple"
    } else if hue < 330.0 {
        "Magenta"
    } else {
        "Red"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_red_round_trips_through_hex() {
        let (r, g, b) = hsl_to_rgb(0.0, 1.0, 0.5);
        assert_eq!(rgb_to_hex(r, g, b), "#ff0000");
    }

    #[test]
    fn achromatic_midpoint_is_gray() {
        for h in [0.0, 0.3, 0.99] {
            let (r, g, b) = hsl_to_rgb(h, 0.0, 0.5);
            assert_eq!(rgb_to_hex(r, g, b), "#808080");
        }
    }

    #[test]
    fn short_hex_form_expands_digits() {
        assert_eq!(parse_hex("#f00"), Some((255, 0, 0)));
        assert_eq!(parse_hex("#abc"), Some((0xaa, 0xbb, 0xcc)));
        assert_eq!(parse_hex("#ff0000"), Some((255, 0, 0)));
    }

    #[test]
    fn malformed_hex_is_rejected() {
        assert_eq!(parse_hex("ff0000"), None);
        assert_eq!(parse_hex("#ff00"), None);
        assert_eq!(parse_hex("#gggggg"), None);
        assert_eq!(parse_hex("#ff0000ff"), None);
        assert_eq!(hex_to_hsl("#12345"), None);
    }

    #[test]
    fn hex_to_hsl_recovers_hue() {
        let (h, s, l) = hex_to_hsl("#ff0000").unwrap();
        assert_eq!(h, 0.0);
        assert_eq!(s, 100.0);
        assert_eq!(l, 50.0);

        let (h, _, _) = hex_to_hsl("#00ff00").unwrap();
        assert_eq!(h, 120.0);

        let (h, s, l) = hex_to_hsl("#808080").unwrap();
        assert_eq!(h, 0.0);
        assert_eq!(s, 0.0);
        assert!((l - 50.2).abs() < 0.1);
    }

    #[test]
    fn hue_buckets_cover_the_wheel() {
        let names = [
            "Red", "Orange", "Yellow", "Green", "Cyan", "Blue", "Purple", "Magenta",
        ];
        for deg in 0..360 {
            let name = hue_to_color_name(deg as f32);
            assert!(names.contains(&name), "no bucket for hue {deg}");
        }
    }

    #[test]
    fn hue_bucket_boundaries() {
        assert_eq!(hue_to_color_name(0.0), "Red");
        assert_eq!(hue_to_color_name(359.0), "Red");
        assert_eq!(hue_to_color_name(14.9), "Red");
        assert_eq!(hue_to_color_name(15.0), "Orange");
        assert_eq!(hue_to_color_name(149.0), "Green");
        assert_eq!(hue_to_color_name(150.0), "Cyan");
        assert_eq!(hue_to_color_name(329.9), "Magenta");
        assert_eq!(hue_to_color_name(330.0), "Red");
    }
}
