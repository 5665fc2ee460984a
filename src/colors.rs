use cairo::Context;
use colorsys::Rgb;

pub type Color = (u8, u8, u8);

pub const WHITE: Color = (255, 255, 255);
pub const CASING: Color = (64, 64, 64);
pub const ROAD: Color = (255, 255, 255);
pub const BORDER: Color = (128, 0, 128);

pub trait ContextExt {
    fn set_source_color(&self, color: Color);
}

impl ContextExt for Context {
    fn set_source_color(&self, color: Color) {
        self.set_source_rgb(
            color.0 as f64 / 255.0,
            color.1 as f64 / 255.0,
            color.2 as f64 / 255.0,
        );
    }
}

/// Parses `#rrggbb` (or `#rgb`).
pub fn parse_hex(color: &str) -> Option<Color> {
    let rgb = Rgb::from_hex_str(color).ok()?;

    Some((
        rgb.red().round() as u8,
        rgb.green().round() as u8,
        rgb.blue().round() as u8,
    ))
}
