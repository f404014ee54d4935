//! Named colour maps backed by `colorous` gradients
//!
//! Names follow the matplotlib convention, including the `_r` suffix for a
//! reversed map.

use crate::error::{PlotError, Result};
use egui::Color32;

const GRADIENTS: &[(&str, colorous::Gradient)] = &[
    ("inferno", colorous::INFERNO),
    ("magma", colorous::MAGMA),
    ("plasma", colorous::PLASMA),
    ("viridis", colorous::VIRIDIS),
    ("cividis", colorous::CIVIDIS),
    ("turbo", colorous::TURBO),
    ("cubehelix", colorous::CUBEHELIX),
    ("warm", colorous::WARM),
    ("cool", colorous::COOL),
    ("greys", colorous::GREYS),
    ("blues", colorous::BLUES),
    ("greens", colorous::GREENS),
    ("oranges", colorous::ORANGES),
    ("purples", colorous::PURPLES),
    ("reds", colorous::REDS),
];

/// A continuous colour map, optionally reversed
#[derive(Clone, Copy)]
pub struct Colormap {
    name: &'static str,
    gradient: colorous::Gradient,
    reversed: bool,
}

impl std::fmt::Debug for Colormap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Colormap")
            .field("name", &self.name)
            .field("reversed", &self.reversed)
            .finish()
    }
}

impl Colormap {
    /// Look up a colour map by name (case-insensitive, `_r` reverses)
    pub fn from_name(name: &str) -> Result<Self> {
        let lower = name.trim().to_lowercase();
        let (base, reversed) = match lower.strip_suffix("_r") {
            Some(base) => (base, true),
            None => (lower.as_str(), false),
        };

        GRADIENTS
            .iter()
            .find(|(n, _)| *n == base)
            .map(|&(n, gradient)| Self {
                name: n,
                gradient,
                reversed,
            })
            .ok_or_else(|| PlotError::UnknownColormap {
                name: name.to_string(),
            })
    }

    /// Names accepted by [`Colormap::from_name`], without the `_r` variants
    pub fn available() -> impl Iterator<Item = &'static str> {
        GRADIENTS.iter().map(|(n, _)| *n)
    }

    pub fn name(&self) -> String {
        if self.reversed {
            format!("{}_r", self.name)
        } else {
            self.name.to_string()
        }
    }

    /// Colour at position `t` in `[0, 1]`; out-of-range positions are clamped
    pub fn eval(&self, t: f64) -> Color32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let t = if self.reversed { 1.0 - t } else { t };
        let c = self.gradient.eval_continuous(t);
        Color32::from_rgb(c.r, c.g, c.b)
    }

    /// Colour at position `t` with the given opacity
    pub fn eval_alpha(&self, t: f64, alpha: f32) -> Color32 {
        let c = self.eval(t);
        Color32::from_rgba_unmultiplied(c.r(), c.g(), c.b(), alpha_u8(alpha))
    }
}

/// Normalise `value` onto `[0, 1]` within `[vmin, vmax]`
pub fn normalize(value: f64, vmin: f64, vmax: f64) -> f64 {
    let span = vmax - vmin;
    if span <= 0.0 || !span.is_finite() {
        return 0.0;
    }
    ((value - vmin) / span).clamp(0.0, 1.0)
}

pub(crate) fn alpha_u8(alpha: f32) -> u8 {
    (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_reverse() {
        let cmap = Colormap::from_name("inferno_r").unwrap();
        let forward = Colormap::from_name("inferno").unwrap();

        assert_eq!(cmap.name(), "inferno_r");
        assert_eq!(cmap.eval(0.0), forward.eval(1.0));
        assert_eq!(cmap.eval(1.0), forward.eval(0.0));
    }

    #[test]
    fn test_case_insensitive_lookup() {
        assert!(Colormap::from_name("Viridis").is_ok());
        assert!(Colormap::from_name(" plasma_R ").is_ok());
    }

    #[test]
    fn test_unknown_name() {
        let err = Colormap::from_name("jet").unwrap_err();
        assert!(matches!(err, PlotError::UnknownColormap { ref name } if name == "jet"));
    }

    #[test]
    fn test_eval_clamps() {
        let cmap = Colormap::from_name("viridis").unwrap();
        assert_eq!(cmap.eval(-3.0), cmap.eval(0.0));
        assert_eq!(cmap.eval(7.0), cmap.eval(1.0));
        assert_eq!(cmap.eval(f64::NAN), cmap.eval(0.0));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(5.0, 0.0, 10.0), 0.5);
        assert_eq!(normalize(20.0, 0.0, 10.0), 1.0);
        assert_eq!(normalize(3.0, 2.0, 2.0), 0.0);
    }

    #[test]
    fn test_eval_alpha() {
        let cmap = Colormap::from_name("greys").unwrap();
        assert_eq!(cmap.eval_alpha(0.5, 0.0).a(), 0);
        assert_eq!(alpha_u8(1.0), 255);
    }
}
