//! Figure themes

use egui::{Color32, Context, Visuals};
use serde::{Deserialize, Serialize};

/// Visual style of a figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// White background, ticks and no grid
    #[default]
    Ticks,
    /// Light background with grid lines
    Light,
    /// Dark background with grid lines
    Dark,
}

impl Theme {
    pub fn visuals(self) -> Visuals {
        match self {
            Theme::Ticks => {
                let mut v = Visuals::light();
                v.panel_fill = Color32::WHITE;
                v.extreme_bg_color = Color32::WHITE;
                v
            }
            Theme::Light => Visuals::light(),
            Theme::Dark => Visuals::dark(),
        }
    }

    pub fn show_grid(self) -> bool {
        !matches!(self, Theme::Ticks)
    }

    /// Colour used for labels and tick text painted outside of plots
    pub fn text_color(self) -> Color32 {
        match self {
            Theme::Dark => Color32::LIGHT_GRAY,
            Theme::Ticks | Theme::Light => Color32::BLACK,
        }
    }

    /// Apply visuals and a uniform font size to the context
    pub fn apply(self, ctx: &Context, font_size: f32) {
        ctx.set_visuals(self.visuals());
        ctx.all_styles_mut(|style| {
            for font in style.text_styles.values_mut() {
                font.size = font_size;
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_visibility() {
        assert!(!Theme::Ticks.show_grid());
        assert!(Theme::Dark.show_grid());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Theme::Ticks).unwrap(), "\"ticks\"");
        let t: Theme = serde_json::from_str("\"dark\"").unwrap();
        assert_eq!(t, Theme::Dark);
    }

    #[test]
    fn test_ticks_background_is_white() {
        assert_eq!(Theme::Ticks.visuals().panel_fill, Color32::WHITE);
    }
}
