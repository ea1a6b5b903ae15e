//! Colors for the result card and error panel.

use eframe::egui::Color32;
use shared::domain::PredictionCategory;

pub const ERROR_FILL: Color32 = Color32::from_rgb(0xfd, 0xec, 0xea);
pub const ERROR_TEXT: Color32 = Color32::from_rgb(0xc0, 0x39, 0x2b);

pub fn category_color(category: PredictionCategory) -> Color32 {
    match category {
        PredictionCategory::HighInfo => Color32::from_rgb(0x27, 0xae, 0x60),
        PredictionCategory::MediumInfo => Color32::from_rgb(0xf3, 0x9c, 0x12),
        PredictionCategory::LowInfo => Color32::from_rgb(0xe7, 0x4c, 0x3c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_category_has_a_distinct_color() {
        let high = category_color(PredictionCategory::HighInfo);
        let medium = category_color(PredictionCategory::MediumInfo);
        let low = category_color(PredictionCategory::LowInfo);
        assert_ne!(high, medium);
        assert_ne!(medium, low);
        assert_ne!(high, low);
    }
}
