use egui::Color32;

use crate::models::activity::ActivityKind;

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

fn blend(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |c1: u8, c2: u8| -> u8 { ((c1 as f32 * (1.0 - t)) + (c2 as f32 * t)).round() as u8 };
    Color32::from_rgb(lerp(a.r(), b.r()), lerp(a.g(), b.g()), lerp(a.b(), b.b()))
}

/// Card fill colour per activity kind.
pub(crate) fn kind_color(kind: ActivityKind) -> Color32 {
    match kind {
        ActivityKind::Meeting => Color32::from_rgb(66, 133, 244),
        ActivityKind::Meal => Color32::from_rgb(234, 167, 0),
        ActivityKind::Flight => Color32::from_rgb(156, 39, 176),
        ActivityKind::Accommodation => Color32::from_rgb(0, 150, 136),
        ActivityKind::Travel => Color32::from_rgb(121, 134, 203),
        ActivityKind::Event => Color32::from_rgb(233, 30, 99),
        ActivityKind::Break => Color32::from_rgb(96, 125, 139),
        ActivityKind::Other => Color32::from_rgb(120, 120, 120),
    }
}

pub(crate) fn card_fill(kind: ActivityKind, is_dark: bool) -> Color32 {
    let base = kind_color(kind);
    if is_dark {
        blend(base, Color32::BLACK, 0.35)
    } else {
        blend(base, Color32::WHITE, 0.65)
    }
}

pub(crate) fn card_border(kind: ActivityKind) -> Color32 {
    kind_color(kind)
}

#[derive(Clone, Copy)]
pub struct TripGridPalette {
    pub hour_label_bg: Color32,
    pub regular_bg: Color32,
    pub weekend_bg: Color32,
    pub today_bg: Color32,
    pub hour_line: Color32,
    pub divider: Color32,
    pub hover_overlay: Color32,
    pub drop_highlight: Color32,
    pub header_bg: Color32,
    pub header_text: Color32,
    pub text: Color32,
    pub muted_text: Color32,
    pub is_dark: bool,
}

impl TripGridPalette {
    pub fn light() -> Self {
        Self {
            hour_label_bg: Color32::from_rgb(245, 245, 245),
            regular_bg: Color32::WHITE,
            weekend_bg: Color32::from_rgb(248, 246, 240),
            today_bg: Color32::from_rgb(236, 243, 254),
            hour_line: Color32::from_rgb(220, 220, 220),
            divider: Color32::from_rgb(200, 200, 200),
            hover_overlay: with_alpha(Color32::from_rgb(66, 133, 244), 40),
            drop_highlight: with_alpha(Color32::from_rgb(66, 133, 244), 80),
            header_bg: Color32::from_rgb(240, 240, 240),
            header_text: Color32::from_rgb(40, 40, 40),
            text: Color32::from_rgb(30, 30, 30),
            muted_text: Color32::from_rgb(110, 110, 110),
            is_dark: false,
        }
    }

    pub fn dark() -> Self {
        Self {
            hour_label_bg: Color32::from_rgb(35, 35, 38),
            regular_bg: Color32::from_rgb(27, 27, 30),
            weekend_bg: Color32::from_rgb(32, 30, 28),
            today_bg: Color32::from_rgb(30, 38, 52),
            hour_line: Color32::from_rgb(55, 55, 58),
            divider: Color32::from_rgb(70, 70, 74),
            hover_overlay: with_alpha(Color32::from_rgb(100, 160, 255), 40),
            drop_highlight: with_alpha(Color32::from_rgb(100, 160, 255), 80),
            header_bg: Color32::from_rgb(40, 40, 44),
            header_text: Color32::from_rgb(220, 220, 220),
            text: Color32::from_rgb(230, 230, 230),
            muted_text: Color32::from_rgb(150, 150, 150),
            is_dark: true,
        }
    }

    pub fn for_theme(theme: &str) -> Self {
        if theme.to_lowercase().contains("dark") {
            Self::dark()
        } else {
            Self::light()
        }
    }
}
