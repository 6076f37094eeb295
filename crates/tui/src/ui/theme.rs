use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub text: Color,
    pub text_muted: Color,
    pub border: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::Rgb(220, 220, 220),
            text_muted: Color::Rgb(140, 140, 140),
            border: Color::Rgb(70, 80, 90),
            accent: Color::Rgb(80, 160, 160),
            positive: Color::Rgb(110, 190, 110),
            negative: Color::Rgb(220, 110, 90),
            warning: Color::Rgb(220, 180, 80),
            error: Color::Rgb(200, 80, 80),
        }
    }
}
