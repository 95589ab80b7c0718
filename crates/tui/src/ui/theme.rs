use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub text: Color,
    pub text_muted: Color,
    pub dim: Color,
    pub accent: Color,
    pub border: Color,
    pub highlight: Color,
    pub positive: Color,
    pub warning: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::Rgb(220, 220, 220),
            text_muted: Color::Rgb(150, 150, 150),
            dim: Color::Rgb(100, 100, 100),
            accent: Color::Rgb(230, 190, 60),
            border: Color::Rgb(70, 70, 70),
            highlight: Color::Rgb(40, 44, 52),
            positive: Color::Rgb(90, 180, 110),
            warning: Color::Rgb(220, 160, 60),
            error: Color::Rgb(200, 80, 80),
        }
    }
}
