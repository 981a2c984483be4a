use anstyle::{AnsiColor, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Yellow,
}

impl Color {
    pub fn style(self) -> Style {
        let ansi = match self {
            Color::Red => AnsiColor::Red,
            Color::Green => AnsiColor::Green,
            Color::Yellow => AnsiColor::Yellow,
        };
        Style::new().fg_color(Some(ansi.into()))
    }
}

/// Wraps `text` in the color's SGR sequence and a reset, or returns it
/// untouched when color is disabled for the destination stream.
pub fn colorize(color: Color, text: &str, enabled: bool) -> String {
    if !enabled {
        return text.to_owned();
    }
    let style = color.style();
    format!("{}{}{}", style.render(), text, style.render_reset())
}
