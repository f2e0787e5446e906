//! Hero banner drawn over the rain.

use glyphrain_config::HeroConfig;
use glyphrain_core::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Margin, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Clear, Paragraph, Widget, Wrap},
};

/// Widest the tagline is allowed to get before wrapping.
const MAX_TAGLINE_WIDTH: u16 = 60;

/// The centered badge, headline and tagline block.
#[derive(Debug, Clone, Copy)]
pub struct Hero<'a> {
    config: &'a HeroConfig,
    theme: Theme,
}

impl<'a> Hero<'a> {
    pub fn new(config: &'a HeroConfig, theme: Theme) -> Self {
        Self { config, theme }
    }

    /// Width of the text panel for a terminal `available` cells wide.
    fn panel_width(&self, available: u16) -> u16 {
        let widest = [
            self.config.badge.chars().count() + 4,
            self.config.headline.chars().count(),
            self.config.highlight.chars().count(),
            self.config.tagline.chars().count().min(MAX_TAGLINE_WIDTH as usize),
        ]
        .into_iter()
        .max()
        .unwrap_or(0) as u16;
        // Two cells of padding on each side
        widest.saturating_add(4).min(available)
    }

    fn tagline_height(&self, width: u16) -> u16 {
        let inner = width.saturating_sub(4).max(1) as usize;
        let len = self.config.tagline.chars().count();
        len.div_ceil(inner).max(1) as u16
    }
}

impl Widget for Hero<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = self.panel_width(area.width);
        let tagline_height = self.tagline_height(width);
        let height = (5 + tagline_height + 2).min(area.height);

        let [panel] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(area);
        let [panel] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(panel);

        Clear.render(panel, buf);
        buf.set_style(panel, Style::new().bg(Color::from(self.theme.background())));

        let inner = panel.inner(Margin::new(2, 1));
        let [badge, _, headline, highlight, _, tagline] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(inner);

        let accent = self.theme.accent();
        Line::from(format!("[ {} ]", self.config.badge.to_uppercase()))
            .fg(accent)
            .bold()
            .centered()
            .render(badge, buf);

        Line::from(self.config.headline.as_str())
            .fg(self.theme.foreground())
            .bold()
            .centered()
            .render(headline, buf);

        Line::from(self.config.highlight.as_str())
            .fg(accent)
            .bold()
            .centered()
            .render(highlight, buf);

        Paragraph::new(self.config.tagline.as_str())
            .style(Style::new().fg(Color::from(self.theme.muted())))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(tagline, buf);
    }
}
