//! Toast stack rendering.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::state::{NotificationLevel, Toast, ToastPhase, ToastStack};
use crate::ui::layout::TOAST_HEIGHT;
use crate::ui::theme::Palette;

/// Render toasts bottom-up in `area`, newest at the bottom.
pub fn render_toasts(frame: &mut Frame, area: Rect, toasts: &ToastStack, palette: &Palette) {
    let mut bottom = area.y + area.height;

    for toast in toasts.iter().collect::<Vec<_>>().into_iter().rev() {
        if bottom < area.y + TOAST_HEIGHT {
            break;
        }
        bottom -= TOAST_HEIGHT;
        let toast_area = Rect {
            x: area.x,
            y: bottom,
            width: area.width,
            height: TOAST_HEIGHT,
        };
        render_toast(frame, toast_area, toast, palette);
    }
}

fn render_toast(frame: &mut Frame, area: Rect, toast: &Toast, palette: &Palette) {
    frame.render_widget(Clear, area);

    let notification = &toast.notification;
    let color = palette.level(notification.level);
    let icon = match notification.level {
        NotificationLevel::Info => "ℹ",
        NotificationLevel::Success => "✓",
        NotificationLevel::Warning => "⚠",
        NotificationLevel::Error => "✗",
    };

    // Entering and leaving toasts are drawn dimmed.
    let mut text_style = Style::default().fg(palette.fg);
    if toast.phase != ToastPhase::Visible {
        text_style = text_style.add_modifier(Modifier::DIM);
    }

    let content = Line::from(vec![
        Span::styled(format!("{icon} "), Style::default().fg(color)),
        Span::styled(notification.message.as_str(), text_style),
    ]);

    let paragraph = Paragraph::new(content).style(palette.base()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );

    frame.render_widget(paragraph, area);
}
