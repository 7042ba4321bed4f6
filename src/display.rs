//! Text rendering of tracker frames.

use std::fmt::Write;
use std::time::Duration;

use hex_color::HexColor;

use crate::tracker::{Frame, Modifiers, RoleStatus};

/// Colours for role status text.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub ready: HexColor,
    pub cooling: HexColor,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            ready: HexColor::rgb(0x00, 0x80, 0x00),
            cooling: HexColor::rgb(0xFF, 0x00, 0x00),
        }
    }
}

impl Palette {
    pub fn status_color(&self, remaining: Duration) -> HexColor {
        if remaining.is_zero() {
            self.ready
        } else {
            self.cooling
        }
    }
}

/// `"Ready"`, or the remaining whole seconds such as `"267s"`.
pub fn format_remaining(remaining: Duration) -> String {
    if remaining.is_zero() {
        "Ready".to_string()
    } else {
        format!("{:.0}s", remaining.as_secs_f64())
    }
}

/// `MM:SS`, truncated to whole seconds. Minutes are not capped at 59.
pub fn format_game_time(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

pub fn format_modifiers(modifiers: Modifiers) -> String {
    let flag = |on: bool, label: char| if on { format!("[{label}]") } else { "[ ]".to_string() };
    format!(
        "{}{}",
        flag(modifiers.speed_boots, 'B'),
        flag(modifiers.cooldown_trinket, 'T')
    )
}

/// Wrap `text` in a 24-bit ANSI foreground colour.
pub fn paint(text: &str, color: HexColor) -> String {
    format!("\x1b[38;2;{};{};{}m{text}\x1b[0m", color.r, color.g, color.b)
}

fn render_role(status: &RoleStatus, width: usize, palette: Option<&Palette>) -> String {
    let text = format_remaining(status.remaining);
    let text = match palette {
        Some(palette) => paint(&text, palette.status_color(status.remaining)),
        None => text,
    };
    format!(
        "{:<width$}  {}  {}",
        status.role.name(),
        format_modifiers(status.modifiers),
        text
    )
}

/// Render a frame as terminal lines.
///
/// # Arguments
///
/// * `frame` - The state to draw.
/// * `palette` - Colours for the status column, or `None` for plain text.
pub fn render(frame: &Frame, palette: Option<&Palette>) -> String {
    let width = frame
        .roles
        .iter()
        .map(|status| status.role.name().len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let state = if frame.game_running { "running" } else { "stopped" };
    let _ = writeln!(
        out,
        "{} | Game {} ({state})",
        frame.ability,
        format_game_time(frame.game_elapsed)
    );
    for status in &frame.roles {
        let _ = writeln!(out, "{}", render_role(status, width, palette));
    }
    out
}
