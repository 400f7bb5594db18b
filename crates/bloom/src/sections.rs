//! Renderers for the page sections.
//!
//! Each function draws one section into its rectangle of the off-screen
//! page buffer. Animation state is sampled by the caller and passed in, so
//! these stay free of clocks.

use bloom_fonts::{GLYPH_HEIGHT, SEPARATOR, art_width, digit_art};
use bloom_motion::animations::{rings, sphere as surface};
use bloom_motion::{
    Appearance, DIGIT_BLUR_PX, DigitFrame, DigitPose, Ease, Repeat, Tween, fade, mix, px_to_rows,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget, Wrap},
};

const WHITE: Color = Color::Rgb(255, 255, 255);
const GRAY: Color = Color::Rgb(156, 163, 175);
const PULSE_DOT: Color = Color::Rgb(52, 211, 153);
/// Backdrop colour under the splash vignette.
const CANOPY: Color = Color::Rgb(30, 40, 20);

pub const UNIT_LABELS: [&str; 4] = ["DAYS", "HOURS", "MIN", "SEC"];
/// Columns between countdown units, separator included.
const UNIT_GAP: u16 = 5;
/// Left margin of the splash content.
const MARGIN: u16 = 4;

/// Row offsets inside the showcase section.
pub const HEADING_ROW: u16 = 3;
pub const DIVIDER_ROW: u16 = 7;
pub const CARDS_ROW: u16 = 9;
const CARD_ROWS: u16 = 6;

const FEATURES: [(&str, &str, &str); 4] = [
    (
        "▶",
        "Scroll-Driven Animation",
        "Reveal triggers play these cards forward as you scroll down the page.",
    ),
    (
        "✦",
        "Smooth Tweens",
        "Eased interpolation sampled every frame from a monotonic clock.",
    ),
    (
        "◷",
        "Timeline Control",
        "Sequenced tracks with delays, repeats and yoyo playback.",
    ),
    (
        "≈",
        "Stagger Effects",
        "Elements animate in with precise stagger delays for visual impact.",
    ),
];

const HERO_CHIPS: [&str; 4] = ["Tweens", "Timelines", "Scroll Triggers", "Noise Shaders"];
const FOOTER_CHIPS: [&str; 6] = ["ratatui", "crossterm", "chrono", "serde", "toml", "tracing"];

/// Everything the splash needs for one frame.
#[derive(Debug, Clone)]
pub struct SplashView<'a> {
    pub title: &'a str,
    pub tagline: &'a str,
    pub badge: &'a str,
    pub accent: Color,
    /// Header, title, tagline and countdown row, in that order.
    pub entrances: [Appearance; 4],
    /// Days, hours, minutes and seconds.
    pub units: [DigitFrame; 4],
    /// Opacity of the badge's status dot.
    pub pulse: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct HeroView {
    pub accent: Color,
    pub elapsed_ms: u64,
    /// Title, subtitle and chip row.
    pub items: [Appearance; 3],
}

#[derive(Debug, Clone, Copy)]
pub struct ShowcaseView {
    pub accent: Color,
    pub heading: Appearance,
    /// Horizontal scale of the divider in `[0, 1]`.
    pub divider: f32,
    pub cards: [Appearance; 4],
}

fn tint(color: Color, appearance: Appearance) -> Style {
    Style::new().fg(fade(color, appearance.opacity))
}

/// Page row for a line `row` rows into `area`, shifted by the appearance.
fn shifted(area: Rect, row: i32, appearance: Appearance) -> i32 {
    i32::from(area.y) + row + px_to_rows(appearance.offset_y)
}

/// Draw one line of text on page row `y`, clipped to `area`.
fn put_line(buf: &mut Buffer, area: Rect, y: i32, line: Line<'_>, alignment: Alignment) {
    if y < i32::from(area.y) || y >= i32::from(area.bottom()) {
        return;
    }
    let row = Rect::new(area.x, y as u16, area.width, 1);
    Paragraph::new(line).alignment(alignment).render(row, buf);
}

/// Set non-blank characters of `text` starting at `(x, y)`.
fn put_glyphs(buf: &mut Buffer, area: Rect, x: u16, y: i32, text: &str, style: Style) {
    if y < i32::from(area.y) || y >= i32::from(area.bottom()) {
        return;
    }
    for (dx, ch) in text.chars().enumerate() {
        let col = x.saturating_add(dx as u16);
        if ch == ' ' || col >= area.right() {
            continue;
        }
        if let Some(cell) = buf.cell_mut((col, y as u16)) {
            cell.set_char(ch).set_style(style);
        }
    }
}

/// Darkness of the radial vignette at `r`, the distance from the centre
/// as a fraction of the distance to a corner.
pub fn vignette_shade(r: f32) -> f32 {
    const STOPS: [(f32, f32); 3] = [(0.2, 0.0), (0.55, 0.3), (1.0, 0.7)];
    if r <= STOPS[0].0 {
        return STOPS[0].1;
    }
    for pair in STOPS.windows(2) {
        let ((r0, a0), (r1, a1)) = (pair[0], pair[1]);
        if r <= r1 {
            return a0 + (a1 - a0) * (r - r0) / (r1 - r0);
        }
    }
    STOPS[2].1
}

/// Radial vignette with darker strips at the top and bottom edges.
pub fn vignette(buf: &mut Buffer, area: Rect) {
    if area.is_empty() {
        return;
    }
    let (w, h) = (f32::from(area.width), f32::from(area.height));
    let top_rows = 3.0_f32.min(h / 4.0);
    let bottom_rows = 5.0_f32.min(h / 3.0);

    for row in 0..area.height {
        let y = f32::from(row) + 0.5;
        let strip = if y < top_rows {
            0.6 * (1.0 - y / top_rows)
        } else if y > h - bottom_rows {
            0.8 * (1.0 - (h - y) / bottom_rows)
        } else {
            0.0
        };
        for col in 0..area.width {
            let nx = (f32::from(col) + 0.5) / w * 2.0 - 1.0;
            let ny = y / h * 2.0 - 1.0;
            let r = (nx * nx + ny * ny).sqrt() / std::f32::consts::SQRT_2;
            let dark = 1.0 - (1.0 - vignette_shade(r)) * (1.0 - strip);
            if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                cell.set_bg(fade(CANOPY, 1.0 - dark));
            }
        }
    }
}

fn pose_style(pose: &DigitPose, color: Color, row: Appearance) -> Option<Style> {
    let sharpness = 1.0 - pose.blur / (2.0 * DIGIT_BLUR_PX);
    let alpha = pose.opacity * sharpness * row.opacity;
    (alpha > 0.05).then(|| Style::new().fg(fade(color, alpha)).add_modifier(Modifier::BOLD))
}

/// Draw one countdown unit's art, clipped to its five-row window.
fn draw_unit(
    buf: &mut Buffer,
    area: Rect,
    (x, top): (u16, i32),
    frame: &DigitFrame,
    row: Appearance,
    color: Color,
) {
    for pose in [frame.outgoing.as_ref(), Some(&frame.incoming)]
        .into_iter()
        .flatten()
    {
        let Some(style) = pose_style(pose, color, row) else {
            continue;
        };
        let shift = px_to_rows(pose.offset_y);
        for (i, line) in digit_art(&pose.text).iter().enumerate() {
            let y = top + i as i32 + shift;
            if y < top || y >= top + GLYPH_HEIGHT as i32 {
                continue;
            }
            put_glyphs(buf, area, x, y, line, style);
        }
    }
}

fn countdown_width(units: &[DigitFrame; 4]) -> u16 {
    let digits: usize = units.iter().map(|u| art_width(&u.incoming.text)).sum();
    digits as u16 + UNIT_GAP * 3
}

fn badge_line<'a>(badge: &'a str, pulse: f32, appearance: Appearance) -> Line<'a> {
    Line::from(vec![
        Span::styled("● ", Style::new().fg(fade(PULSE_DOT, pulse * appearance.opacity))),
        Span::styled(badge.to_uppercase(), tint(WHITE, appearance).add_modifier(Modifier::DIM)),
    ])
}

/// The coming-soon splash text: header, title, tagline, countdown and
/// badge. The vignette and the leaves go underneath, drawn first.
pub fn splash(buf: &mut Buffer, area: Rect, view: &SplashView<'_>) {
    let [header, title, tagline, row] = view.entrances;
    let h = i32::from(area.height);
    let content = Rect::new(
        area.x + MARGIN,
        area.y,
        area.width.saturating_sub(MARGIN * 2),
        area.height,
    );

    if header.is_visible() {
        let logo = Line::from(vec![
            Span::styled("❦ ", tint(view.accent, header).add_modifier(Modifier::BOLD)),
            Span::styled(view.title.to_uppercase(), tint(WHITE, header)),
        ]);
        put_line(buf, content, shifted(area, 1, header), logo, Alignment::Left);
    }

    let label_row = h - 2;
    let art_top = label_row - GLYPH_HEIGHT as i32;
    let tagline_row = art_top - 2;
    let title_row = tagline_row - 1;

    if title.is_visible() {
        let line = Line::styled(
            view.title,
            tint(WHITE, title).add_modifier(Modifier::BOLD),
        );
        put_line(buf, content, shifted(area, title_row, title), line, Alignment::Left);
    }
    if tagline.is_visible() {
        let line = Line::styled(
            view.tagline,
            tint(WHITE, tagline).add_modifier(Modifier::ITALIC | Modifier::DIM),
        );
        put_line(buf, content, shifted(area, tagline_row, tagline), line, Alignment::Left);
    }
    if !row.is_visible() {
        return;
    }

    let shift = px_to_rows(row.offset_y);
    let badge = badge_line(view.badge, view.pulse, row);
    let needed = countdown_width(&view.units);

    if needed > content.width {
        // Too narrow for the display digits.
        let text = view
            .units
            .iter()
            .map(|u| u.incoming.text.as_str())
            .collect::<Vec<_>>()
            .join(" : ");
        let compact = Line::styled(text, tint(view.accent, row).add_modifier(Modifier::BOLD));
        put_line(buf, content, shifted(area, label_row - 1, row), compact, Alignment::Left);
        put_line(buf, content, shifted(area, label_row, row), badge, Alignment::Left);
        return;
    }

    let top = i32::from(area.y) + art_top + shift;
    let label_y = i32::from(area.y) + label_row + shift;
    let separator = Style::new().fg(fade(WHITE, 0.2 * row.opacity));
    let label = tint(WHITE, row).add_modifier(Modifier::DIM);
    let mut x = content.x;

    for (i, unit) in view.units.iter().enumerate() {
        let width = art_width(&unit.incoming.text) as u16;
        draw_unit(buf, area, (x, top), unit, row, view.accent);

        let name = UNIT_LABELS[i];
        let pad = width.saturating_sub(name.len() as u16) / 2;
        put_glyphs(buf, area, x + pad, label_y, name, label);

        x += width;
        if i + 1 < view.units.len() {
            for (dy, glyph) in SEPARATOR.iter().enumerate() {
                put_glyphs(buf, area, x + UNIT_GAP / 2, top + dy as i32, glyph, separator);
            }
            x += UNIT_GAP;
        }
    }

    let badge_width = badge.width() as u16;
    if content.width >= needed + badge_width + 4 {
        put_line(buf, content, label_y, badge, Alignment::Right);
    } else {
        put_line(buf, content, shifted(area, tagline_row, row), badge, Alignment::Right);
    }
}

fn chips<'a>(names: &[&'a str], appearance: Appearance) -> Line<'a> {
    let border = tint(WHITE, Appearance {
        opacity: appearance.opacity * 0.3,
        ..appearance
    });
    let text = tint(WHITE, appearance);
    let mut spans = Vec::with_capacity(names.len() * 4);
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled("( ", border));
        spans.push(Span::styled(*name, text));
        spans.push(Span::styled(" )", border));
    }
    Line::from(spans)
}

/// Breathing rings behind a floating title, subtitle and chips.
pub fn hero(buf: &mut Buffer, area: Rect, view: &HeroView) {
    rings::render(buf, area, view.elapsed_ms);

    let [title, subtitle, chip_row] = view.items;
    let center = i32::from(area.height / 2);
    let float = Tween::new(0.0, -15.0, 3_000, Ease::EaseInOut)
        .repeat(Repeat::Infinite)
        .yoyo(true)
        .value_at(view.elapsed_ms);

    if title.is_visible() {
        let line = Line::styled(
            "D E L I C I O U S",
            tint(WHITE, title).add_modifier(Modifier::BOLD),
        );
        let y = shifted(area, center - 2, title) + px_to_rows(float);
        put_line(buf, area, y, line, Alignment::Center);
    }
    if subtitle.is_visible() {
        let line = Line::styled(
            "A creative showcase of tweens, timelines, scroll triggers and shaded noise.",
            tint(GRAY, subtitle),
        );
        put_line(buf, area, shifted(area, center, subtitle), line, Alignment::Center);
    }
    if chip_row.is_visible() {
        let line = chips(&HERO_CHIPS, chip_row);
        put_line(buf, area, shifted(area, center + 2, chip_row), line, Alignment::Center);
    }

    let bob = Tween::new(0.0, 1.0, 1_000, Ease::EaseInOut)
        .repeat(Repeat::Infinite)
        .yoyo(true)
        .value_at(view.elapsed_ms);
    let indicator = Line::styled(
        "⌄",
        Style::new().fg(mix(WHITE, fade(WHITE, 0.3), bob)),
    );
    let y = i32::from(area.bottom()) - 3 + px_to_rows(bob * 10.0);
    put_line(buf, area, y, indicator, Alignment::Center);
}

/// Rectangles of the feature cards: a 2x2 grid, or one column when narrow.
pub fn card_rects(area: Rect) -> [Rect; 4] {
    let top = area.y + CARDS_ROW;
    let inner = area.width.saturating_sub(MARGIN * 2);
    if inner >= 64 {
        let width = (inner - 2) / 2;
        std::array::from_fn(|i| {
            let (col, row) = ((i % 2) as u16, (i / 2) as u16);
            Rect::new(
                area.x + MARGIN + col * (width + 2),
                top + row * (CARD_ROWS + 1),
                width,
                CARD_ROWS,
            )
        })
    } else {
        std::array::from_fn(|i| {
            Rect::new(area.x + MARGIN, top + i as u16 * CARD_ROWS, inner, CARD_ROWS)
        })
    }
}

fn card(buf: &mut Buffer, area: Rect, rect: Rect, feature: (&str, &str, &str), appearance: Appearance) {
    if !appearance.is_visible() {
        return;
    }
    let shift = px_to_rows(appearance.offset_y).clamp(0, i32::from(u16::MAX)) as u16;
    let rect = Rect {
        y: rect.y.saturating_add(shift),
        ..rect
    }
    .intersection(area);
    if rect.is_empty() {
        return;
    }

    let (icon, title, description) = feature;
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(tint(WHITE, Appearance {
            opacity: appearance.opacity * 0.25,
            ..appearance
        }));
    let text = vec![
        Line::from(vec![
            Span::styled(format!("{icon}  "), tint(WHITE, appearance)),
            Span::styled(title, tint(WHITE, appearance).add_modifier(Modifier::BOLD)),
        ]),
        Line::styled(description, tint(GRAY, appearance)),
    ];
    Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(block)
        .render(rect, buf);
}

/// Heading, divider and the scroll-revealed feature cards.
pub fn showcase(buf: &mut Buffer, area: Rect, view: &ShowcaseView) {
    if view.heading.is_visible() {
        let line = Line::styled(
            "Motion Showcase",
            tint(view.accent, view.heading).add_modifier(Modifier::BOLD),
        );
        let y = shifted(area, i32::from(HEADING_ROW), view.heading);
        put_line(buf, area, y, line, Alignment::Center);
    }
    let hint = Line::styled(
        "Scroll down to see elements animate into view",
        Style::new().fg(fade(GRAY, 0.7)),
    );
    put_line(buf, area, i32::from(area.y + HEADING_ROW + 2), hint, Alignment::Center);

    let full = area.width.saturating_sub(MARGIN * 2);
    let width = (f32::from(full) * view.divider.clamp(0.0, 1.0)).round() as u16;
    if width > 0 {
        let start = area.x + (area.width - width) / 2;
        let y = area.y + DIVIDER_ROW;
        for i in 0..width {
            // Brightest in the middle, transparent at the ends.
            let t = 1.0 - (2.0 * f32::from(i) / f32::from(width.max(2) - 1) - 1.0).abs();
            if let Some(cell) = buf.cell_mut((start + i, y)) {
                cell.set_char('─').set_fg(fade(WHITE, 0.4 * t));
            }
        }
    }

    for ((rect, feature), appearance) in card_rects(area).into_iter().zip(FEATURES).zip(view.cards) {
        card(buf, area, rect, feature, appearance);
    }
}

/// The shaded noise sphere with its caption.
pub fn sphere(buf: &mut Buffer, area: Rect, elapsed_ms: u64, accent: Color) {
    surface::render(buf, area, elapsed_ms);

    let center = i32::from(area.y + area.height / 2);
    let heading = Line::styled(
        "Shader Sphere",
        Style::new().fg(WHITE).add_modifier(Modifier::BOLD),
    );
    put_line(buf, area, center - 1, heading, Alignment::Center);
    let lines = [
        "Simplex noise displacement with dynamic colouring,",
        "shaded cell by cell in real time.",
    ];
    for (i, text) in lines.into_iter().enumerate() {
        let line = Line::styled(text, Style::new().fg(mix(GRAY, accent, 0.2)));
        put_line(buf, area, center + 1 + i as i32, line, Alignment::Center);
    }
}

/// "Built with" chips and the copyright line.
pub fn footer(buf: &mut Buffer, area: Rect, appearance: Appearance, year: i32) {
    for col in area.left()..area.right() {
        if let Some(cell) = buf.cell_mut((col, area.y)) {
            cell.set_char('─').set_fg(fade(WHITE, 0.1));
        }
    }
    if !appearance.is_visible() {
        return;
    }

    let heading = Line::styled("Built with", tint(WHITE, appearance).add_modifier(Modifier::BOLD));
    put_line(buf, area, shifted(area, 2, appearance), heading, Alignment::Center);
    put_line(
        buf,
        area,
        shifted(area, 4, appearance),
        chips(&FOOTER_CHIPS, appearance),
        Alignment::Center,
    );
    let copyright = Line::styled(
        format!("© {year} Delicious. All rights reserved."),
        tint(GRAY, appearance).add_modifier(Modifier::DIM),
    );
    put_line(buf, area, shifted(area, 6, appearance), copyright, Alignment::Center);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloom_motion::DigitTransition;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.left()..buf.area.right())
            .filter_map(|x| buf.cell((x, y)).map(|cell| cell.symbol().to_string()))
            .collect()
    }

    fn settled_units(texts: [&str; 4]) -> [DigitFrame; 4] {
        texts.map(|text| {
            let mut digit = DigitTransition::new();
            digit.update(text, 0);
            digit.frame(10_000)
        })
    }

    #[test]
    fn test_vignette_stops() {
        assert_eq!(vignette_shade(0.0), 0.0);
        assert_eq!(vignette_shade(0.2), 0.0);
        assert!((vignette_shade(0.55) - 0.3).abs() < 1e-6);
        assert!((vignette_shade(1.0) - 0.7).abs() < 1e-6);
        assert_eq!(vignette_shade(1.5), 0.7);
    }

    #[test]
    fn test_splash_draws_countdown_and_badge() {
        let area = Rect::new(0, 0, 90, 24);
        let mut buf = Buffer::empty(area);
        let view = SplashView {
            title: "Delicious Planet",
            tagline: "Bite into the Wild",
            badge: "01 Mar 2026",
            accent: Color::Rgb(160, 196, 72),
            entrances: [Appearance::SETTLED; 4],
            units: settled_units(["00", "01", "00", "00"]),
            pulse: 1.0,
        };
        splash(&mut buf, area, &view);

        let rows: Vec<String> = (0..24).map(|y| row_text(&buf, y)).collect();
        assert!(rows[1].contains("DELICIOUS PLANET"));
        assert!(rows.iter().any(|r| r.contains("Delicious Planet")));
        assert!(rows.iter().any(|r| r.contains("Bite into the Wild")));
        assert!(rows[22].contains("DAYS"));
        assert!(rows[22].contains("SEC"));
        assert!(rows[22].contains("01 MAR 2026"));
        // Top row of "00" art.
        assert!(rows[17].contains("┏━━┓ ┏━━┓"));
    }

    #[test]
    fn test_narrow_splash_falls_back_to_text() {
        let area = Rect::new(0, 0, 40, 24);
        let mut buf = Buffer::empty(area);
        let view = SplashView {
            title: "Delicious Planet",
            tagline: "Bite into the Wild",
            badge: "01 Mar 2026",
            accent: Color::Rgb(160, 196, 72),
            entrances: [Appearance::SETTLED; 4],
            units: settled_units(["12", "03", "45", "09"]),
            pulse: 1.0,
        };
        splash(&mut buf, area, &view);
        assert!(row_text(&buf, 21).contains("12 : 03 : 45 : 09"));
    }

    #[test]
    fn test_hidden_entrances_draw_no_text() {
        let area = Rect::new(0, 0, 90, 24);
        let mut buf = Buffer::empty(area);
        let view = SplashView {
            title: "Delicious Planet",
            tagline: "Bite into the Wild",
            badge: "01 Mar 2026",
            accent: Color::Rgb(160, 196, 72),
            entrances: [Appearance {
                opacity: 0.0,
                offset_y: 30.0,
            }; 4],
            units: settled_units(["00", "00", "00", "00"]),
            pulse: 1.0,
        };
        splash(&mut buf, area, &view);
        assert!((0..24).all(|y| row_text(&buf, y).trim().is_empty()));
    }

    #[test]
    fn test_card_grid_fits_section() {
        let area = Rect::new(0, 48, 100, 30);
        let cards = card_rects(area);
        assert_eq!(cards[0].y, 48 + CARDS_ROW);
        assert_eq!(cards[1].y, cards[0].y);
        assert!(cards[1].x > cards[0].right());
        assert!(cards[3].bottom() <= area.bottom());

        let narrow = card_rects(Rect::new(0, 0, 50, 30));
        assert!(narrow.windows(2).all(|w| w[1].y > w[0].y));
    }

    #[test]
    fn test_showcase_reveals_cards() {
        let area = Rect::new(0, 0, 100, 30);
        let hidden = Appearance {
            opacity: 0.0,
            offset_y: 80.0,
        };
        let mut buf = Buffer::empty(area);
        showcase(&mut buf, area, &ShowcaseView {
            accent: Color::Rgb(160, 196, 72),
            heading: hidden,
            divider: 0.0,
            cards: [hidden; 4],
        });
        assert!(!row_text(&buf, CARDS_ROW + 1).contains("Smooth Tweens"));

        let mut buf = Buffer::empty(area);
        showcase(&mut buf, area, &ShowcaseView {
            accent: Color::Rgb(160, 196, 72),
            heading: Appearance::SETTLED,
            divider: 1.0,
            cards: [Appearance::SETTLED; 4],
        });
        assert!(row_text(&buf, HEADING_ROW).contains("Motion Showcase"));
        assert!(row_text(&buf, DIVIDER_ROW).contains('─'));
        assert!(row_text(&buf, CARDS_ROW + 1).contains("Smooth Tweens"));
    }

    #[test]
    fn test_footer_shows_year() {
        let area = Rect::new(0, 0, 80, 8);
        let mut buf = Buffer::empty(area);
        footer(&mut buf, area, Appearance::SETTLED, 2026);
        assert!(row_text(&buf, 6).contains("© 2026 Delicious."));
        assert!(row_text(&buf, 2).contains("Built with"));
    }
}
