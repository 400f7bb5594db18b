//! Vertical page layout and scrolling.

use ratatui::layout::Rect;

/// Rows taken by the footer, which is shorter than a viewport.
pub const FOOTER_ROWS: u16 = 8;
/// Sections never shrink below this many rows.
const MIN_SECTION_ROWS: u16 = 24;

/// Page sections, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Splash,
    Hero,
    Showcase,
    Sphere,
    Footer,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Splash,
        Section::Hero,
        Section::Showcase,
        Section::Sphere,
        Section::Footer,
    ];
}

/// Where every section sits on the page for a given viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    width: u16,
    view_rows: u16,
    section_rows: u16,
}

impl PageLayout {
    pub fn new(viewport: Rect) -> Self {
        Self {
            width: viewport.width,
            view_rows: viewport.height,
            section_rows: viewport.height.max(MIN_SECTION_ROWS),
        }
    }

    /// The section's rectangle in page coordinates.
    pub fn section(&self, section: Section) -> Rect {
        let index = Section::ALL
            .iter()
            .position(|s| *s == section)
            .unwrap_or_default() as u16;
        let height = match section {
            Section::Footer => FOOTER_ROWS,
            _ => self.section_rows,
        };
        Rect::new(0, index.saturating_mul(self.section_rows), self.width, height)
    }

    /// The whole page in page coordinates.
    pub fn page(&self) -> Rect {
        let footer = self.section(Section::Footer);
        Rect::new(0, 0, self.width, footer.bottom())
    }

    pub fn view_rows(&self) -> u16 {
        self.view_rows
    }

    pub fn max_scroll(&self) -> u16 {
        self.page().height.saturating_sub(self.view_rows)
    }

    /// The slice of the page shown at `scroll`.
    pub fn visible(&self, scroll: u16) -> Rect {
        Rect::new(0, scroll.min(self.max_scroll()), self.width, self.view_rows)
    }
}

/// Scroll position in rows from the top of the page.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Scroll {
    offset: u16,
}

impl Scroll {
    pub fn offset(&self) -> u16 {
        self.offset
    }

    pub fn by(&mut self, delta: i32, layout: &PageLayout) {
        let next = i32::from(self.offset) + delta;
        self.offset = next.clamp(0, i32::from(layout.max_scroll())) as u16;
    }

    pub fn to(&mut self, offset: u16, layout: &PageLayout) {
        self.offset = offset.min(layout.max_scroll());
    }

    pub fn to_top(&mut self) {
        self.offset = 0;
    }

    pub fn to_bottom(&mut self, layout: &PageLayout) {
        self.offset = layout.max_scroll();
    }

    /// Re-clamp after the layout changed size.
    pub fn clamp(&mut self, layout: &PageLayout) {
        self.offset = self.offset.min(layout.max_scroll());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> PageLayout {
        PageLayout::new(Rect::new(0, 0, 80, 30))
    }

    #[test]
    fn test_sections_stack() {
        let layout = layout();
        assert_eq!(layout.section(Section::Splash), Rect::new(0, 0, 80, 30));
        assert_eq!(layout.section(Section::Hero), Rect::new(0, 30, 80, 30));
        assert_eq!(layout.section(Section::Footer), Rect::new(0, 120, 80, FOOTER_ROWS));
        assert_eq!(layout.page().height, 128);
        assert_eq!(layout.max_scroll(), 98);
    }

    #[test]
    fn test_short_viewport_keeps_minimum_section() {
        let layout = PageLayout::new(Rect::new(0, 0, 40, 10));
        assert_eq!(layout.section(Section::Hero).y, MIN_SECTION_ROWS);
        assert_eq!(layout.visible(0).height, 10);
    }

    #[test]
    fn test_scroll_clamps() {
        let layout = layout();
        let mut scroll = Scroll::default();
        scroll.by(-5, &layout);
        assert_eq!(scroll.offset(), 0);
        scroll.by(40, &layout);
        assert_eq!(scroll.offset(), 40);
        scroll.by(1_000, &layout);
        assert_eq!(scroll.offset(), layout.max_scroll());

        let smaller = PageLayout::new(Rect::new(0, 0, 80, 20));
        scroll.to_bottom(&layout);
        scroll.clamp(&smaller);
        assert_eq!(scroll.offset(), smaller.max_scroll());
    }
}
