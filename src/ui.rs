use pagenav::document::Selector;
use pagenav::tracker;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::App;

const NAV_MARKER: &str = "▸ ";
const NAV_PADDING: u16 = 5;

pub fn draw(app: &App, f: &mut ratatui::Frame) {
    f.render_widget(app, f.area());
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let dim = Style::default().add_modifier(Modifier::DIM);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                [
                    Constraint::Length(1),
                    Constraint::Min(1),
                    Constraint::Length(1),
                ]
                .as_ref(),
            )
            .split(area);

        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(self.nav_pane_width()), Constraint::Min(1)].as_ref())
            .split(chunks[1]);

        // header
        let docked = if self.nav.docked() {
            Span::styled(
                " docked ",
                Style::default().fg(Color::Magenta).patch(bold),
            )
        } else {
            Span::styled(" in flow ", dim)
        };
        Paragraph::new(Line::from(vec![
            Span::styled(" pagenav ", bold),
            docked,
            Span::styled("  ↑/↓ wheel PgUp/PgDn g/G scroll · q quits", dim),
        ]))
        .render(chunks[0], buf);

        self.render_nav_pane(panes[0], buf);
        self.render_document_pane(panes[1], buf);

        // status
        let viewport = self.pane_height();
        let status = format!(
            " scroll {:>4.0}  margin {:>3.0}  dock point {:.0}  active: {}",
            self.scroll_top,
            tracker::scroll_margin(viewport),
            self.nav.dock_point(),
            self.nav.active_heading().unwrap_or("-"),
        );
        Paragraph::new(Span::styled(status, dim)).render(chunks[2], buf);
    }
}

impl App {
    fn nav_pane_width(&self) -> u16 {
        let widest = self
            .spec
            .sections
            .iter()
            .map(|s| s.title.width())
            .max()
            .unwrap_or(10);
        widest as u16 + NAV_PADDING
    }

    fn render_nav_pane(&self, area: Rect, buf: &mut Buffer) {
        let active_style = Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD);
        let idle_style = Style::default().add_modifier(Modifier::DIM);

        let active_class = &self.nav.config().active_nav_item_class;
        let root = &self.nav.config().nav_item_selector_root;

        let mut lines = vec![Line::from(Span::styled(
            "contents",
            Style::default().add_modifier(Modifier::UNDERLINED),
        ))];
        for section in &self.spec.sections {
            // Style from the document's classes, so the pane shows exactly
            // what the widget applied
            let is_active = Selector::parse(&format!("{root}{}", section.id))
                .ok()
                .and_then(|sel| self.doc.query_first(self.doc.body(), &sel))
                .map(|item| self.doc.has_class(item, active_class))
                .unwrap_or(false);

            let line = if is_active {
                Line::from(Span::styled(
                    format!("{NAV_MARKER}{}", section.title),
                    active_style,
                ))
            } else {
                Line::from(Span::styled(format!("  {}", section.title), idle_style))
            };
            lines.push(line);
        }

        Paragraph::new(lines).render(area, buf);
    }

    fn render_document_pane(&self, area: Rect, buf: &mut Buffer) {
        let heading_style = Style::default()
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        let lead_style = Style::default().fg(Color::Yellow);
        let filler_style = Style::default().add_modifier(Modifier::DIM);

        let headings = self.nav.headings();
        let top = self.scroll_top.max(0.0).floor() as u64;

        let mut lines = Vec::with_capacity(area.height as usize);
        for row in top..top + area.height as u64 {
            let at = row as f64;
            let line = if at >= self.spec.total_height() {
                Line::from(Span::styled("~", filler_style))
            } else if at < self.spec.lead_height {
                if row == 0 {
                    Line::from(Span::styled("The Demo Page", lead_style))
                } else {
                    Line::from(Span::styled("≈", lead_style))
                }
            } else if at < self.spec.content_top() {
                if at == self.spec.lead_height {
                    Line::from(Span::styled("[in-page navigation]", filler_style))
                } else {
                    Line::from(Span::styled("│", filler_style))
                }
            } else {
                match tracker::current_heading(headings, at) {
                    Some(h) if h.position == at => {
                        let title = self
                            .spec
                            .section(&h.id)
                            .map(|s| s.title.as_str())
                            .unwrap_or(h.id.as_str());
                        Line::from(Span::styled(format!("## {title}"), heading_style))
                    }
                    Some(_) => {
                        let width = (area.width as usize).saturating_sub(4).min(48);
                        Line::from(Span::styled("·".repeat(width), filler_style))
                    }
                    None => Line::from(""),
                }
            };
            lines.push(line);
        }

        Paragraph::new(lines).render(area, buf);
    }
}
