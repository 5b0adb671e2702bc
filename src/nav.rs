use crate::config::{NavConfig, NavOptions};
use crate::document::{Document, Node, NodeId, Selector};
use crate::error::NavError;
use crate::headings::{calculate_headings, Heading};
use crate::tracker::{NavEffect, TrackerState};

pub const COMPONENT_ATTR: &str = "data-component";
pub const COMPONENT_NAME: &str = "in-page-nav";

/// Class applied to the host while the widget is docked.
pub const AFFIX_CLASS: &str = "in-page-nav--affix";

/// The in-page navigation widget: highlights the nav item for the section
/// currently in view, and pins itself once scrolled past its natural
/// position.
///
/// All document access goes through the `Document` passed to the handlers;
/// the widget itself only holds ids and tracker state, so the matching
/// logic stays testable without a real page.
#[derive(Debug)]
pub struct InPageNav {
    host: NodeId,
    container: NodeId,
    config: NavConfig,
    headings_selector: Selector,
    headings: Vec<Heading>,
    state: TrackerState,
}

impl InPageNav {
    /// Attach to `host`. Options resolve as: explicit `opts` if given,
    /// otherwise the host's declarative `data-in-page-nav-*` attributes,
    /// with defaults filling anything left unset.
    ///
    /// Fails when the container or any headings cannot be found; both are
    /// configuration faults there is no point recovering from.
    pub fn new(
        doc: &mut Document,
        host: NodeId,
        opts: Option<NavOptions>,
    ) -> Result<Self, NavError> {
        let opts = opts.unwrap_or_else(|| NavOptions::from_attributes(doc.attributes(host)));
        let config = NavConfig::default().with(opts);

        let container = resolve_container(doc, &config.headings_container)?;
        let headings_selector = Selector::parse(&config.headings_selector)?;
        let headings = calculate_headings(doc, container, &headings_selector)?;

        // Inner wrapper keeps the host's margins from collapsing
        doc.wrap_children(
            host,
            Node::elem("div")
                .with_style("margin-top", "-1px")
                .with_style("padding-top", "1px"),
        );

        let state = TrackerState::new(doc.offset(host));

        Ok(Self {
            host,
            container,
            config,
            headings_selector,
            headings,
            state,
        })
    }

    /// Attach to every `data-component="in-page-nav"` element at or below
    /// `root` (defaulting to body). Shared `opts` apply to each widget.
    pub fn init(
        doc: &mut Document,
        root: Option<NodeId>,
        opts: Option<NavOptions>,
    ) -> Result<Vec<InPageNav>, NavError> {
        let root = root.unwrap_or_else(|| doc.body());

        let mut hosts = Vec::new();
        if doc.attribute(root, COMPONENT_ATTR) == Some(COMPONENT_NAME) {
            hosts.push(root);
        } else {
            let mut stack: Vec<NodeId> = doc.children(root).iter().rev().copied().collect();
            while let Some(el) = stack.pop() {
                if doc.attribute(el, COMPONENT_ATTR) == Some(COMPONENT_NAME) {
                    hosts.push(el);
                } else {
                    stack.extend(doc.children(el).iter().rev());
                }
            }
        }

        if hosts.is_empty() {
            return Err(NavError::MissingNavElement);
        }

        hosts
            .into_iter()
            .map(|host| InPageNav::new(doc, host, opts.clone()))
            .collect()
    }

    /// Scroll handler: evaluate dock state and the current heading, then
    /// apply whatever changed to the document.
    pub fn handle_scroll(&mut self, doc: &mut Document, scroll_top: f64, viewport_height: f64) {
        let effects = self.state.on_scroll(&self.headings, scroll_top, viewport_height);
        self.apply(doc, &effects);
    }

    /// Resize handler: the page may have reflowed, so the dock point and
    /// every heading position are recomputed before re-evaluating the
    /// current scroll position.
    pub fn handle_resize(
        &mut self,
        doc: &mut Document,
        scroll_top: f64,
        viewport_height: f64,
    ) -> Result<(), NavError> {
        self.state.on_resize(doc.offset(self.host));
        self.headings = calculate_headings(doc, self.container, &self.headings_selector)?;
        self.handle_scroll(doc, scroll_top, viewport_height);
        Ok(())
    }

    fn apply(&self, doc: &mut Document, effects: &[NavEffect]) {
        for effect in effects {
            match effect {
                NavEffect::Activate(id) => {
                    self.clear_active(doc);
                    if let Some(item) = self.nav_item(doc, id) {
                        doc.add_class(item, &self.config.active_nav_item_class);
                    }
                }
                NavEffect::ClearActive => self.clear_active(doc),
                NavEffect::Dock => doc.add_class(self.host, AFFIX_CLASS),
                NavEffect::Undock => doc.remove_class(self.host, AFFIX_CLASS),
            }
        }
    }

    fn clear_active(&self, doc: &mut Document) {
        for heading in &self.headings {
            if let Some(item) = self.nav_item(doc, &heading.id) {
                doc.remove_class(item, &self.config.active_nav_item_class);
            }
        }
    }

    /// The nav item for a heading id, looked up document-wide by the
    /// configured class root (`.in-page-nav__item--<id>` by default).
    fn nav_item(&self, doc: &Document, id: &str) -> Option<NodeId> {
        let selector =
            Selector::parse(&format!("{}{}", self.config.nav_item_selector_root, id)).ok()?;
        doc.query_first(doc.body(), &selector)
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn host(&self) -> NodeId {
        self.host
    }

    pub fn headings(&self) -> &[Heading] {
        &self.headings
    }

    pub fn dock_point(&self) -> f64 {
        self.state.dock_point
    }

    pub fn docked(&self) -> bool {
        self.state.docked
    }

    pub fn active_heading(&self) -> Option<&str> {
        self.state.active_heading.as_deref()
    }
}

fn resolve_container(doc: &Document, selector: &str) -> Result<NodeId, NavError> {
    let parsed = Selector::parse(selector)?;
    if parsed.matches(doc.node(doc.body())) {
        return Ok(doc.body());
    }
    doc.query_first(doc.body(), &parsed)
        .ok_or_else(|| NavError::MissingContainer {
            selector: selector.to_string(),
        })
}
