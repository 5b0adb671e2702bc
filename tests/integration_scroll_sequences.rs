use pagenav::config::NavOptions;
use pagenav::document::{Document, DocumentSpec, Node, Selector};
use pagenav::nav::{InPageNav, AFFIX_CLASS};

fn sample() -> (Document, usize, DocumentSpec) {
    let spec = DocumentSpec::sample();
    let (doc, host) = spec.build();
    (doc, host, spec)
}

fn active_count(doc: &Document, class: &str) -> usize {
    let sel = Selector::parse(&format!(".{class}")).unwrap();
    doc.query(doc.body(), &sel).len()
}

#[test]
fn walking_the_whole_page_visits_every_section_once() {
    let (mut doc, host, spec) = sample();
    let mut nav = InPageNav::new(&mut doc, host, None).unwrap();
    let class = nav.config().active_nav_item_class.clone();
    let viewport = 24.0;

    let mut seen = Vec::new();
    let mut scroll_top = 0.0;
    while scroll_top < spec.total_height() {
        nav.handle_scroll(&mut doc, scroll_top, viewport);
        if let Some(id) = nav.active_heading() {
            if seen.last().map(String::as_str) != Some(id) {
                seen.push(id.to_string());
            }
        }
        assert!(active_count(&doc, &class) <= 1);
        scroll_top += 1.0;
    }

    let expected: Vec<String> = spec.sections.iter().map(|s| s.id.clone()).collect();
    assert_eq!(seen, expected);
}

#[test]
fn repeated_scrolls_leave_the_document_unchanged() {
    let (mut doc, host, _) = sample();
    let mut nav = InPageNav::new(&mut doc, host, None).unwrap();

    nav.handle_scroll(&mut doc, 40.0, 24.0);
    let snapshot = doc.clone();

    for _ in 0..5 {
        nav.handle_scroll(&mut doc, 40.0, 24.0);
    }

    let sel = Selector::parse(".in-page-nav-item--active").unwrap();
    assert_eq!(
        doc.query(doc.body(), &sel),
        snapshot.query(snapshot.body(), &sel)
    );
    assert!(doc.has_class(host, AFFIX_CLASS));
}

#[test]
fn reflow_moves_the_dock_boundary() {
    let (mut doc, host, _) = sample();
    let mut nav = InPageNav::new(&mut doc, host, None).unwrap();
    let viewport = 24.0;

    // Just past the original dock point
    let past = nav.dock_point() + 1.0;
    nav.handle_scroll(&mut doc, past, viewport);
    assert!(nav.docked());

    // The lead banner grows; the widget's natural position moves down
    // below the current scroll position
    doc.node_mut(host).local_top += 20.0;
    nav.handle_resize(&mut doc, past, viewport).unwrap();

    assert!(!nav.docked());
    assert!(!doc.has_class(host, AFFIX_CLASS));
}

#[test]
fn reflow_that_moves_headings_changes_the_match() {
    let (mut doc, host, _) = sample();
    let mut nav = InPageNav::new(&mut doc, host, None).unwrap();
    let viewport = 24.0;

    let second = nav.headings()[1].position;
    nav.handle_scroll(&mut doc, second, viewport);
    assert_eq!(nav.active_heading(), Some("installation"));

    // The first section collapses to a single row: everything below it
    // shifts up and the same scroll position now sits in a later section
    let sections = Selector::parse("section").unwrap();
    let first_section = doc.query_first(doc.body(), &sections).unwrap();
    let shrink = doc.node(first_section).height - 1.0;
    doc.node_mut(first_section).height = 1.0;
    let all = doc.query(doc.body(), &sections);
    for section in all {
        if section != first_section && doc.parent(section) == doc.parent(first_section) {
            doc.node_mut(section).local_top -= shrink;
        }
    }

    nav.handle_resize(&mut doc, second, viewport).unwrap();
    assert_eq!(nav.active_heading(), Some("usage"));
}

#[test]
fn custom_classes_are_applied_to_custom_nav_items() {
    let mut doc = Document::new();
    let toc = doc.add(
        doc.body(),
        Node::elem("aside").with_top(4.0).with_height(3.0),
    );
    doc.add(toc, Node::elem("li").with_class("toc__entry--alpha"));
    doc.add(toc, Node::elem("li").with_class("toc__entry--beta"));
    let content = doc.add(doc.body(), Node::elem("main").with_top(7.0));
    doc.add(content, Node::elem("h3").with_id("alpha").with_top(0.0));
    doc.add(content, Node::elem("h3").with_id("beta").with_top(40.0));

    let opts = NavOptions {
        headings_selector: Some("h3".into()),
        active_nav_item_class: Some("toc--current".into()),
        nav_item_selector_root: Some(".toc__entry--".into()),
        ..NavOptions::default()
    };
    let mut nav = InPageNav::new(&mut doc, toc, Some(opts)).unwrap();

    nav.handle_scroll(&mut doc, 50.0, 16.0);

    assert_eq!(nav.active_heading(), Some("beta"));
    let beta = doc
        .query_first(doc.body(), &Selector::parse(".toc__entry--beta").unwrap())
        .unwrap();
    assert!(doc.has_class(beta, "toc--current"));
    assert_eq!(active_count(&doc, "toc--current"), 1);
}

#[test]
fn json_page_description_drives_the_widget() {
    let json = r#"{
        "lead_height": 3.0,
        "sections": [
            { "id": "one", "title": "One", "height": 20.0 },
            { "id": "two", "title": "Two", "height": 20.0 }
        ]
    }"#;
    let spec: DocumentSpec = serde_json::from_str(json).unwrap();
    let (mut doc, host) = spec.build();
    let mut nav = InPageNav::new(&mut doc, host, None).unwrap();

    assert_eq!(nav.headings().len(), 2);
    nav.handle_scroll(&mut doc, nav.headings()[1].position, 8.0);
    assert_eq!(nav.active_heading(), Some("two"));
}
