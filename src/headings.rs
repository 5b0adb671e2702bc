use crate::document::{Document, NodeId, Selector};
use crate::error::NavError;
use itertools::Itertools;

/// A section heading the nav can link to: its element id and its vertical
/// offset from the top of the document.
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub id: String,
    pub position: f64,
}

/// Build the heading index: every element under `container` matching
/// `selector`, in ascending position order. Positions go stale whenever
/// layout may have changed, so this is recomputed on resize.
///
/// Zero matches is a configuration fault, not a runtime condition.
pub fn calculate_headings(
    doc: &Document,
    container: NodeId,
    selector: &Selector,
) -> Result<Vec<Heading>, NavError> {
    let headings: Vec<Heading> = doc
        .query(container, selector)
        .into_iter()
        .map(|el| Heading {
            id: doc.node(el).id.clone().unwrap_or_default(),
            position: doc.offset(el),
        })
        .sorted_by(|a, b| a.position.total_cmp(&b.position))
        .collect();

    if headings.is_empty() {
        return Err(NavError::NoHeadings {
            selector: selector.to_string(),
        });
    }

    Ok(headings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Node;
    use assert_matches::assert_matches;

    fn doc_with_headings(tops: &[f64]) -> Document {
        let mut doc = Document::new();
        let main = doc.add(doc.body(), Node::elem("main").with_top(5.0));
        for (i, top) in tops.iter().enumerate() {
            doc.add(
                main,
                Node::elem("h2")
                    .with_id(&format!("section-{}", i + 1))
                    .with_top(*top),
            );
        }
        doc
    }

    #[test]
    fn positions_are_document_offsets() {
        let doc = doc_with_headings(&[25.0, 83.0, 127.0]);
        let sel = Selector::parse("h2").unwrap();

        let headings = calculate_headings(&doc, doc.body(), &sel).unwrap();

        assert_eq!(
            headings,
            vec![
                Heading {
                    id: "section-1".into(),
                    position: 30.0
                },
                Heading {
                    id: "section-2".into(),
                    position: 88.0
                },
                Heading {
                    id: "section-3".into(),
                    position: 132.0
                },
            ]
        );
    }

    #[test]
    fn result_is_sorted_even_if_document_order_is_not() {
        let doc = doc_with_headings(&[120.0, 10.0, 60.0]);
        let sel = Selector::parse("h2").unwrap();

        let headings = calculate_headings(&doc, doc.body(), &sel).unwrap();
        let positions: Vec<f64> = headings.iter().map(|h| h.position).collect();
        assert_eq!(positions, vec![15.0, 65.0, 125.0]);
    }

    #[test]
    fn heading_without_an_id_keeps_an_empty_id() {
        let mut doc = Document::new();
        doc.add(doc.body(), Node::elem("h2").with_top(12.0));
        let sel = Selector::parse("h2").unwrap();

        let headings = calculate_headings(&doc, doc.body(), &sel).unwrap();
        assert_eq!(headings[0].id, "");
    }

    #[test]
    fn zero_matches_is_an_error() {
        let doc = doc_with_headings(&[10.0]);
        let sel = Selector::parse("h4").unwrap();

        assert_matches!(
            calculate_headings(&doc, doc.body(), &sel),
            Err(NavError::NoHeadings { selector }) if selector == "h4"
        );
    }
}
