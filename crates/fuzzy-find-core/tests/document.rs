use fuzzy_find_core::{
    Document, Emphasis, Fragment, Inline, RegionId, RepositoryError, ScrollIntoView,
    SearchBoxConfig, SearchSurface, SegmentRepository,
};
use pretty_assertions::assert_eq;

fn mark_first_and_last(doc: &mut Document) -> Vec<RegionId> {
    let segment = doc.text_segments()[0];
    let text = doc.segment_text(segment).unwrap().to_string();
    let chars: Vec<char> = text.chars().collect();
    let last = chars.len() - 1;
    let middle: String = chars[1..last].iter().collect();
    doc.replace_segment(
        segment,
        vec![
            Fragment::Mark(chars[0]),
            Fragment::Text(middle),
            Fragment::Mark(chars[last]),
        ],
    )
    .unwrap()
}

#[test]
fn test_segments_follow_document_order() {
    let mut doc = Document::new();
    doc.push_block(vec![
        Inline::Text("one".into()),
        Inline::Opaque("image".into()),
        Inline::Text("two".into()),
    ]);
    doc.push_block(vec![Inline::Text("three".into())]);

    let texts: Vec<String> = doc
        .text_segments()
        .into_iter()
        .map(|s| doc.segment_text(s).unwrap().to_string())
        .collect();
    assert_eq!(texts, vec!["one", "two", "three"]);
}

#[test]
fn test_replace_segment_rejects_non_text() {
    let mut doc = Document::new();
    doc.push_block(vec![Inline::LineBreak, Inline::Text("x".into())]);
    let line_break = fuzzy_find_core::SegmentId(0);

    let err = doc
        .replace_segment(line_break, vec![Fragment::Mark('x')])
        .unwrap_err();
    assert_eq!(err, RepositoryError::NotText(line_break));
    assert_eq!(doc.mark_count(), 0);
}

#[test]
fn test_revert_marks_restores_single_segment() {
    let mut doc = Document::from_text("hello");
    let regions = mark_first_and_last(&mut doc);
    assert_eq!(regions.len(), 2);
    assert_eq!(doc.text_segments().len(), 1);

    assert_eq!(doc.revert_marks(), 2);

    assert_eq!(doc.mark_count(), 0);
    let segments = doc.text_segments();
    assert_eq!(segments.len(), 1);
    assert_eq!(doc.segment_text(segments[0]).unwrap(), "hello");
    // Old regions no longer resolve.
    assert_eq!(doc.emphasis_of(regions[0]), None);
}

#[test]
fn test_revert_marks_is_idempotent() {
    let mut doc = Document::from_text("hello\nworld\n\nagain");
    mark_first_and_last(&mut doc);
    doc.revert_marks();
    let text = doc.text();
    let nodes = doc.node_count();

    assert_eq!(doc.revert_marks(), 0);
    assert_eq!(doc.text(), text);
    assert_eq!(doc.node_count(), nodes);

    let mut plain = Document::from_text("never marked");
    assert_eq!(plain.revert_marks(), 0);
    assert_eq!(plain.text(), "never marked");
}

#[test]
fn test_emphasis_and_scroll() {
    let mut doc = Document::from_text("abc");
    let regions = mark_first_and_last(&mut doc);

    doc.set_emphasis(regions[1], Emphasis::Active);
    doc.scroll_into_view(regions[1], ScrollIntoView::CENTERED);

    assert_eq!(doc.emphasis_of(regions[0]), Some(Emphasis::Inactive));
    assert_eq!(doc.emphasis_of(regions[1]), Some(Emphasis::Active));
    assert_eq!(doc.last_scroll(), Some((regions[1], ScrollIntoView::CENTERED)));

    // Unknown regions are ignored.
    doc.scroll_into_view(RegionId(9999), ScrollIntoView::CENTERED);
    assert_eq!(doc.scrolled_to(), Some(regions[1]));
}

#[test]
fn test_search_box_lifecycle() {
    let mut doc = Document::new();
    assert!(!doc.has_search_box());

    doc.create_search_box(&SearchBoxConfig::default());
    assert_eq!(doc.search_box().map(|b| b.focused), Some(false));
    doc.focus_search_box();
    assert_eq!(doc.search_box().map(|b| b.focused), Some(true));

    doc.remove_search_box();
    assert!(doc.search_box().is_none());
}

#[test]
fn test_render_lines_and_region_lookup() {
    let mut doc = Document::from_text("first\nsecond\n\nthird");
    let third = doc.text_segments()[2];
    let regions = doc
        .replace_segment(
            third,
            vec![Fragment::Text("thi".into()), Fragment::Mark('r'), Fragment::Text("d".into())],
        )
        .unwrap();

    let lines = doc.render_lines();
    let texts: Vec<String> = lines.iter().map(|l| l.text()).collect();
    assert_eq!(texts, vec!["first", "second", "", "third"]);
    assert_eq!(lines[3].runs.len(), 3);
    assert_eq!(lines[3].runs[1].emphasis, Some(Emphasis::Inactive));
    assert_eq!(doc.line_of_region(regions[0]), Some(3));
}

#[test]
fn test_lookups_follow_nodes_shifted_by_replacement() {
    let mut doc = Document::new();
    doc.push_block(vec![
        Inline::Text("abc".into()),
        Inline::Opaque("image".into()),
        Inline::Text("xyz".into()),
    ]);
    let segments = doc.text_segments();

    let first = doc
        .replace_segment(
            segments[0],
            vec![
                Fragment::Mark('a'),
                Fragment::Mark('b'),
                Fragment::Mark('c'),
            ],
        )
        .unwrap();
    // The second segment moved two slots right but is still found by id.
    assert_eq!(doc.segment_text(segments[1]).unwrap(), "xyz");

    let second = doc
        .replace_segment(
            segments[1],
            vec![Fragment::Text("x".into()), Fragment::Mark('y'), Fragment::Text("z".into())],
        )
        .unwrap();
    assert_eq!(doc.region_char(first[2]), Some('c'));
    assert_eq!(doc.region_char(second[0]), Some('y'));

    doc.set_emphasis(second[0], Emphasis::Active);
    assert_eq!(doc.emphasis_of(second[0]), Some(Emphasis::Active));
    assert_eq!(doc.emphasis_of(first[0]), Some(Emphasis::Inactive));

    assert_eq!(doc.revert_marks(), 4);
    assert_eq!(doc.region_char(second[0]), None);
    let texts: Vec<String> = doc
        .text_segments()
        .into_iter()
        .map(|s| doc.segment_text(s).unwrap().to_string())
        .collect();
    assert_eq!(texts, vec!["abc", "xyz"]);
}
