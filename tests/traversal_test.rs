//! Traversal rules: pruning, leaf detection, composite descent

use kodegen_tools_segmenter::segmenter::{Label, SegmentError};
use kodegen_tools_segmenter::{RawNode, SegmentConfig, Segmenter, SnapshotBuilder};

mod common;
use common::{PageFixture, flatten, segment};

#[test]
fn test_pruned_subtrees_emit_nothing() {
    common::init_logging();
    let mut page = PageFixture::new(2000.0);
    let body = page.body;

    let script = page.add(body, RawNode::element("script").rect(0.0, 0.0, 0.0, 0.0));
    page.text(script, "window.analytics = {}");

    let strong = page.add(body, RawNode::element("strong").rect(0.0, 10.0, 80.0, 20.0));
    let inside_strong = page.text_element(
        strong,
        RawNode::element("span").rect(0.0, 10.0, 40.0, 20.0),
        "bold",
    );

    let hidden = page.add(
        body,
        RawNode::element("div")
            .rect(0.0, 40.0, 300.0, 50.0)
            .visibility("hidden"),
    );
    let inside_hidden = page.text_element(
        hidden,
        RawNode::element("p").rect(0.0, 40.0, 300.0, 20.0),
        "hidden",
    );

    let transparent = page.add(
        body,
        RawNode::element("div")
            .rect(0.0, 100.0, 300.0, 50.0)
            .opacity(0.0),
    );
    let inside_transparent = page.text_element(
        transparent,
        RawNode::element("span").rect(0.0, 100.0, 300.0, 20.0),
        "transparent",
    );

    let collapsed = page.add(
        body,
        RawNode::element("div")
            .rect(0.0, 160.0, 300.0, 50.0)
            .not_rendered(),
    );
    page.text_element(collapsed, RawNode::element("p").rect(0.0, 160.0, 300.0, 20.0), "collapsed");

    let visible = page.text_element(
        body,
        RawNode::element("p").rect(0.0, 300.0, 300.0, 20.0),
        "visible",
    );

    let (snapshot, body) = page.build();
    let regions = flatten(&segment(&snapshot, body, SegmentConfig::default()));

    let nodes: Vec<_> = regions.iter().map(|r| r.node).collect();
    assert_eq!(nodes, vec![visible]);
    for pruned in [
        script,
        strong,
        inside_strong,
        hidden,
        inside_hidden,
        transparent,
        inside_transparent,
        collapsed,
    ] {
        assert!(!nodes.contains(&pruned));
    }
}

#[test]
fn test_faint_but_visible_is_kept() {
    let mut page = PageFixture::new(720.0);
    let body = page.body;
    let faint = page.add(body, RawNode::element("div").rect(0.0, 0.0, 200.0, 40.0).opacity(0.05));
    let para = page.text_element(faint, RawNode::element("p").rect(0.0, 0.0, 200.0, 20.0), "faint");

    let (snapshot, body) = page.build();
    let regions = flatten(&segment(&snapshot, body, SegmentConfig::default()));
    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].node, para);
}

#[test]
fn test_composite_leaf_and_descendants_both_emit() {
    let mut page = PageFixture::new(720.0);
    let body = page.body;
    let list = page.add(body, RawNode::element("ul").rect(0.0, 100.0, 400.0, 60.0));
    let first = page.text_element(
        list,
        RawNode::element("li").rect(0.0, 100.0, 400.0, 30.0),
        "First",
    );
    let second = page.text_element(
        list,
        RawNode::element("li").rect(0.0, 130.0, 400.0, 30.0),
        "Second",
    );

    let (snapshot, body) = page.build();
    let regions = flatten(&segment(&snapshot, body, SegmentConfig::default()));

    let summary: Vec<_> = regions.iter().map(|r| (r.node, r.label)).collect();
    assert_eq!(
        summary,
        vec![(list, Label::List), (first, Label::Text), (second, Label::Text)]
    );
}

#[test]
fn test_paragraph_text_child_is_deduplicated() {
    let mut page = PageFixture::new(720.0);
    let body = page.body;
    // p is emitted as a composite leaf, then again for its own text node
    let para = page.text_element(
        body,
        RawNode::element("p").rect(8.0, 16.0, 600.0, 24.0),
        "Hello world",
    );

    let (snapshot, body) = page.build();
    let regions = flatten(&segment(&snapshot, body, SegmentConfig::default()));
    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].node, para);
    assert_eq!(regions[0].label, Label::Text);
}

#[test]
fn test_atomic_leaves_are_not_descended() {
    let mut page = PageFixture::new(720.0);
    let body = page.body;
    let pre = page.add(body, RawNode::element("pre").rect(0.0, 50.0, 600.0, 200.0));
    let code = page.text_element(
        pre,
        RawNode::element("code").rect(4.0, 54.0, 590.0, 190.0),
        "fn main() {}",
    );
    let svg = page.add(body, RawNode::element("svg").rect(0.0, 300.0, 24.0, 24.0));
    let path = page.add(svg, RawNode::element("path").rect(2.0, 302.0, 20.0, 20.0));

    let (snapshot, body) = page.build();
    let regions = flatten(&segment(&snapshot, body, SegmentConfig::default()));
    let nodes: Vec<_> = regions.iter().map(|r| r.node).collect();

    assert_eq!(nodes, vec![pre, svg]);
    assert!(!nodes.contains(&code));
    assert!(!nodes.contains(&path));
    assert_eq!(regions[0].label, Label::Code);
    assert_eq!(regions[1].label, Label::Icon);
}

#[test]
fn test_background_only_leaf_is_emitted() {
    let mut page = PageFixture::new(720.0);
    let body = page.body;
    let hero = page.add(
        body,
        RawNode::element("div")
            .rect(0.0, 0.0, 1280.0, 400.0)
            .background_image(r#"url("https://cdn.example.com/hero.jpg")"#),
    );
    // no background, no text: nothing to show
    page.add(body, RawNode::element("div").rect(0.0, 400.0, 1280.0, 10.0));

    let (snapshot, body) = page.build();
    let regions = flatten(&segment(&snapshot, body, SegmentConfig::default()));
    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].node, hero);
    assert_eq!(regions[0].label, Label::Image);
}

#[test]
fn test_text_leaf_with_background_emits_once_after_dedup() {
    let mut page = PageFixture::new(720.0);
    let body = page.body;
    page.text_element(
        body,
        RawNode::element("span")
            .rect(0.0, 0.0, 120.0, 20.0)
            .background_image("url(/icons/star.svg)"),
        "Starred",
    );

    let (snapshot, body) = page.build();
    let regions = flatten(&segment(&snapshot, body, SegmentConfig::default()));
    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].label, Label::Text);
}

#[test]
fn test_text_nodes_label_their_parent() {
    let mut page = PageFixture::new(720.0);
    let body = page.body;
    let div = page.add(body, RawNode::element("div").rect(0.0, 0.0, 500.0, 60.0));
    page.text(div, "Loose text ");
    page.add(div, RawNode::element("img").rect(0.0, 30.0, 30.0, 30.0).attr("alt", "avatar"));
    page.text(div, "   ");

    let (snapshot, body) = page.build();
    let regions = flatten(&segment(&snapshot, body, SegmentConfig::default()));
    let summary: Vec<_> = regions
        .iter()
        .map(|r| (r.node, r.label, r.description.as_str()))
        .collect();
    let img = summary[1].0;
    assert_eq!(summary, vec![(div, Label::Text, ""), (img, Label::Image, "avatar")]);
}

#[test]
fn test_missing_parent_aborts_run() {
    let mut builder = SnapshotBuilder::new();
    let html = builder.root(RawNode::element("html").rect(0.0, 0.0, 100.0, 100.0));
    builder.append_text(html, "orphan text");
    let snapshot = builder.build().unwrap();

    let result = Segmenter::default().segment(&snapshot, &html);
    match result {
        Err(SegmentError::MissingParent { tag }) => assert_eq!(tag, "html"),
        other => panic!("expected MissingParent, got {other:?}"),
    }
}

#[test]
fn test_handle_from_another_snapshot_yields_no_regions() {
    let mut page = PageFixture::new(720.0);
    let body = page.body;
    let para = page.text_element(body, RawNode::element("p").rect(0.0, 0.0, 200.0, 20.0), "x");

    let mut builder = SnapshotBuilder::new();
    builder.root(RawNode::element("html").rect(0.0, 0.0, 1280.0, 720.0));
    let other = builder.build().unwrap();

    let groups = Segmenter::default().segment(&other, &para).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups.region_count(), 0);
}
