//! Rule-based semantic classifier
//!
//! Classification is a fixed, ordered list of `(label, predicate)` rules.
//! The first predicate that matches decides the label, so the order of
//! [`RULES`] is part of the contract: a heading containing only a `<code>`
//! child is still a HEADER, an `<a class="btn">` is a BUTTON and never a
//! LINK, and so on.

use super::element::{ElementFacade, ElementTree};
use super::errors::SegmentResult;
use super::label::Label;
use crate::utils::MIN_IMAGE_AREA;

const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];
const LIST_TAGS: &[&str] = &["table", "ul", "ol", "dl"];
const INPUT_TAGS: &[&str] = &["input", "select", "option", "textarea"];
const TEXT_TAGS: &[&str] = &["p", "span", "abbr", "label", "div", "li"];
const LINKED_TEXT_TAGS: &[&str] = &["p", "span", "abbr", "address"];
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "png", "gif", "jpeg", "webp"];

/// One entry of the rule chain
pub struct Rule {
    pub label: Label,
    pub matches: fn(&ElementFacade, f64) -> bool,
}

/// Rule chain in precedence order; the second argument is the image/icon area threshold
pub const RULES: &[Rule] = &[
    Rule {
        label: Label::Header,
        matches: is_header,
    },
    Rule {
        label: Label::Code,
        matches: is_code,
    },
    Rule {
        label: Label::Quote,
        matches: is_quote,
    },
    Rule {
        label: Label::List,
        matches: is_list,
    },
    Rule {
        label: Label::Button,
        matches: is_button,
    },
    Rule {
        label: Label::Link,
        matches: is_link,
    },
    Rule {
        label: Label::Input,
        matches: is_input,
    },
    Rule {
        label: Label::Text,
        matches: is_text,
    },
    Rule {
        label: Label::Image,
        matches: is_image,
    },
    Rule {
        label: Label::Icon,
        matches: is_icon,
    },
    Rule {
        label: Label::Custom,
        matches: is_custom,
    },
];

fn is_header(el: &ElementFacade, _: f64) -> bool {
    el.has_text && (el.is_tag(HEADING_TAGS) || el.is_parent_tag(HEADING_TAGS))
}

fn is_code(el: &ElementFacade, _: f64) -> bool {
    el.is_tag(&["pre", "code"])
}

fn is_quote(el: &ElementFacade, _: f64) -> bool {
    el.is_tag(&["blockquote"])
}

fn is_list(el: &ElementFacade, _: f64) -> bool {
    el.is_tag(LIST_TAGS)
}

fn has_button_class(el: &ElementFacade) -> bool {
    el.has_class("btn") || el.has_class("button")
}

fn is_button(el: &ElementFacade, _: f64) -> bool {
    let input_button = el.tag_name == "input" && el.input_type.as_deref() == Some("button");
    el.tag_name == "button"
        || el.role.as_deref() == Some("button")
        || input_button
        || (el.tag_name == "a" && has_button_class(el))
        || el.has_click_listener
}

fn is_link(el: &ElementFacade, _: f64) -> bool {
    (el.tag_name == "a" && !has_button_class(el))
        || (el.parent_tag_name == "a" && el.is_tag(LINKED_TEXT_TAGS))
        || el.tag_name == "cite"
}

fn is_input(el: &ElementFacade, _: f64) -> bool {
    el.is_tag(INPUT_TAGS)
}

fn is_text(el: &ElementFacade, _: f64) -> bool {
    el.has_text && el.is_tag(TEXT_TAGS)
}

fn is_image(el: &ElementFacade, min_image_area: f64) -> bool {
    if el.tag_name == "img" || (el.tag_name == "svg" && el.bbox.area() > min_image_area) {
        return true;
    }
    el.style
        .background_extension()
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

fn is_icon(el: &ElementFacade, min_image_area: f64) -> bool {
    if el.tag_name == "kbd" || (el.tag_name == "svg" && el.bbox.area() <= min_image_area) {
        return true;
    }
    el.style
        .background_extension()
        .is_some_and(|ext| ext == "svg" || ext.starts_with("data"))
}

fn is_custom(el: &ElementFacade, _: f64) -> bool {
    el.is_custom_element
}

/// Maps element facades to labels
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    min_image_area: f64,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(MIN_IMAGE_AREA)
    }
}

impl Classifier {
    #[must_use]
    pub fn new(min_image_area: f64) -> Self {
        Self { min_image_area }
    }

    #[must_use]
    pub fn min_image_area(&self) -> f64 {
        self.min_image_area
    }

    /// Label for an already-inspected element
    #[must_use]
    pub fn classify(&self, el: &ElementFacade) -> Label {
        RULES
            .iter()
            .find(|rule| (rule.matches)(el, self.min_image_area))
            .map(|rule| rule.label)
            .or_else(|| Label::from_fallback_tag(&el.tag_name))
            .unwrap_or(Label::Unknown)
    }

    /// Inspect and classify `node`
    ///
    /// # Errors
    ///
    /// Fails if the node has no parent element.
    pub fn classify_node<T: ElementTree>(&self, tree: &T, node: &T::Node) -> SegmentResult<Label> {
        let facade = ElementFacade::inspect(tree, node)?;
        Ok(self.classify(&facade))
    }
}
