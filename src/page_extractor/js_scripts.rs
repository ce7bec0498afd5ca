//! JavaScript evaluation scripts
//!
//! This module contains the JavaScript code used to capture the rendered
//! element tree of a page.

/// JavaScript script to capture the document as a flat, pre-order node list
///
/// Boxes are converted to document coordinates. Click listeners can only be
/// introspected where `getEventListeners` exists (DevTools); elsewhere
/// `clickListener` is `null`.
pub const SNAPSHOT_SCRIPT: &str = r#"
    (() => {
        const nodes = [];
        const candidateTags = new Set();
        const canIntrospect = typeof window.getEventListeners === 'function';
        const described = ['aria-label', 'alt', 'role', 'onclick', 'href', 'type'];
        const stack = [[document.documentElement, null]];

        while (stack.length > 0) {
            const [node, parent] = stack.pop();
            const index = nodes.length;

            if (node.nodeType === Node.TEXT_NODE) {
                nodes.push({ parent, kind: 'text', text: node.textContent });
                continue;
            }
            if (node.nodeType !== Node.ELEMENT_NODE) {
                nodes.push({ parent, kind: 'other' });
                continue;
            }

            const tag = node.tagName.toLowerCase();
            if (tag.includes('-')) candidateTags.add(tag);

            const attributes = {};
            for (const name of described) {
                const value = node.getAttribute(name);
                if (value !== null) attributes[name] = value;
            }

            let clickListener = null;
            if (canIntrospect) {
                const listeners = window.getEventListeners(node);
                clickListener = !!(listeners && listeners.click && listeners.click.length);
            }

            const style = window.getComputedStyle(node);
            const opacity = parseFloat(style.opacity);
            const rect = node.getBoundingClientRect();

            nodes.push({
                parent,
                kind: 'element',
                tag,
                classes: Array.from(node.classList),
                attributes,
                style: {
                    visibility: style.visibility,
                    opacity: Number.isNaN(opacity) ? null : opacity,
                    backgroundImage: style.backgroundImage
                },
                visible: typeof node.checkVisibility === 'function' ? node.checkVisibility() : true,
                clickListener,
                rect: {
                    x: rect.x + window.scrollX,
                    y: rect.y + window.scrollY,
                    width: rect.width,
                    height: rect.height
                }
            });

            const children = node.childNodes;
            for (let i = children.length - 1; i >= 0; i--) {
                stack.push([children[i], index]);
            }
        }

        const customElements = Array.from(candidateTags)
            .filter(tag => window.customElements && window.customElements.get(tag) !== undefined);

        return { nodes, customElements };
    })()
"#;
