//! Enter/leave callbacks turning doctree nodes into GFM fragments.

use super::context::Context;
use super::types::{LinkTarget, ListKind, TableState};
use rst2gfm_core::{
    Element, Node, NodeKind, Visit, Visitor, fence_for, inline_delimiter, make_anchor,
    normalize_refname,
};

impl Visitor for Context<'_> {
    fn enter(&mut self, node: &Node) -> Visit {
        match node {
            Node::Text(text) => {
                self.push_text(text);
                Visit::Continue
            }
            Node::Element(element) => enter_element(element, self),
        }
    }

    fn leave(&mut self, node: &Node) {
        if let Node::Element(element) = node {
            leave_element(element, self);
        }
    }
}

/// Dispatches the enter callback for an element.
fn enter_element(element: &Element, ctx: &mut Context) -> Visit {
    match &element.kind {
        NodeKind::Document
        | NodeKind::Paragraph
        | NodeKind::DefinitionList
        | NodeKind::DefinitionListItem => {}
        NodeKind::Section => ctx.enter_section(),
        NodeKind::Title => return enter_title(element, ctx),
        NodeKind::Subtitle => {
            ctx.push_raw("## ");
            ctx.enter_section();
        }
        NodeKind::Emphasis => ctx.push_markup("*"),
        NodeKind::Strong => ctx.push_markup("**"),
        NodeKind::Literal => {
            let delimiter = inline_delimiter(&element.astext());
            ctx.push_markup(&delimiter.opening());
        }
        NodeKind::BulletList => enter_list(ListKind::Bullet, ctx),
        NodeKind::EnumeratedList => enter_list(ListKind::Enumerated, ctx),
        NodeKind::ListItem => enter_list_item(ctx),
        NodeKind::Reference => {
            render_reference(element, ctx);
            return Visit::SkipChildren;
        }
        NodeKind::LiteralBlock => enter_literal_block(element, ctx),
        NodeKind::Table => ctx.start_table(TableState::new(&element.attributes)),
        NodeKind::Row => ctx.start_row(),
        NodeKind::Entry => {
            let morecols = element.attributes.get_usize("morecols").unwrap_or(0);
            let morerows = element.attributes.get_usize("morerows").unwrap_or(0);
            ctx.start_cell(morecols, morerows);
        }
        NodeKind::Transition => ctx.push_raw("\n---\n\n"),
        NodeKind::Image => {
            render_image(element, ctx);
            return Visit::SkipChildren;
        }
        NodeKind::BlockQuote => ctx.push_raw("\n> "),
        NodeKind::Term => ctx.push_raw("\n**"),
        NodeKind::Definition => ctx.push_raw(": "),
        NodeKind::Target => render_target(element, ctx),
        NodeKind::SubstitutionDefinition | NodeKind::Comment | NodeKind::SystemMessage => {
            return Visit::SkipChildren;
        }
        NodeKind::Other(tag) => {
            log::debug!("no markdown form for `{}`; rendering its content only", tag);
        }
    }
    Visit::Continue
}

/// Dispatches the leave callback for an element.
fn leave_element(element: &Element, ctx: &mut Context) {
    match &element.kind {
        NodeKind::Section => ctx.exit_section(),
        NodeKind::Title => {
            // Table titles were captured as captions on enter
            if !ctx.is_in_table() {
                ctx.push_raw("\n\n");
            }
        }
        NodeKind::Subtitle | NodeKind::Paragraph | NodeKind::BlockQuote => ctx.push_raw("\n\n"),
        NodeKind::Emphasis => ctx.push_markup("*"),
        NodeKind::Strong => ctx.push_markup("**"),
        NodeKind::Literal => {
            let delimiter = inline_delimiter(&element.astext());
            ctx.push_markup(&delimiter.closing());
        }
        NodeKind::BulletList | NodeKind::EnumeratedList => {
            ctx.exit_list();
            ctx.push_raw("\n");
        }
        NodeKind::LiteralBlock => {
            if let Some(fence) = ctx.exit_code_block() {
                ctx.push_raw(&format!("\n{}\n\n", fence));
            }
        }
        NodeKind::Table => ctx.finish_table(),
        NodeKind::Row => ctx.finish_row(),
        NodeKind::Entry => ctx.finish_cell(),
        NodeKind::DefinitionList => ctx.push_raw("\n"),
        NodeKind::Term => ctx.push_raw("**\n"),
        NodeKind::Definition => ctx.push_raw("\n"),
        _ => {}
    }
}

/// Emits a heading marker, or captures the title as a table caption.
fn enter_title(element: &Element, ctx: &mut Context) -> Visit {
    if ctx.is_in_table() {
        ctx.set_caption(element.astext());
        return Visit::SkipChildren;
    }

    let hashes = "#".repeat(ctx.section_level() + 1);
    ctx.push_raw(&format!("{} ", hashes));
    Visit::Continue
}

/// Pushes a list; nested lists start on a fresh line.
fn enter_list(kind: ListKind, ctx: &mut Context) {
    ctx.enter_list(kind);
    if ctx.list_depth() > 1 {
        ctx.push_raw("\n");
    }
}

/// Emits the line start, indentation, and marker of a list item.
fn enter_list_item(ctx: &mut Context) {
    // A stray list item outside any list degrades to a bullet
    let kind = ctx.current_list().unwrap_or(ListKind::Bullet);
    let indent = ctx.list_indent();
    ctx.push_raw(&format!("\n{}{}", indent, kind.marker()));
}

/// Opens a fenced code block.
///
/// The language comes from the `language` attribute, else from the first
/// class other than the generic `code` class.
fn enter_literal_block(element: &Element, ctx: &mut Context) {
    let attributes = &element.attributes;
    let language = attributes
        .get_str("language")
        .or_else(|| {
            attributes
                .get_list("classes")
                .into_iter()
                .find(|class| *class != "code")
        })
        .unwrap_or("");

    let fence = fence_for(&element.astext());
    ctx.push_raw(&format!("\n{}{}\n", fence, language));
    ctx.enter_code_block(fence);
}

/// Renders a reference as a Markdown link.
///
/// The visible text is the reference's plain text, so markup nested inside
/// the reference never reaches the link label; children are skipped.
fn render_reference(element: &Element, ctx: &mut Context) {
    let text = element.astext();

    // Link syntax would show up verbatim inside a fence
    if ctx.is_in_code_block() {
        ctx.push_text(&text);
        return;
    }

    ctx.push_raw("[");
    ctx.push_text(&text);

    match LinkTarget::from_attributes(&element.attributes) {
        LinkTarget::Uri(uri) => ctx.push_raw(&format!("]({})", uri)),
        LinkTarget::Internal(id) => ctx.push_raw(&format!("](#{})", make_anchor(id))),
        LinkTarget::Named(name) => {
            let label = normalize_refname(name);
            ctx.push_raw(&format!("][{}]", label));
            // Inside a table entry only the text survives; no definition needed
            if !ctx.is_in_cell() {
                ctx.queue_reference(label, name.to_string());
            }
        }
        LinkTarget::Unknown => ctx.push_raw("]"),
    }
}

/// Renders an image as `![alt](uri)`.
fn render_image(element: &Element, ctx: &mut Context) {
    let alt = element.attributes.get_str("alt").unwrap_or("");
    let uri = element.attributes.get_str("uri").unwrap_or("");
    ctx.push_raw(&format!("![{}]({})", alt, uri));
}

/// Handles a hyperlink target.
///
/// Id targets become inline anchors; URI targets feed the reference map used
/// to resolve named references at document end.
fn render_target(element: &Element, ctx: &mut Context) {
    let attributes = &element.attributes;
    if let Some(id) = attributes.get_str("refid") {
        if ctx.options().anchor_targets {
            ctx.push_raw(&format!("<a id=\"{}\"></a>", make_anchor(id)));
        }
    } else if let Some(uri) = attributes.get_str("refuri") {
        if let Some(name) = attributes.get_list("names").first() {
            ctx.register_target(name, uri);
        }
    }
}
