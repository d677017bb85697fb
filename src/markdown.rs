//! Description Markdown
//!
//! Renders task descriptions with pulldown-cmark:
//! - raw HTML in the source is shown as text, never injected
//! - relative image/link targets (uploads) resolve against the API origin
//! - link targets outside http, https and mailto (and `#` anchors) become `#`
//! - images are constrained to the description width

use pulldown_cmark::{html::push_html, CowStr, Event, Options, Parser, Tag, TagEnd};
use url::Url;

fn options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

const LINK_SCHEMES: &[&str] = &["http", "https", "mailto"];
const IMAGE_SCHEMES: &[&str] = &["http", "https"];

/// Markdown to HTML. `resolve` maps relative URLs to absolute ones.
pub fn render_description(text: &str, resolve: impl Fn(&str) -> String) -> String {
    let mut in_image = 0usize;
    let mut events = Vec::new();

    for event in Parser::new_ext(text, options()) {
        if in_image > 0 {
            // alt text of an image already emitted
            match event {
                Event::Start(_) => in_image += 1,
                Event::End(_) => in_image -= 1,
                _ => {}
            }
            continue;
        }
        match event {
            Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),
            Event::Start(Tag::Image { dest_url, .. }) => {
                let html = format!(
                    r#"<img src="{}" class="description-image" />"#,
                    escape_attr(&safe_target(&dest_url, IMAGE_SCHEMES, &resolve))
                );
                events.push(Event::Html(CowStr::from(html)));
                in_image = 1;
            }
            Event::Start(Tag::Link { link_type, dest_url, title, id }) => {
                let dest_url = CowStr::from(safe_target(&dest_url, LINK_SCHEMES, &resolve));
                events.push(Event::Start(Tag::Link { link_type, dest_url, title, id }));
            }
            other => events.push(other),
        }
    }

    let mut html = String::new();
    push_html(&mut html, events.into_iter());
    html
}

/// Plain one-line preview for cards
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let mut plain = String::new();
    for event in Parser::new_ext(text, options()) {
        match event {
            Event::Text(t) | Event::Code(t) => plain.push_str(&t),
            Event::SoftBreak | Event::HardBreak | Event::End(TagEnd::Paragraph | TagEnd::Heading(_)) => plain.push(' '),
            _ => {}
        }
    }
    let plain = plain.split_whitespace().collect::<Vec<_>>().join(" ");
    if plain.chars().count() <= max_chars {
        return plain;
    }
    let cut: String = plain.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}

/// Parse `target`, resolving it first when it has no scheme, and keep it only
/// if the scheme is in `allowed`.
fn safe_target(target: &str, allowed: &[&str], resolve: &impl Fn(&str) -> String) -> String {
    let target = target.trim();
    if target.starts_with('#') {
        return target.to_string();
    }
    let parsed = match Url::parse(target) {
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(&resolve(target)),
        other => other,
    };
    match parsed {
        Ok(url) if allowed.contains(&url.scheme()) => url.into(),
        Ok(url) => {
            log::debug!("[MARKDOWN] dropped {} link target", url.scheme());
            "#".to_string()
        }
        Err(_) => "#".to_string(),
    }
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;").replace('"', "&quot;").replace('<', "&lt;").replace('>', "&gt;")
}
