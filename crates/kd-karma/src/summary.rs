//! Chat summary rendering.

use std::fmt::Write;

use kd_dice::{ChangeEntry, DieDenomination};

use crate::error::{KarmaError, KarmaResult};
use crate::tables::{Resolver, label_for};

/// Fragment shown when a batch had no adjustments.
pub const NO_ADJUSTMENTS: &str = "<p>No Karmic adjustments were applied.</p>";

/// Render a list of adjustments as an HTML fragment.
///
/// Each item names the die and shows the original and adjusted faces by
/// their localized label (with the face image when the table has one).
pub fn render_summary(changes: &[ChangeEntry], resolver: &Resolver) -> KarmaResult<String> {
    if changes.is_empty() {
        return Ok(NO_ADJUSTMENTS.to_string());
    }

    let mut html = String::from(r#"<ul class="karmic-dice-changes">"#);
    for change in changes {
        write!(
            html,
            r#"<li><strong>{}</strong>: <span class="karmic-original">{}</span> &rarr; <span class="karmic-adjusted">{}</span></li>"#,
            escape_html(&label_for(&change.die_type)),
            render_face(resolver, &change.die_type, change.original_result)?,
            render_face(resolver, &change.die_type, change.adjusted_result)?,
        )
        .map_err(|e| KarmaError::Render(e.to_string()))?;
    }
    html.push_str("</ul>");
    Ok(html)
}

fn render_face(
    resolver: &Resolver,
    denomination: &DieDenomination,
    face: u32,
) -> KarmaResult<String> {
    let label = escape_html(&resolver.face_label(denomination, face)?);
    Ok(match resolver.face_image(denomination, face) {
        Some(image) => format!(
            r#"<img src="{}" alt="{label}" title="{label}" /> {label}"#,
            escape_html(image)
        ),
        None => label,
    })
}

/// Wrap a chat body with a collapsible adjustments section.
///
/// The original body is kept verbatim; a missing body becomes empty.
pub fn wrap_chat_content(original: Option<&str>, title: &str, summary_html: &str) -> String {
    format!(
        "<div class=\"karmic-dice-card\">\n{}\n<details class=\"karmic-dice-details\">\n<summary>{}</summary>\n{}\n</details>\n</div>",
        original.unwrap_or_default(),
        escape_html(title),
        summary_html
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::localize::PassthroughLocalizer;

    fn change(die: &str, original: u32, adjusted: u32) -> ChangeEntry {
        ChangeEntry {
            die_type: DieDenomination::from_tag(die),
            original_result: original,
            adjusted_result: adjusted,
        }
    }

    #[test]
    fn empty_summary() {
        let html = render_summary(&[], &Resolver::standard()).unwrap();
        assert_eq!(html, NO_ADJUSTMENTS);
    }

    #[test]
    fn one_item_per_change() {
        let changes = [change("b", 1, 3), change("s", 5, 1), change("p", 2, 12)];
        let html = render_summary(&changes, &Resolver::standard()).unwrap();
        assert!(html.starts_with(r#"<ul class="karmic-dice-changes">"#));
        assert_eq!(html.matches("<li>").count(), 3);
        assert!(html.contains("<strong>Boost</strong>"));
        assert!(html.contains("<strong>Setback</strong>"));
        assert!(html.contains("Triumph</span>"));
        assert!(html.contains(r#"<img src="icons/karmic-dice/boost-blank.png" alt="Blank" title="Blank" /> Blank"#));
        assert!(html.contains("&rarr;"));
    }

    #[test]
    fn labels_fall_back_to_face_number() {
        let resolver = Resolver::without_registry(Arc::new(PassthroughLocalizer));
        let html = render_summary(&[change("x", 3, 5)], &resolver).unwrap();
        assert_eq!(
            html,
            r#"<ul class="karmic-dice-changes"><li><strong>x</strong>: <span class="karmic-original">Face 3</span> &rarr; <span class="karmic-adjusted">Face 5</span></li></ul>"#
        );
    }

    #[test]
    fn wrap_preserves_original() {
        let body = r#"<div class="roll">3 successes</div>"#;
        let wrapped = wrap_chat_content(Some(body), "Karmic Dice Adjustments", NO_ADJUSTMENTS);
        assert!(wrapped.starts_with(r#"<div class="karmic-dice-card">"#));
        assert!(wrapped.contains(body));
        assert!(wrapped.contains("<summary>Karmic Dice Adjustments</summary>"));
        assert!(wrapped.ends_with("</details>\n</div>"));
    }

    #[test]
    fn wrap_missing_body() {
        let wrapped = wrap_chat_content(None, "T", "<p>x</p>");
        assert!(wrapped.starts_with("<div class=\"karmic-dice-card\">\n\n<details"));
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }
}
