//! Body slice rendering

use crate::content::{ImageCaptionSlice, QuoteSlice, Slice, TextSlice};
use crate::helpers::{html_escape, image_tag, LinkResolver};

/// Rendered markup of one slice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Position of the source slice in the body
    pub key: usize,
    pub html: String,
}

/// Render body slices in order
///
/// Slices of an unknown type produce no fragment; the remaining fragments
/// keep the index of their source slice as key.
pub fn render_slices(slices: &[Slice], resolver: &LinkResolver) -> Vec<Fragment> {
    slices
        .iter()
        .enumerate()
        .filter_map(|(index, slice)| {
            let inner = match slice {
                Slice::Text(slice) => text(slice, resolver),
                Slice::Quote(slice) => quote(slice),
                Slice::ImageWithCaption(slice) => image_caption(slice),
                Slice::Unknown => return None,
            };
            Some(Fragment {
                key: index,
                html: format!(r#"<div class="homepage-slice-wrapper">{}</div>"#, inner),
            })
        })
        .collect()
}

fn text(slice: &TextSlice, resolver: &LinkResolver) -> String {
    format!(
        r#"<div class="post-text container"><div>{}</div></div>"#,
        slice.primary.text.render_html(resolver)
    )
}

fn quote(slice: &QuoteSlice) -> String {
    format!(
        r#"<div class="post-quote container"><blockquote>{}</blockquote></div>"#,
        html_escape(&slice.primary.quote.as_text())
    )
}

fn image_caption(slice: &ImageCaptionSlice) -> String {
    let caption = slice.primary.caption.as_text();
    let image = slice.primary.image.as_ref();

    match slice.label.as_deref() {
        Some("image-full-width") => {
            let url = image.map(|i| i.url.as_str()).unwrap_or("");
            let label = if caption.is_empty() {
                String::new()
            } else {
                format!(r#"<span class="image-label">{}</span>"#, html_escape(&caption))
            };
            format!(
                r#"<div class="post-image full-width-image" style="background-image: url('{}')"><div class="wrapper">{}</div></div>"#,
                html_escape(url),
                label
            )
        }
        label => {
            let class = if label == Some("emphasized") {
                "block-img emphasized"
            } else {
                "block-img"
            };
            let img = image
                .map(|i| image_tag(&i.url, i.alt.as_deref()))
                .unwrap_or_default();
            let figcaption = if caption.is_empty() {
                String::new()
            } else {
                format!(
                    r#"<figcaption class="image-label">{}</figcaption>"#,
                    html_escape(&caption)
                )
            };
            format!(
                r#"<div class="post-image container"><figure class="{}">{}{}</figure></div>"#,
                class, img, figcaption
            )
        }
    }
}
