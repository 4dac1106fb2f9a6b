//! Structured rich text as delivered by the content repository
//!
//! A rich-text value is a list of blocks (paragraphs, headings, list items,
//! images, embeds). Each text block carries inline spans addressed by
//! character offsets into the block text.

use serde::{Deserialize, Deserializer, Serialize};

use crate::helpers::{html_escape, LinkResolver};

/// A rich-text field
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RichText(pub Vec<RichTextBlock>);

impl<'de> Deserialize<'de> for RichText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Unset fields come back as `null`
        let blocks = Option::<Vec<RichTextBlock>>::deserialize(deserializer)?;
        Ok(RichText(blocks.unwrap_or_default()))
    }
}

/// One block of rich text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextBlock {
    #[serde(rename = "type")]
    pub kind: BlockKind,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub spans: Vec<Span>,

    /// Image source, for `image` blocks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    /// oEmbed payload, for `embed` blocks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oembed: Option<serde_json::Value>,
}

impl RichTextBlock {
    /// A paragraph without spans
    pub fn paragraph(text: &str) -> Self {
        Self::new(BlockKind::Paragraph, text)
    }

    pub fn new(kind: BlockKind, text: &str) -> Self {
        Self {
            kind,
            text: text.to_string(),
            spans: Vec::new(),
            url: None,
            alt: None,
            oembed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    #[serde(rename = "heading1")]
    Heading1,
    #[serde(rename = "heading2")]
    Heading2,
    #[serde(rename = "heading3")]
    Heading3,
    #[serde(rename = "heading4")]
    Heading4,
    #[serde(rename = "heading5")]
    Heading5,
    #[serde(rename = "heading6")]
    Heading6,
    #[serde(rename = "paragraph")]
    Paragraph,
    #[serde(rename = "preformatted")]
    Preformatted,
    #[serde(rename = "list-item")]
    ListItem,
    #[serde(rename = "o-list-item")]
    OrderedListItem,
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "embed")]
    Embed,
    #[serde(other)]
    Other,
}

/// Inline formatting over `[start, end)` of a block's text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub kind: SpanKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<SpanData>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
    Strong,
    Em,
    Hyperlink,
    Label,
    #[serde(other)]
    Other,
}

/// Payload of `hyperlink` and `label` spans
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpanData {
    pub link_type: Option<String>,
    pub url: Option<String>,
    pub uid: Option<String>,
    #[serde(rename = "type")]
    pub document_type: Option<String>,
    pub target: Option<String>,
    pub label: Option<String>,
}

impl RichText {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Plain text of every block, joined by a single space
    pub fn as_text(&self) -> String {
        self.0
            .iter()
            .map(|block| block.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Serialize to HTML
    pub fn render_html(&self, resolver: &LinkResolver) -> String {
        let mut out = String::new();
        let mut open_list: Option<&'static str> = None;

        for block in &self.0 {
            let list_tag = match block.kind {
                BlockKind::ListItem => Some("ul"),
                BlockKind::OrderedListItem => Some("ol"),
                _ => None,
            };

            if open_list != list_tag {
                if let Some(tag) = open_list {
                    out.push_str(&format!("</{}>", tag));
                }
                if let Some(tag) = list_tag {
                    out.push_str(&format!("<{}>", tag));
                }
                open_list = list_tag;
            }

            out.push_str(&render_block(block, resolver));
        }

        if let Some(tag) = open_list {
            out.push_str(&format!("</{}>", tag));
        }

        out
    }
}

fn render_block(block: &RichTextBlock, resolver: &LinkResolver) -> String {
    let inline = || render_inline(block, resolver);
    match block.kind {
        BlockKind::Heading1 => format!("<h1>{}</h1>", inline()),
        BlockKind::Heading2 => format!("<h2>{}</h2>", inline()),
        BlockKind::Heading3 => format!("<h3>{}</h3>", inline()),
        BlockKind::Heading4 => format!("<h4>{}</h4>", inline()),
        BlockKind::Heading5 => format!("<h5>{}</h5>", inline()),
        BlockKind::Heading6 => format!("<h6>{}</h6>", inline()),
        BlockKind::Paragraph => format!("<p>{}</p>", inline()),
        BlockKind::Preformatted => format!("<pre>{}</pre>", inline()),
        BlockKind::ListItem | BlockKind::OrderedListItem => format!("<li>{}</li>", inline()),
        BlockKind::Image => format!(
            r#"<p class="block-img"><img src="{}" alt="{}" /></p>"#,
            html_escape(block.url.as_deref().unwrap_or("")),
            html_escape(block.alt.as_deref().unwrap_or(""))
        ),
        BlockKind::Embed => render_embed(block),
        BlockKind::Other => String::new(),
    }
}

fn render_embed(block: &RichTextBlock) -> String {
    let Some(oembed) = &block.oembed else {
        return String::new();
    };
    let field = |name: &str| oembed.get(name).and_then(|v| v.as_str()).unwrap_or("");

    format!(
        r#"<div data-oembed="{}" data-oembed-type="{}" data-oembed-provider="{}">{}</div>"#,
        html_escape(field("embed_url")),
        html_escape(field("type")),
        html_escape(field("provider_name")),
        field("html")
    )
}

/// A span restricted to a sub-range of the text
#[derive(Clone, Copy)]
struct Clip<'a> {
    start: usize,
    end: usize,
    span: &'a Span,
}

fn render_inline(block: &RichTextBlock, resolver: &LinkResolver) -> String {
    let chars: Vec<char> = block.text.chars().collect();
    let len = chars.len();
    let clips = block
        .spans
        .iter()
        .map(|span| Clip {
            start: span.start.min(len),
            end: span.end.min(len),
            span,
        })
        .collect();
    serialize_range(&chars, 0, len, clips, resolver)
}

fn sort_clips(clips: &mut [Clip<'_>]) {
    // Outer spans first: earliest start, then longest
    clips.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
}

fn serialize_range(
    chars: &[char],
    start: usize,
    end: usize,
    mut clips: Vec<Clip<'_>>,
    resolver: &LinkResolver,
) -> String {
    sort_clips(&mut clips);

    let mut out = String::new();
    let mut pos = start;
    let mut pending = clips;

    while !pending.is_empty() {
        let clip = pending.remove(0);
        let s = clip.start.max(pos);
        let e = clip.end.min(end);
        if s >= e {
            continue;
        }

        push_text(&mut out, &chars[pos..s]);

        // Spans opening inside this one nest; a crossing span is split at `e`
        let mut inner = Vec::new();
        let mut rest = Vec::new();
        for other in pending.drain(..) {
            if other.start < e {
                if other.end > e {
                    inner.push(Clip { end: e, ..other });
                    rest.push(Clip { start: e, ..other });
                } else {
                    inner.push(other);
                }
            } else {
                rest.push(other);
            }
        }

        let body = serialize_range(chars, s, e, inner, resolver);
        out.push_str(&wrap_span(clip.span, &body, resolver));

        pos = e;
        sort_clips(&mut rest);
        pending = rest;
    }

    push_text(&mut out, &chars[pos..end]);
    out
}

fn push_text(out: &mut String, chars: &[char]) {
    let text: String = chars.iter().collect();
    out.push_str(&html_escape(&text).replace('\n', "<br />"));
}

fn wrap_span(span: &Span, body: &str, resolver: &LinkResolver) -> String {
    match span.kind {
        SpanKind::Strong => format!("<strong>{}</strong>", body),
        SpanKind::Em => format!("<em>{}</em>", body),
        SpanKind::Label => {
            let label = span
                .data
                .as_ref()
                .and_then(|d| d.label.as_deref())
                .unwrap_or("");
            format!(r#"<span class="{}">{}</span>"#, html_escape(label), body)
        }
        SpanKind::Hyperlink => match &span.data {
            Some(data) => {
                let href = link_href(data, resolver);
                let target = data
                    .target
                    .as_deref()
                    .map(|t| format!(r#" target="{}" rel="noopener""#, html_escape(t)))
                    .unwrap_or_default();
                format!(r#"<a href="{}"{}>{}</a>"#, html_escape(&href), target, body)
            }
            None => body.to_string(),
        },
        SpanKind::Other => body.to_string(),
    }
}

fn link_href(data: &SpanData, resolver: &LinkResolver) -> String {
    match data.link_type.as_deref() {
        Some("Document") => resolver.resolve(
            data.document_type.as_deref().unwrap_or(""),
            data.uid.as_deref().unwrap_or(""),
        ),
        _ => data.url.clone().unwrap_or_default(),
    }
}
