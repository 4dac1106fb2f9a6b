//! Blog post documents and their body slices

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::RichText;

/// A blog post as returned by the content repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "_meta")]
    pub meta: Meta,

    #[serde(default)]
    pub title: RichText,

    /// Publication date
    #[serde(default)]
    pub date: Option<NaiveDate>,

    /// Body slices, in display order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: Vec<Slice>,
}

/// Repository metadata of a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    /// Repository-wide unique identifier
    pub id: String,

    /// URL-friendly identifier
    #[serde(default)]
    pub uid: Option<String>,

    #[serde(rename = "type", default = "default_document_type")]
    pub document_type: String,
}

fn default_document_type() -> String {
    "post".to_string()
}

impl Document {
    /// Create an empty post
    pub fn new(id: &str, uid: &str) -> Self {
        Self {
            meta: Meta {
                id: id.to_string(),
                uid: Some(uid.to_string()),
                document_type: default_document_type(),
            },
            title: RichText::default(),
            date: None,
            body: Vec::new(),
        }
    }

    pub fn uid(&self) -> Option<&str> {
        self.meta.uid.as_deref().filter(|uid| !uid.is_empty())
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// One typed unit of post body content
///
/// The `type` tag selects the variant. Slices whose tag is missing, not a
/// string, or one this site has no renderer for deserialize to
/// [`Slice::Unknown`], as do known slices with a malformed payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Slice {
    #[serde(rename = "text")]
    Text(TextSlice),
    #[serde(rename = "quote")]
    Quote(QuoteSlice),
    #[serde(rename = "image_with_caption")]
    ImageWithCaption(ImageCaptionSlice),
    Unknown,
}

impl<'de> Deserialize<'de> for Slice {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Slice::from_value(value))
    }
}

impl Slice {
    /// Decode one body slice; never fails
    pub fn from_value(value: serde_json::Value) -> Self {
        // Slices outside the queried fragments only carry `__typename`
        let tag = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned);

        let parsed = match tag.as_deref() {
            Some("text") => serde_json::from_value(value).map(Slice::Text),
            Some("quote") => serde_json::from_value(value).map(Slice::Quote),
            Some("image_with_caption") => {
                serde_json::from_value(value).map(Slice::ImageWithCaption)
            }
            _ => return Slice::Unknown,
        };

        parsed.unwrap_or_else(|e| {
            tracing::debug!("Malformed {:?} slice: {}", tag, e);
            Slice::Unknown
        })
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextSlice {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub primary: TextPrimary,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextPrimary {
    #[serde(default)]
    pub text: RichText,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteSlice {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub primary: QuotePrimary,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuotePrimary {
    #[serde(default)]
    pub quote: RichText,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageCaptionSlice {
    /// Display variant: `image-full-width`, `emphasized`, or none
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub primary: ImageCaptionPrimary,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageCaptionPrimary {
    #[serde(default)]
    pub image: Option<ImageField>,
    #[serde(default)]
    pub caption: RichText,
}

/// An image asset reference
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageField {
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_document() {
        let doc: Document = serde_json::from_value(json!({
            "_meta": { "id": "XJ9cxhAAAB8A", "uid": "first-post", "type": "post" },
            "title": [{ "type": "heading1", "text": "First post", "spans": [] }],
            "date": "2019-03-04",
            "body": [
                {
                    "__typename": "PRISMIC_PostBodyText",
                    "type": "text",
                    "label": null,
                    "primary": { "text": [{ "type": "paragraph", "text": "Hello", "spans": [] }] }
                },
                {
                    "__typename": "PRISMIC_PostBodyQuote",
                    "type": "quote",
                    "label": null,
                    "primary": { "quote": [{ "type": "paragraph", "text": "Carpe diem", "spans": [] }] }
                },
                {
                    "__typename": "PRISMIC_PostBodyImage_with_caption",
                    "type": "image_with_caption",
                    "label": "emphasized",
                    "primary": {
                        "image": { "url": "https://images.example.com/a.png", "alt": "A",
                                   "dimensions": { "width": 800, "height": 600 } },
                        "caption": null
                    }
                }
            ]
        }))
        .unwrap();

        assert_eq!(doc.meta.id, "XJ9cxhAAAB8A");
        assert_eq!(doc.uid(), Some("first-post"));
        assert_eq!(doc.date, NaiveDate::from_ymd_opt(2019, 3, 4));
        assert_eq!(doc.body.len(), 3);
        assert!(matches!(doc.body[0], Slice::Text(_)));
        assert!(matches!(doc.body[1], Slice::Quote(_)));
        match &doc.body[2] {
            Slice::ImageWithCaption(slice) => {
                assert_eq!(slice.label.as_deref(), Some("emphasized"));
                let image = slice.primary.image.as_ref().unwrap();
                assert_eq!(image.dimensions.unwrap().width, 800);
                assert!(slice.primary.caption.is_empty());
            }
            other => panic!("unexpected slice {:?}", other),
        }
    }

    #[test]
    fn test_unknown_slice_type() {
        let doc: Document = serde_json::from_value(json!({
            "_meta": { "id": "abc123" },
            "title": [],
            "body": [
                { "type": "video_embed", "primary": { "url": "https://video.example.com" } },
                { "type": "text", "primary": { "text": [] } }
            ]
        }))
        .unwrap();

        assert_eq!(doc.body[0], Slice::Unknown);
        assert!(matches!(doc.body[1], Slice::Text(_)));
    }

    #[test]
    fn test_slice_without_type_tag() {
        let doc: Document = serde_json::from_value(json!({
            "_meta": { "id": "abc123", "uid": "abc", "type": "post" },
            "title": [],
            "body": [
                { "__typename": "PRISMIC_PostBodyVideo" },
                { "__typename": "PRISMIC_PostBodyText", "type": "text",
                  "primary": { "text": [{ "type": "paragraph", "text": "Hello", "spans": [] }] } },
                { "type": null },
                { "type": 42, "primary": {} }
            ]
        }))
        .unwrap();

        assert_eq!(doc.body.len(), 4);
        assert_eq!(doc.body[0], Slice::Unknown);
        assert!(matches!(doc.body[1], Slice::Text(_)));
        assert_eq!(doc.body[2], Slice::Unknown);
        assert_eq!(doc.body[3], Slice::Unknown);

        let resolver = crate::helpers::LinkResolver::new("/", "blog/:uid/");
        let fragments = crate::render::render_slices(&doc.body, &resolver);
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].key, 1);
        assert!(fragments[0].html.contains("<p>Hello</p>"));
    }

    #[test]
    fn test_missing_or_null_primary() {
        let doc: Document = serde_json::from_value(json!({
            "_meta": { "id": "abc123" },
            "body": [
                { "type": "text" },
                { "type": "quote", "primary": null },
                { "type": "image_with_caption", "primary": { "image": "not an object" } },
                { "type": "text", "primary": { "text": [{ "type": "paragraph", "text": "kept", "spans": [] }] } }
            ]
        }))
        .unwrap();

        assert_eq!(doc.body[0], Slice::Text(TextSlice::default()));
        assert_eq!(doc.body[1], Slice::Quote(QuoteSlice::default()));
        assert_eq!(doc.body[2], Slice::Unknown);
        assert!(matches!(&doc.body[3], Slice::Text(s) if s.primary.text.as_text() == "kept"));
    }

    #[test]
    fn test_missing_and_null_fields() {
        let doc: Document = serde_json::from_value(json!({
            "_meta": { "id": "abc123", "uid": "" },
            "title": null,
            "body": null
        }))
        .unwrap();

        assert!(doc.title.is_empty());
        assert!(doc.body.is_empty());
        assert_eq!(doc.date, None);
        assert_eq!(doc.uid(), None);
        assert_eq!(doc.meta.document_type, "post");
    }
}
