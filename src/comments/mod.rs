//! Embedded Disqus comment threads

use serde::Serialize;

use crate::config::DisqusConfig;
use crate::helpers::{html_escape, js_string_escape};

/// Parameters that identify and label one comment thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentThreadConfig {
    /// Canonical page address, the thread's unique key
    pub url: String,
    pub identifier: String,
    pub title: String,
}

/// Disqus widget markup for one forum
#[derive(Debug, Clone)]
pub struct Disqus {
    shortname: String,
}

impl Disqus {
    pub fn new(config: &DisqusConfig) -> Self {
        Self {
            shortname: config.shortname.clone(),
        }
    }

    /// Full discussion thread
    pub fn embed(&self, config: &CommentThreadConfig) -> String {
        format!(
            r#"<div id="disqus_thread"></div>
<script>
var disqus_config = function () {{
  this.page.url = "{url}";
  this.page.identifier = "{identifier}";
  this.page.title = "{title}";
}};
(function () {{
  var d = document, s = d.createElement("script");
  s.src = "https://{shortname}.disqus.com/embed.js";
  s.setAttribute("data-timestamp", +new Date());
  (d.head || d.body).appendChild(s);
}})();
</script>"#,
            url = js_string_escape(&config.url),
            identifier = js_string_escape(&config.identifier),
            title = js_string_escape(&config.title),
            shortname = js_string_escape(&self.shortname),
        )
    }

    /// Count-only placeholder, filled in by the script from [`Disqus::count_script`]
    pub fn comment_count(&self, config: &CommentThreadConfig) -> String {
        format!(
            r#"<span class="disqus-comment-count" data-disqus-url="{}" data-disqus-identifier="{}">Comments</span>"#,
            html_escape(&config.url),
            html_escape(&config.identifier)
        )
    }

    /// Script that resolves every count placeholder on a page; include once
    pub fn count_script(&self) -> String {
        format!(
            r#"<script id="dsq-count-scr" src="https://{}.disqus.com/count.js" async></script>"#,
            html_escape(&self.shortname)
        )
    }
}
