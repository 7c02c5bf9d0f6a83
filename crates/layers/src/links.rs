//! Plain list of download links, the non-map view of the manifest.

use catalog::{DownloadManifest, format_size};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRow {
    /// Bucket key; also used as the element id of the label.
    pub label: String,
    pub href: String,
    /// Value of the anchor's `download` attribute.
    pub download: String,
    pub text: String,
    /// Trailing text after the link.
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkList {
    pub rows: Vec<LinkRow>,
}

/// One row per manifest key, in manifest order.
pub fn build_link_list(manifest: &DownloadManifest) -> LinkList {
    let rows = manifest
        .iter()
        .map(|(bucket, entry)| LinkRow {
            label: bucket.to_string(),
            href: entry.url.clone(),
            download: entry.name.clone(),
            text: entry.name.clone(),
            description: format!(
                " ({}, last modified {})",
                format_size(entry.size),
                entry.date.iso()
            ),
        })
        .collect();
    LinkList { rows }
}

impl LinkList {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Static `<dl>` markup, for pages served without the map.
    pub fn to_html(&self) -> String {
        let mut out = String::from("<dl id=\"links\">\n");
        for row in &self.rows {
            out.push_str(&format!(
                "  <dt id=\"{id}\">{id}</dt>\n  <dd><a href=\"{href}\" download=\"{download}\">{text}</a>{desc}</dd>\n",
                id = escape_html(&row.label),
                href = escape_html(&row.href),
                download = escape_html(&row.download),
                text = escape_html(&row.text),
                desc = escape_html(&row.description),
            ));
        }
        out.push_str("</dl>\n");
        out
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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
