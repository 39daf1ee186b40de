//! Server-rendered HTML for the listing page and its HTMX fragments.
//!
//! The browser drives every mutation through partial swaps: the table
//! fragment replaces `#content-table` after each operation, a single-row
//! update comes back as one `<tr>`, and error toasts arrive either as an
//! inline fragment or out-of-band through the `HX-Trigger` header.

use common::model::content::{ContentItem, ContentType};
use common::util::format::format_size;

/// Escapes text for interpolation into HTML.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// One table row. Swapped in place when the anonymize toggle changes.
pub fn content_row(item: &ContentItem) -> String {
    let id = escape(&item.id);
    let kind = item.kind.as_str();
    let status = item.status.as_str();
    let name = escape(&item.name);

    let name_cell = match &item.url {
        Some(url) => format!(
            r#"<a href="{}" target="_blank" rel="noopener">{}</a>"#,
            escape(url),
            name
        ),
        None => name,
    };
    let size_cell = match item.kind {
        ContentType::File => format_size(item.size),
        ContentType::Url => "-".to_string(),
    };
    let checked = if item.anonymize.unwrap_or(false) {
        " checked"
    } else {
        ""
    };

    format!(
        r##"<tr id="content-{id}">
  <td><span class="badge badge-{kind}">{kind}</span></td>
  <td class="content-name">{name_cell}</td>
  <td class="content-size">{size_cell}</td>
  <td><span class="status status-{status}">{status}</span></td>
  <td class="content-anonymize">
    <input type="checkbox" name="anonymize" value="true"{checked}
      hx-put="/api/content/{id}/anonymize" hx-trigger="change"
      hx-target="closest tr" hx-swap="outerHTML" />
  </td>
  <td class="content-actions">
    <button class="delete-btn" title="Delete"
      hx-delete="/api/content/{id}" hx-confirm="Delete this item?"
      hx-target="#content-table" hx-swap="outerHTML">&times;</button>
  </td>
</tr>
"##
    )
}

/// The full listing fragment, newest first. Also the empty-state container so
/// a swap after the last deletion still leaves a valid target.
pub fn content_table(items: &[ContentItem]) -> String {
    if items.is_empty() {
        return concat!(
            r#"<div id="content-table" class="content-table">"#,
            r#"<p class="empty-state">No content yet. Add URLs or drop files to get started.</p>"#,
            "</div>"
        )
        .to_string();
    }

    let rows: String = items.iter().map(content_row).collect();
    format!(
        r#"<div id="content-table" class="content-table">
<table>
  <thead>
    <tr><th>Type</th><th>Name</th><th>Size</th><th>Status</th><th>Anonymize</th><th></th></tr>
  </thead>
  <tbody>
{rows}  </tbody>
</table>
</div>"#
    )
}

/// The complete listing page.
pub fn page(items: &[ContentItem]) -> String {
    let table = content_table(items);
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Content Harvester</title>
  <link rel="stylesheet" href="/static/styles.css" />
  <script src="https://unpkg.com/htmx.org@1.9.12"></script>
</head>
<body>
  <main class="container">
    <h1>Content Harvester</h1>
    <section class="add-urls">
      <form hx-post="/api/urls" hx-target="#content-table" hx-swap="outerHTML">
        <textarea name="urls" rows="3"
          placeholder="Paste URLs separated by newlines, commas or semicolons"></textarea>
        <button type="submit">Add URLs</button>
      </form>
    </section>
    <section id="dropzone" class="dropzone">
      <p>Drag and drop files here, or pick them below</p>
      <input type="file" id="file-input" name="files" multiple />
    </section>
    <section class="toolbar">
      <button id="process-all" hx-post="/api/process-all"
        hx-target="#content-table" hx-swap="outerHTML">Process all</button>
    </section>
    {table}
  </main>
  <div id="toast-container"></div>
  <script src="/static/app.js"></script>
</body>
</html>
"##
    )
}

/// Inline error fragment for fragment-style callers.
pub fn error_toast(message: &str) -> String {
    format!(
        r#"<div class="toast toast-error">{}</div>"#,
        escape(message)
    )
}

/// Full error page, used only when the listing itself cannot be rendered.
pub fn error_page(message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>Content Harvester - Error</title>
  <link rel="stylesheet" href="/static/styles.css" />
</head>
<body>
  <main class="container">
    <h1>Something went wrong</h1>
    <p class="error-message">{}</p>
    <p><a href="/">Back to the listing</a></p>
  </main>
</body>
</html>
"#,
        escape(message)
    )
}
