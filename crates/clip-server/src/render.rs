//! Server-side HTML for the index page.
//!
//! One list with an add form on top. Each item carries a selection checkbox,
//! a copy button, delete, and two inline forms (content and annotation). The
//! inline forms are plain `POST` forms pointing at the `/update/...` routes;
//! [`SCRIPT`] submits them with `fetch` and reloads on success, and folds the
//! checked boxes into the bulk-delete form's `ids` field.

use std::fmt::Write as _;

use clip_core::Item;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Client-side glue for the inline forms, selection and copy buttons.
pub const SCRIPT: &str = r#"
document.addEventListener('submit', async (event) => {
  const form = event.target;
  if (form.classList.contains('bulk')) {
    const checked = [...document.querySelectorAll('input.select:checked')].map((b) => b.value);
    form.elements.ids.value = [form.elements.ids.value, ...checked].filter((v) => v.trim()).join(',');
    return;
  }
  if (!form.classList.contains('inline')) return;
  event.preventDefault();
  const resp = await fetch(form.action, {
    method: 'POST',
    body: new URLSearchParams(new FormData(form)),
  });
  if (resp.ok) {
    location.reload();
    return;
  }
  const body = await resp.json().catch(() => ({}));
  alert(body.error || resp.statusText);
});

document.addEventListener('click', (event) => {
  const target = event.target;
  if (target.id === 'select-all') {
    document.querySelectorAll('input.select').forEach((b) => { b.checked = target.checked; });
  } else if (target.classList.contains('copy')) {
    const text = target.closest('li').querySelector('pre.content').textContent;
    navigator.clipboard.writeText(text);
  }
});
"#;

/// Escape text for use in element content and double-quoted attributes.
pub fn escape(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for c in s.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      _ => out.push(c),
    }
  }
  out
}

/// Render the full page. `banner` is shown above the list when set.
pub fn index(items: &[Item], banner: Option<&str>) -> String {
  let mut html = String::new();

  html.push_str(
    "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
     <title>Clipboard history</title>\n</head>\n<body>\n",
  );
  let _ = writeln!(html, "<h1>Clipboard history ({} items)</h1>", items.len());

  if let Some(message) = banner {
    let _ = writeln!(html, "<div class=\"error\">{}</div>", escape(message));
  }

  html.push_str(
    "<form method=\"post\" action=\"/add\">\n\
     <textarea name=\"content\" required></textarea>\n\
     <button type=\"submit\">Add</button>\n</form>\n",
  );

  if items.is_empty() {
    html.push_str("<p class=\"empty\">Nothing stored yet.</p>\n");
  } else {
    html.push_str(
      "<label><input type=\"checkbox\" id=\"select-all\"> Select all</label>\n\
       <ol class=\"items\">\n",
    );
    for item in items {
      item_html(&mut html, item);
    }
    html.push_str("</ol>\n");

    html.push_str(
      "<form class=\"bulk\" method=\"post\" action=\"/delete/bulk\">\n\
       <input name=\"ids\" placeholder=\"ids, comma separated\">\n\
       <button type=\"submit\">Delete selected</button>\n</form>\n\
       <form method=\"post\" action=\"/clear\">\n\
       <button type=\"submit\">Clear all</button>\n</form>\n",
    );
  }

  let _ = writeln!(html, "<script>{SCRIPT}</script>");
  html.push_str("</body>\n</html>\n");
  html
}

fn item_html(html: &mut String, item: &Item) {
  let _ = writeln!(
    html,
    "<li id=\"item-{id}\" data-id=\"{id}\">\n\
     <input type=\"checkbox\" class=\"select\" value=\"{id}\">\n\
     <span class=\"number\">#{number}</span>\n\
     <pre class=\"content\">{content}</pre>\n\
     <button type=\"button\" class=\"copy\">Copy</button>",
    id = item.id,
    number = item.sequence_number,
    content = escape(&item.content),
  );

  if let Some(annotation) = item.annotation.as_deref().filter(|a| !a.is_empty()) {
    let _ = writeln!(html, "<p class=\"annotation\">{}</p>", escape(annotation));
  }

  let _ = write!(
    html,
    "<time>{}</time>",
    item.created_at.format(TIMESTAMP_FORMAT)
  );
  if let Some(updated) = item.updated_at {
    let _ = write!(
      html,
      " <time class=\"updated\">edited {}</time>",
      updated.format(TIMESTAMP_FORMAT)
    );
  }

  let annotation = item.annotation.as_deref().unwrap_or_default();
  let _ = writeln!(
    html,
    "\n<details><summary>Edit</summary>\n\
     <form class=\"inline\" method=\"post\" action=\"/update/{id}\">\
     <textarea name=\"content\" required>{content}</textarea>\
     <button type=\"submit\">Save</button></form>\n\
     <form class=\"inline\" method=\"post\" action=\"/update/annotation/{id}\">\
     <input name=\"annotation\" value=\"{annotation}\" placeholder=\"note\">\
     <button type=\"submit\">Save note</button></form>\n\
     </details>\n\
     <form method=\"post\" action=\"/delete/{id}\">\
     <button type=\"submit\">Delete</button></form>\n</li>",
    id = item.id,
    content = escape(&item.content),
    annotation = escape(annotation),
  );
}
