//! Server-rendered HTML.
//!
//! Pages are plain strings assembled from small helpers. Every value that
//! did not come from a literal in this module tree goes through [`escape`].

pub mod apply;
pub mod auth;
pub mod dashboard;
pub mod landing;

use axum::http::StatusCode;

use crate::notice::{Toast, ToastKind};

/// Escape text for use in HTML content and quoted attribute values.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Page header: brand on the left, `actions` on the right.
pub(crate) fn header(subtitle: &str, actions: &str) -> String {
    format!(
        r#"<header class="border-b bg-white/50 backdrop-blur-sm">
  <div class="container mx-auto px-4 py-4 flex items-center justify-between">
    <a href="/" class="flex items-center space-x-3">
      <div>
        <h1 class="text-xl font-bold text-emerald-700">FULafia</h1>
        <p class="text-sm text-gray-500">{subtitle}</p>
      </div>
    </a>
    <div class="flex items-center space-x-4">{actions}</div>
  </div>
</header>"#,
        subtitle = escape(subtitle),
    )
}

/// Logout button; posts to the sign-out route.
pub(crate) const LOGOUT_BUTTON: &str = r#"<form method="post" action="/auth/sign-out">
  <button type="submit" class="rounded-md border px-4 py-2 text-sm">Logout</button>
</form>"#;

/// Full HTML document.
pub(crate) fn layout(title: &str, toast: Option<&Toast>, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title} | FULafia ID Card</title>
  <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="min-h-screen bg-gradient-to-br from-white via-gray-50 to-white text-gray-900">
{toast}
{body}
</body>
</html>
"#,
        title = escape(title),
        toast = toast.map(render_toast).unwrap_or_default(),
    )
}

fn render_toast(toast: &Toast) -> String {
    let (role, classes) = match toast.kind {
        ToastKind::Success => ("status", "border-green-200 bg-green-50 text-green-800"),
        ToastKind::Error => ("alert", "border-red-200 bg-red-50 text-red-800"),
    };
    format!(
        r#"<div id="toast" role="{role}" class="fixed top-4 right-4 z-50 rounded-lg border px-4 py-3 shadow {classes}">{}</div>"#,
        escape(&toast.message)
    )
}

/// Error page for a failed request.
#[must_use]
pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        r#"{header}
<main class="container mx-auto px-4 py-16 max-w-xl text-center">
  <h1 class="text-3xl font-bold mb-4">{code}</h1>
  <p class="text-gray-600 mb-8">{message}</p>
  <a href="/" class="rounded-md bg-emerald-700 px-4 py-2 text-white">Back to Home</a>
</main>"#,
        header = header("ID Card System", ""),
        code = status.as_u16(),
        message = escape(message),
    );
    layout(
        status.canonical_reason().unwrap_or("Error"),
        Some(&Toast::error(message)),
        &body,
    )
}
