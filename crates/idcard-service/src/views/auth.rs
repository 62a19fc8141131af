//! Sign-in and registration page.

use crate::notice::Toast;

use super::{escape, header, layout};

fn credentials_form(action: &str, title: &str, button: &str, email: &str) -> String {
    format!(
        r#"<section class="rounded-lg border bg-white p-6">
  <h2 class="text-lg font-semibold mb-4">{title}</h2>
  <form method="post" action="{action}" class="space-y-4">
    <label class="block text-sm font-medium">Email
      <input type="email" name="email" value="{email}" required class="mt-1 w-full rounded-md border px-3 py-2">
    </label>
    <label class="block text-sm font-medium">Password
      <input type="password" name="password" required minlength="6" class="mt-1 w-full rounded-md border px-3 py-2">
    </label>
    <button type="submit" class="w-full rounded-md bg-emerald-700 px-4 py-2 text-white">{button}</button>
  </form>
</section>"#,
        email = escape(email),
    )
}

/// Render the login page, prefilling `email` after a failed attempt.
#[must_use]
pub fn render(email: &str, toast: Option<&Toast>) -> String {
    let body = format!(
        r#"{header}
<main class="container mx-auto px-4 py-12 max-w-3xl">
  <h1 class="text-3xl font-bold text-emerald-700 mb-2 text-center">Student Portal</h1>
  <p class="text-gray-500 mb-8 text-center">Sign in or create an account to apply for your ID card</p>
  <div class="grid md:grid-cols-2 gap-8">
    {sign_in}
    {sign_up}
  </div>
</main>"#,
        header = header(
            "ID Card System",
            r#"<a href="/" class="rounded-md border px-4 py-2 text-sm">Back to Home</a>"#,
        ),
        sign_in = credentials_form("/auth/sign-in", "Login", "Login", email),
        sign_up = credentials_form("/auth/sign-up", "Register", "Create Account", email),
    );

    layout("Login", toast, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_both_forms() {
        let html = render("", None);
        assert!(html.contains(r#"action="/auth/sign-in""#));
        assert!(html.contains(r#"action="/auth/sign-up""#));
    }

    #[test]
    fn prefilled_email_is_escaped() {
        let html = render(r#""><script>"#, Some(&Toast::error("invalid login credentials")));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
        assert!(html.contains("invalid login credentials"));
    }
}
