//! Landing page.

use crate::notice::Toast;

use super::{header, layout, LOGOUT_BUTTON};

const CHECK_ITEM: &str = r#"<li class="flex items-center space-x-2"><span class="text-emerald-700">&#10003;</span><span>"#;

/// Render the landing page. `signed_in` selects the call-to-action branch.
#[must_use]
pub fn render(signed_in: bool, toast: Option<&Toast>) -> String {
    let (actions, cta) = if signed_in {
        (
            format!(
                r#"<div class="flex items-center space-x-2">
  <span class="rounded-full bg-gray-100 px-3 py-1 text-xs font-semibold">Logged In</span>
  {LOGOUT_BUTTON}
</div>"#
            ),
            r#"<p class="text-lg text-gray-500">Welcome back! Ready to continue?</p>
<div class="flex justify-center space-x-4">
  <a href="/apply" class="rounded-md bg-emerald-700 px-6 py-3 text-white">Apply for ID Card</a>
  <a href="/dashboard" class="rounded-md border px-6 py-3">View Dashboard</a>
</div>"#,
        )
    } else {
        (
            r#"<a href="/auth" class="rounded-md bg-emerald-700 px-4 py-2 text-white">Login / Register</a>"#
                .to_string(),
            r#"<p class="text-lg text-gray-500">Get started with your ID card application</p>
<a href="/auth" class="rounded-md bg-emerald-700 px-6 py-3 text-white">Get Started</a>"#,
        )
    };

    let body = format!(
        r#"{header}
<main class="container mx-auto px-4 py-12">
  <div class="text-center mb-12">
    <h1 class="text-4xl md:text-6xl font-bold mb-4 text-emerald-700">Federal University of Lafia</h1>
    <h2 class="text-2xl md:text-3xl font-semibold mb-4">Online ID Card Enrollment System</h2>
    <p class="text-xl text-gray-500 max-w-2xl mx-auto">Apply for your student ID card online. Fast, secure, and convenient enrollment process.</p>
  </div>
  <div class="grid md:grid-cols-3 gap-8 mb-12">
    <section class="rounded-lg border bg-white p-6">
      <h3 class="text-center text-lg font-semibold">Easy Application</h3>
      <p class="text-center text-sm text-gray-500 mb-4">Simple online form to apply for your student ID card</p>
      <ul class="space-y-2 text-sm text-gray-500">
        {CHECK_ITEM}Select Faculty &amp; Department</span></li>
        {CHECK_ITEM}Upload Passport Photo</span></li>
        {CHECK_ITEM}Digital Signature</span></li>
      </ul>
    </section>
    <section class="rounded-lg border bg-white p-6">
      <h3 class="text-center text-lg font-semibold">Track Progress</h3>
      <p class="text-center text-sm text-gray-500 mb-4">Monitor your application status in real-time</p>
      <dl class="space-y-3 text-sm">
        <div class="flex items-center space-x-2"><dt class="rounded-full border px-2 text-xs">Pending</dt><dd class="text-gray-500">Application Submitted</dd></div>
        <div class="flex items-center space-x-2"><dt class="rounded-full border px-2 text-xs">Processing</dt><dd class="text-gray-500">Under Review</dd></div>
        <div class="flex items-center space-x-2"><dt class="rounded-full border px-2 text-xs">Ready</dt><dd class="text-gray-500">Ready for Pickup</dd></div>
      </dl>
    </section>
    <section class="rounded-lg border bg-white p-6">
      <h3 class="text-center text-lg font-semibold">Secure &amp; Official</h3>
      <p class="text-center text-sm text-gray-500 mb-4">Official FULafia ID cards with security features</p>
      <ul class="space-y-2 text-sm text-gray-500">
        {CHECK_ITEM}QR Code Verification</span></li>
        {CHECK_ITEM}Official University Seal</span></li>
        {CHECK_ITEM}Tamper-Proof Design</span></li>
      </ul>
    </section>
  </div>
  <div class="text-center space-y-4">
    {cta}
  </div>
</main>
<footer class="border-t bg-white/50 mt-12">
  <div class="container mx-auto px-4 py-8 text-center text-gray-500">
    <p>&copy; 2024 Federal University of Lafia. All rights reserved.</p>
    <p class="text-sm mt-2">ICT &amp; Registry Unit</p>
  </div>
</footer>"#,
        header = header("ID Card System", &actions),
    );

    layout("Home", toast, &body)
}
