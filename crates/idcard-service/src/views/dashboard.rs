//! Status dashboard.

use idcard_core::{Application, BadgeIcon, BadgeVariant};

use crate::notice::Toast;

use super::{escape, header, layout, LOGOUT_BUTTON};

/// Listens for live updates. `applications` carries a JSON-encoded HTML
/// fragment for the list; `redirect` carries the path to leave to.
const LIVE_SCRIPT: &str = r"<script>
(function () {
  const source = new EventSource('/dashboard/events');
  source.addEventListener('applications', function (event) {
    document.getElementById('applications').innerHTML = JSON.parse(event.data);
  });
  source.addEventListener('redirect', function (event) {
    source.close();
    window.location.assign(event.data);
  });
})();
</script>";

const fn icon_glyph(icon: BadgeIcon) -> &'static str {
    match icon {
        BadgeIcon::Clock => "&#128339;",
        BadgeIcon::AlertCircle => "&#9888;",
        BadgeIcon::CheckCircle => "&#10004;",
        BadgeIcon::IdCard => "&#129706;",
    }
}

const fn variant_class(variant: BadgeVariant) -> &'static str {
    match variant {
        BadgeVariant::Default => "bg-emerald-50 border-emerald-200",
        BadgeVariant::Secondary => "bg-gray-100 border-gray-200",
        BadgeVariant::Destructive => "bg-red-50 border-red-200",
    }
}

fn presence(label: &str, present: bool) -> String {
    let dot = if present { "bg-green-500" } else { "bg-red-500" };
    format!(
        r#"<div class="flex items-center space-x-1" data-present="{present}"><div class="w-2 h-2 rounded-full {dot}"></div><span>{label}</span></div>"#
    )
}

fn card(application: &Application) -> String {
    let badge = application.status.badge();
    let ready_banner = if application.status.is_ready() {
        r#"<div class="mt-4 p-4 bg-green-50 border border-green-200 rounded-lg">
  <p class="text-green-800 font-medium">&#10004; Your ID card is ready for pickup!</p>
  <p class="text-sm text-green-600 mt-1">Visit the ICT Unit to collect your ID card.</p>
</div>"#
    } else {
        ""
    };

    format!(
        r#"<article class="rounded-lg border bg-white p-6" data-application="{id}">
  <h3 class="flex items-center space-x-2 text-lg font-semibold">
    <span>Application #{short_id}</span>
    <span class="inline-flex items-center space-x-1 rounded-full border px-2 text-xs {variant} {color}" data-variant="{variant_name}" data-icon="{icon_name}">{glyph} <span>{label}</span></span>
  </h3>
  <p class="text-sm text-gray-500 mb-4">Submitted on {date}</p>
  <dl class="grid grid-cols-1 md:grid-cols-2 gap-4">
    <div><dt class="text-sm font-medium text-gray-500">Matriculation Number</dt><dd class="font-semibold">{matric}</dd></div>
    <div><dt class="text-sm font-medium text-gray-500">Level</dt><dd class="font-semibold">{level} Level</dd></div>
    <div><dt class="text-sm font-medium text-gray-500">Faculty</dt><dd class="font-semibold">{faculty}</dd></div>
    <div><dt class="text-sm font-medium text-gray-500">Department</dt><dd class="font-semibold">{department}</dd></div>
  </dl>
  <div class="mt-4 pt-4 border-t flex items-center space-x-4 text-sm">
    {passport}
    {signature}
  </div>
  {ready_banner}
</article>"#,
        id = escape(&application.id),
        short_id = escape(application.short_id()),
        variant = variant_class(badge.variant),
        color = badge.color,
        variant_name = badge.variant.name(),
        icon_name = badge.icon.name(),
        glyph = icon_glyph(badge.icon),
        label = escape(&badge.label),
        date = application.created_at.format("%Y-%m-%d"),
        matric = escape(&application.matric_number),
        level = escape(&application.level),
        faculty = escape(&application.faculty),
        department = escape(&application.department),
        passport = presence("Passport Photo", application.passport_photo_url.is_some()),
        signature = presence("Signature", application.signature_url.is_some()),
    )
}

/// The application list, as placed inside the `#applications` container.
#[must_use]
pub fn applications(list: &[Application]) -> String {
    if list.is_empty() {
        return r#"<section class="rounded-lg border bg-white p-6 text-center">
  <h3 class="text-lg font-semibold">No Applications Found</h3>
  <p class="text-gray-500 mb-4">You haven't submitted any ID card applications yet</p>
  <a href="/apply" class="rounded-md bg-emerald-700 px-4 py-2 text-white">Apply for ID Card</a>
</section>"#
            .to_string();
    }

    let mut html = String::from(
        r#"<div class="flex justify-between items-center">
  <h2 class="text-2xl font-semibold">Your Applications</h2>
  <a href="/apply" class="rounded-md bg-emerald-700 px-4 py-2 text-white">New Application</a>
</div>
"#,
    );
    for application in list {
        html.push_str(&card(application));
        html.push('\n');
    }
    html
}

/// Render the dashboard page.
#[must_use]
pub fn render(list: &[Application], toast: Option<&Toast>) -> String {
    let actions = format!(
        r#"<a href="/" class="rounded-md border px-4 py-2 text-sm">&larr; Back to Home</a>
{LOGOUT_BUTTON}"#
    );

    let body = format!(
        r#"{header}
<main class="container mx-auto px-4 py-8">
  <div class="mb-8">
    <h1 class="text-3xl font-bold text-emerald-700 mb-2">Your Dashboard</h1>
    <p class="text-gray-500">Track your ID card applications and manage your account</p>
  </div>
  <div id="applications" class="grid gap-6">
{list}
  </div>
</main>
{LIVE_SCRIPT}"#,
        header = header("Student Dashboard", &actions),
        list = applications(list),
    );

    layout("Dashboard", toast, &body)
}
