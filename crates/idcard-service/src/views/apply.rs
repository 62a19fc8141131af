//! Application form page.

use idcard_core::{ApplicationForm, Faculty, Level};

use crate::notice::Toast;

use super::{escape, header, layout, LOGOUT_BUTTON};

/// Repopulates the department control when the faculty changes. A
/// department the new faculty does not offer is dropped.
const DEPARTMENT_SCRIPT: &str = r"<script>
(function () {
  const faculty = document.getElementById('faculty');
  const department = document.getElementById('department');
  faculty.addEventListener('change', async function () {
    const current = department.value;
    department.innerHTML = '<option value=\'\'>Select your department</option>';
    department.disabled = true;
    if (!faculty.value) return;
    const response = await fetch('/apply/departments?faculty=' + encodeURIComponent(faculty.value));
    if (!response.ok) return;
    const names = await response.json();
    for (const name of names) {
      const option = document.createElement('option');
      option.value = name;
      option.textContent = name;
      option.selected = name === current;
      department.appendChild(option);
    }
    department.disabled = names.length === 0;
  });
  document.getElementById('application').addEventListener('submit', function () {
    const button = document.getElementById('submit');
    button.disabled = true;
    button.textContent = 'Submitting Application...';
  });
})();
</script>";

/// Leaves the form as soon as the student signs out in another tab.
const SESSION_SCRIPT: &str = r"<script>
(function () {
  const source = new EventSource('/session/events');
  source.addEventListener('redirect', function (event) {
    source.close();
    window.location.assign(event.data);
  });
})();
</script>";

fn option(value: &str, label: &str, selected: bool) -> String {
    format!(
        r#"<option value="{}"{}>{}</option>"#,
        escape(value),
        if selected { " selected" } else { "" },
        escape(label),
    )
}

fn faculty_options(selected: Option<Faculty>) -> String {
    let mut html = option("", "Select your faculty", selected.is_none());
    for faculty in Faculty::ALL {
        html.push_str(&option(faculty.name(), faculty.name(), selected == Some(faculty)));
    }
    html
}

fn department_options(form: &ApplicationForm) -> String {
    let selection = form.selection();
    let mut html = option("", "Select your department", selection.department().is_none());
    for name in selection.department_options() {
        html.push_str(&option(name, name, selection.department() == Some(*name)));
    }
    html
}

fn level_options(selected: &str) -> String {
    let mut html = option("", "Select your level", selected.is_empty());
    for level in Level::ALL {
        html.push_str(&option(
            level.as_str(),
            &format!("{level} Level"),
            selected == level.as_str(),
        ));
    }
    html
}

/// Render the form, redrawing previously entered values.
#[must_use]
pub fn render(form: &ApplicationForm, toast: Option<&Toast>) -> String {
    let selection = form.selection();
    let actions = format!(
        r#"<a href="/dashboard" class="rounded-md border px-4 py-2 text-sm">View Dashboard</a>
{LOGOUT_BUTTON}"#
    );

    let body = format!(
        r#"{header}
<main class="container mx-auto px-4 py-8 max-w-2xl">
  <section class="rounded-lg border bg-white p-6">
    <h2 class="text-2xl font-semibold">ID Card Application</h2>
    <p class="text-gray-500 mb-6">Fill out the form below to apply for your student ID card</p>
    <form id="application" method="post" action="/apply" enctype="multipart/form-data" class="space-y-6">
      <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
        <label class="block text-sm font-medium">Full Name
          <input id="fullName" name="fullName" type="text" value="{full_name}" placeholder="Enter your full name" required class="mt-1 w-full rounded-md border px-3 py-2">
        </label>
        <label class="block text-sm font-medium">Matriculation Number
          <input id="matricNumber" name="matricNumber" type="text" value="{matric_number}" placeholder="e.g., FUL/2024/001" required class="mt-1 w-full rounded-md border px-3 py-2">
        </label>
      </div>
      <label class="block text-sm font-medium">Faculty
        <select id="faculty" name="faculty" required class="mt-1 w-full rounded-md border px-3 py-2">{faculties}</select>
      </label>
      <label class="block text-sm font-medium">Department
        <select id="department" name="department" required{department_disabled} class="mt-1 w-full rounded-md border px-3 py-2">{departments}</select>
      </label>
      <label class="block text-sm font-medium">Level
        <select id="level" name="level" required class="mt-1 w-full rounded-md border px-3 py-2">{levels}</select>
      </label>
      <label class="block text-sm font-medium">Passport Photo
        <input id="passport" name="passport" type="file" accept="image/*" required class="mt-1 w-full">
        <span class="block text-sm text-gray-500">Upload a recent passport-sized photograph (JPG, PNG)</span>
      </label>
      <label class="block text-sm font-medium">Digital Signature
        <input id="signature" name="signature" type="file" accept="image/*" required class="mt-1 w-full">
        <span class="block text-sm text-gray-500">Upload your signature (JPG, PNG)</span>
      </label>
      <button id="submit" type="submit" class="w-full rounded-md bg-emerald-700 px-4 py-2 text-white">Submit Application</button>
    </form>
  </section>
</main>
{DEPARTMENT_SCRIPT}
{SESSION_SCRIPT}"#,
        header = header("ID Card Application", &actions),
        full_name = escape(&form.full_name),
        matric_number = escape(&form.matric_number),
        faculties = faculty_options(selection.faculty()),
        department_disabled = if selection.department_enabled() { "" } else { " disabled" },
        departments = department_options(form),
        levels = level_options(form.level.trim()),
    );

    layout("Apply", toast, &body)
}
