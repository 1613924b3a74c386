//! HTML views. Plain string rendering; every interpolated value goes through `escape`.

use std::fmt::Write;

use axum::http::StatusCode;

use crate::app::{CafeDto, CafeForm, FormErrors};
use crate::domain::Scale;

const BOOTSTRAP_CSS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";

/// Which form page is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(i64),
}

impl FormMode {
    fn title(&self) -> &'static str {
        match self {
            Self::Add => "Add a new cafe into the database",
            Self::Edit(_) => "Edit cafe",
        }
    }

    fn action(&self) -> String {
        match self {
            Self::Add => "/add".to_string(),
            Self::Edit(id) => format!("/edit/{}", id),
        }
    }
}

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="{css}">
</head>
<body class="bg-light">
<div class="container py-5">
{body}
</div>
</body>
</html>
"#,
        title = escape(title),
        css = BOOTSTRAP_CSS,
        body = body,
    )
}

pub fn index_page() -> String {
    layout(
        "Coffee & Wifi",
        r#"<div class="text-center">
<h1 class="display-4">&#9749;&#65039; Coffee &amp; Wifi &#128187;</h1>
<p class="lead">Want to work in a cafe but need power and wifi?</p>
<p>You've found the right place! Checkout my collection of cafes with data on power socket availability, wifi speed and coffee quality.</p>
<a class="btn btn-warning btn-lg" href="/cafes" role="button">Show Me!</a>
</div>"#,
    )
}

/// Only web links become anchors; anything else (`javascript:`, `data:`) is shown as text.
fn location_cell(location: &str) -> String {
    let lower = location.trim_start().to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        format!(r#"<a href="{}">Maps Link</a>"#, escape(location.trim_start()))
    } else {
        escape(location)
    }
}

pub fn cafes_page(cafes: &[CafeDto], delete_token: &str) -> String {
    let mut rows = String::new();
    for cafe in cafes {
        let _ = write!(
            rows,
            r#"<tr>
<td>{name}</td>
<td>{location}</td>
<td>{rating}</td>
<td>{wifi}</td>
<td>{power}</td>
<td><a class="btn btn-sm btn-outline-secondary" href="/edit/{id}">Edit</a></td>
<td><form method="post" action="/delete/{id}"><input type="hidden" name="csrf_token" value="{token}"><button type="submit" class="btn btn-sm btn-danger">Delete</button></form></td>
</tr>
"#,
            id = cafe.id,
            name = escape(&cafe.name),
            location = location_cell(&cafe.location),
            rating = escape(&cafe.rating),
            wifi = escape(&cafe.wifi),
            power = escape(&cafe.power),
            token = escape(delete_token),
        );
    }

    let body = format!(
        r#"<h1>All Cafes</h1>
<table class="table table-dark table-striped">
<thead><tr><th>Cafe Name</th><th>Location</th><th>Coffee</th><th>Wifi</th><th>Power</th><th></th><th></th></tr></thead>
<tbody>
{rows}</tbody>
</table>
<p><a href="/add">Add a new cafe</a> | <a href="/">Return to index page</a></p>"#
    );
    layout("All Cafes", &body)
}

fn field_errors(errors: &FormErrors, field: &str) -> String {
    errors
        .get(field)
        .iter()
        .map(|m| format!(r#"<div class="invalid-feedback d-block">{}</div>"#, escape(m)))
        .collect()
}

fn invalid_class(errors: &FormErrors, field: &str) -> &'static str {
    if errors.get(field).is_empty() {
        ""
    } else {
        " is-invalid"
    }
}

fn text_input(form: &CafeForm, errors: &FormErrors, field: &str, label: &str) -> String {
    let value = match field {
        "name" => &form.name,
        _ => &form.location,
    };
    format!(
        r#"<div class="mb-3">
<label class="form-label" for="{field}">{label}</label>
<input class="form-control{invalid}" id="{field}" name="{field}" type="text" value="{value}" required>
{errors}</div>
"#,
        invalid = invalid_class(errors, field),
        value = escape(value),
        errors = field_errors(errors, field),
    )
}

fn select_input(form: &CafeForm, errors: &FormErrors, scale: Scale) -> String {
    let current = form.value(scale);
    let mut options = String::new();
    for choice in scale.choices() {
        let selected = if choice == current { " selected" } else { "" };
        let _ = write!(
            options,
            r#"<option value="{v}"{selected}>{v}</option>"#,
            v = escape(&choice)
        );
    }
    format!(
        r#"<div class="mb-3">
<label class="form-label" for="{field}">{label}</label>
<select class="form-select{invalid}" id="{field}" name="{field}">{options}</select>
{errors}</div>
"#,
        field = scale.field(),
        label = scale.label(),
        invalid = invalid_class(errors, scale.field()),
        errors = field_errors(errors, scale.field()),
    )
}

pub fn form_page(mode: FormMode, form: &CafeForm, errors: &FormErrors, token: &str) -> String {
    let mut fields = text_input(form, errors, "name", "Cafe name");
    fields.push_str(&text_input(
        form,
        errors,
        "location",
        "Cafe location on Google Maps (URL)",
    ));
    for scale in Scale::all() {
        fields.push_str(&select_input(form, errors, *scale));
    }

    let body = format!(
        r#"<h1>{title}</h1>
<form method="post" action="{action}" novalidate>
<input type="hidden" name="csrf_token" value="{token}">
{fields}<button type="submit" class="btn btn-primary">Submit</button>
</form>
<p class="mt-3"><a href="/cafes">See all cafes</a></p>"#,
        title = mode.title(),
        action = mode.action(),
        token = escape(token),
    );
    layout(mode.title(), &body)
}

pub fn not_found_page() -> String {
    error_page(
        StatusCode::NOT_FOUND,
        "The requested cafe or page could not be found.",
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let reason = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        r#"<h1>{code} {reason}</h1>
<p>{message}</p>
<p><a href="/cafes">Back to all cafes</a></p>"#,
        code = status.as_u16(),
        message = escape(message),
    );
    layout(reason, &body)
}
