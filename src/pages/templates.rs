//! Minimal server-rendered HTML. The UI is a handful of static pages;
//! everything dynamic goes through the JSON endpoints.

use crate::auth::dto::FlashParams;
use crate::pages::genre::{Genre, THEMES};

/// Escape text interpolated into HTML.
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title} - DearDiary</title>
<style>
body {{ font-family: Poppins, sans-serif; background: #f5f5f5; margin: 2rem auto; max-width: 40rem; }}
form {{ display: flex; flex-direction: column; gap: .5rem; }}
.flash-error {{ color: #b00020; }}
.flash-notice {{ color: #007b55; }}
</style>
</head>
<body>
{body}
</body>
</html>"#
    )
}

fn flash_block(params: &FlashParams) -> String {
    let mut out = String::new();
    if let Some(error) = &params.error {
        out.push_str(&format!(
            "<p class=\"flash-error\">{}</p>\n",
            escape(error)
        ));
    }
    if let Some(notice) = &params.notice {
        out.push_str(&format!(
            "<p class=\"flash-notice\">{}</p>\n",
            escape(notice)
        ));
    }
    out
}

pub fn register_page(params: &FlashParams) -> String {
    let body = format!(
        r#"<h1>Create your diary</h1>
{flash}<form method="post" action="/register">
<input name="name" placeholder="Name" required>
<input name="phone" placeholder="Phone (optional)">
<input name="email" type="email" placeholder="Email" required>
<input name="password" type="password" placeholder="Password" required>
<input name="confirm" type="password" placeholder="Confirm password" required>
<button type="submit">Register</button>
</form>
<p>Already have an account? <a href="/login">Log in</a></p>"#,
        flash = flash_block(params)
    );
    layout("Register", &body)
}

pub fn login_page(params: &FlashParams) -> String {
    let body = format!(
        r#"<h1>Welcome back</h1>
{flash}<form method="post" action="/login">
<input name="name" placeholder="Name" required>
<input name="password" type="password" placeholder="Password" required>
<button type="submit">Log in</button>
</form>
<p>New here? <a href="/register">Register</a></p>"#,
        flash = flash_block(params)
    );
    layout("Login", &body)
}

pub fn home_page(user_name: &str) -> String {
    let themes = THEMES
        .iter()
        .map(|(name, class)| format!("<li class=\"{class}\">{name}</li>"))
        .collect::<Vec<_>>()
        .join("\n");
    let genres = Genre::ALL
        .iter()
        .map(|g| {
            format!(
                "<li><a href=\"/genre/{}\">{}</a></li>",
                g.slug(),
                g.display_name()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    let body = format!(
        r#"<h1>Hello {user}!</h1>
<p><a href="/logout">Log out</a></p>
<h2>Themes</h2>
<ul>
{themes}
</ul>
<h2>Your journals</h2>
<ul>
{genres}
</ul>"#,
        user = escape(user_name)
    );
    layout("Home", &body)
}

pub fn genre_page(genre: Genre, user_name: Option<&str>) -> String {
    let greeting = match user_name {
        Some(name) => format!("<p>Hello {}!</p>", escape(name)),
        None => "<p><a href=\"/login\">Log in</a> to save entries.</p>".to_string(),
    };
    let name = genre.display_name();
    let body = format!(
        r#"<h1>{name}</h1>
{greeting}<form onsubmit="saveEntry(event)">
<input id="title" placeholder="Title">
<textarea id="content" placeholder="Write here..."></textarea>
<button type="submit">Save</button>
</form>
<ul id="entries"></ul>
<script>
const genre = {genre_json};
async function loadEntries() {{
  const res = await fetch('/entries/' + encodeURIComponent(genre));
  const items = await res.json();
  const ul = document.getElementById('entries');
  ul.innerHTML = '';
  for (const it of items) {{
    const li = document.createElement('li');
    li.textContent = it.created_at + ' - ' + it.title + ': ' + it.content;
    ul.appendChild(li);
  }}
}}
async function saveEntry(ev) {{
  ev.preventDefault();
  await fetch('/save_entry', {{
    method: 'POST',
    headers: {{'Content-Type': 'application/json'}},
    body: JSON.stringify({{
      genre,
      title: document.getElementById('title').value,
      content: document.getElementById('content').value,
      meta: {{}}
    }})
  }});
  loadEntries();
}}
loadEntries();
</script>
<p><a href="/home">Back home</a></p>"#,
        genre_json = serde_json::to_string(name).unwrap_or_else(|_| "\"\"".into()),
    );
    layout(name, &body)
}

pub fn admin_page(user_name: &str, user_count: i64) -> String {
    format!(
        r#"<div style="font-family: Poppins, sans-serif; display:flex; flex-direction:column; justify-content:center; align-items:center; height:100vh; background:#f5f5f5;">
<h2 style="color:#333;">Hello {user}!</h2>
<p style="font-size:20px;">Total Registered Users: <b style="color:#007bff;">{user_count}</b></p>
</div>"#,
        user = escape(user_name)
    )
}

pub fn access_denied() -> String {
    "Access Denied".to_string()
}
