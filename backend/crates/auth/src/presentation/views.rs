//! HTML Views
//!
//! Server-rendered pages. Every dynamic value passes through
//! [`escape_html`] before it reaches the markup.

use crate::domain::entity::user::User;

/// Shared page chrome: navigation, flashed messages, then `content`
///
/// `content` is inserted as-is and must already be escaped.
pub fn page(title: &str, user: Option<&User>, flashes: &[String], content: &str) -> String {
    let nav = match user {
        Some(user) => format!(
            r#"<li><span>{name}</span></li>
      <li><a href="/auth/logout">Log Out</a></li>"#,
            name = escape_html(user.user_name.as_str()),
        ),
        None => r#"<li><a href="/auth/login">Log In</a></li>"#.to_string(),
    };

    let flashes_html: String = flashes
        .iter()
        .map(|message| format!(r#"<div class="flash">{}</div>"#, escape_html(message)))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en"><head>
<meta charset="utf-8"><meta name="viewport" content="width=device-width,initial-scale=1">
<title>{title} - Noah</title>
<style>{style}</style>
</head><body>
<nav>
  <h1><a href="/">Noah</a></h1>
  <ul>
      {nav}
  </ul>
</nav>
<section class="content">
  <header><h1>{title}</h1></header>
  {flashes_html}
  {content}
</section>
</body></html>"#,
        title = escape_html(title),
        style = base_style(),
    )
}

/// Login form, with any flashed messages above it
pub fn login_page(user: Option<&User>, flashes: &[String]) -> String {
    let form = r#"<form method="post" action="/auth/login">
    <label for="username">Username</label>
    <input name="username" id="username" required autocomplete="username">
    <label for="password">Password</label>
    <input type="password" name="password" id="password" required autocomplete="current-password">
    <input type="submit" value="Log In">
  </form>"#;

    page("Log In", user, flashes, form)
}

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn base_style() -> &'static str {
    "body{font-family:sans-serif;background:#eee;padding:1rem;margin:0}\
nav{display:flex;align-items:center;background:lightgray;padding:0 0.5rem}\
nav h1{flex:auto;margin:0}nav h1 a{text-decoration:none;padding:0.25rem 0.5rem}\
nav ul{display:flex;list-style:none;margin:0;padding:0}\
nav ul li a,nav ul li span{display:block;padding:0.5rem}\
.content{padding:0 1rem 1rem;background:white}\
.content form{margin:1em 0;display:flex;flex-direction:column}\
.content label{font-weight:bold;margin-bottom:0.5em}\
.content input{margin-bottom:1em}\
.flash{margin:1em 0;padding:1em;background:#cae6f6;border:1px solid #377ba8}"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x")</script> & 'y'"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; &#x27;y&#x27;"
        );
        assert_eq!(escape_html("alice"), "alice");
    }

    #[test]
    fn test_login_page_lists_flashes_in_order() {
        let html = login_page(None, &["first".to_string(), "second".to_string()]);

        let first = html.find("first").unwrap();
        let second = html.find("second").unwrap();
        assert!(first < second);
        assert!(html.contains(r#"action="/auth/login""#));
        assert!(html.contains(r#"href="/auth/login""#));
    }

    #[test]
    fn test_flashes_are_escaped() {
        let html = login_page(None, &["<b>".to_string()]);
        assert!(html.contains("&lt;b&gt;"));
        assert!(!html.contains("<b>"));
    }
}
