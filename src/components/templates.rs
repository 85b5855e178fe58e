use std::fs;
use std::path::Path;

use crate::errors::WikiError;
use crate::types::{Page, View};
use crate::utils::escape_html_bytes;

const TITLE_PLACEHOLDER: &str = "{{TITLE}}";
const BODY_PLACEHOLDER: &str = "{{BODY}}";

const FALLBACK_VIEW: &str = r#"<!doctype html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{{TITLE}}</title>
    <link rel="stylesheet" href="/static/wiki.css">
</head>
<body>
    <h1>{{TITLE}}</h1>
    <p>[<a href="/edit/{{TITLE}}">edit</a>]</p>
    <div class="page-body">{{BODY}}</div>
</body>
</html>
"#;

const FALLBACK_EDIT: &str = r#"<!doctype html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Editing {{TITLE}}</title>
    <link rel="stylesheet" href="/static/wiki.css">
</head>
<body>
    <h1>Editing {{TITLE}}</h1>
    <form action="/save/{{TITLE}}" method="POST">
        <div><textarea name="body" rows="20" cols="80">{{BODY}}</textarea></div>
        <div><input type="submit" value="Save"></div>
    </form>
</body>
</html>
"#;

/// Page rendering collaborator used by the handlers
pub trait Renderer: Send + Sync {
    fn render(&self, view: View, page: &Page) -> Result<Vec<u8>, WikiError>;
}

/// Placeholder templates loaded once at startup and shared read-only.
///
/// `{{TITLE}}` is always HTML-escaped. `{{BODY}}` is inserted as markup in the
/// view template and escaped in the edit template, where it sits inside a
/// textarea. Any other `{{...}}` token fails the render.
#[derive(Debug, Clone)]
pub struct TemplateComponent {
    view: String,
    edit: String,
}

impl TemplateComponent {
    /// Component using the built-in templates
    pub fn new() -> Self {
        Self::from_sources(FALLBACK_VIEW, FALLBACK_EDIT)
    }

    pub fn from_sources(view: impl Into<String>, edit: impl Into<String>) -> Self {
        Self { view: view.into(), edit: edit.into() }
    }

    /// Load `view.html` and `edit.html` from `dir`, keeping the built-in
    /// version of any template that cannot be read.
    pub fn load(dir: &Path) -> Self {
        Self {
            view: load_template(dir, View::View, FALLBACK_VIEW),
            edit: load_template(dir, View::Edit, FALLBACK_EDIT),
        }
    }

    fn source(&self, view: View) -> &str {
        match view {
            View::View => &self.view,
            View::Edit => &self.edit,
        }
    }
}

impl Default for TemplateComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for TemplateComponent {
    fn render(&self, view: View, page: &Page) -> Result<Vec<u8>, WikiError> {
        let title = escape_html_bytes(page.title.as_str().as_bytes());
        let body = match view {
            View::View => page.body.clone(),
            View::Edit => escape_html_bytes(&page.body),
        };

        let mut rest = self.source(view);
        let mut out = Vec::with_capacity(rest.len() + body.len());
        while let Some(start) = rest.find("{{") {
            out.extend_from_slice(rest[..start].as_bytes());
            let tail = &rest[start..];
            if let Some(after) = tail.strip_prefix(TITLE_PLACEHOLDER) {
                out.extend_from_slice(&title);
                rest = after;
            } else if let Some(after) = tail.strip_prefix(BODY_PLACEHOLDER) {
                out.extend_from_slice(&body);
                rest = after;
            } else {
                let token: String = tail.chars().take_while(|c| *c != '\n').take(32).collect();
                return Err(WikiError::RenderError(format!(
                    "template {}: unknown placeholder near '{}'",
                    view.template_name(),
                    token
                )));
            }
        }
        out.extend_from_slice(rest.as_bytes());
        Ok(out)
    }
}

fn load_template(dir: &Path, view: View, fallback: &str) -> String {
    let path = dir.join(format!("{}.html", view.template_name()));
    match fs::read_to_string(&path) {
        Ok(source) => {
            log::info!("Loaded template {:?}", path);
            source
        }
        Err(e) => {
            log::warn!("Template {:?} unavailable ({}), using built-in", path, e);
            fallback.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Title;
    use pretty_assertions::assert_eq;

    fn page(body: &str) -> Page {
        Page::new(Title::parse("Home").unwrap(), body)
    }

    fn render(component: &TemplateComponent, view: View, body: &str) -> String {
        String::from_utf8(component.render(view, &page(body)).unwrap()).unwrap()
    }

    #[test]
    fn view_inserts_markup_verbatim() {
        let component = TemplateComponent::from_sources("<h1>{{TITLE}}</h1>{{BODY}}", "");
        assert_eq!(
            render(&component, View::View, "<a href='/view/A'>A</a>"),
            "<h1>Home</h1><a href='/view/A'>A</a>"
        );
    }

    #[test]
    fn edit_escapes_body() {
        let component = TemplateComponent::from_sources("", "<textarea>{{BODY}}</textarea>");
        assert_eq!(
            render(&component, View::Edit, "</textarea><b>&"),
            "<textarea>&lt;/textarea&gt;&lt;b&gt;&amp;</textarea>"
        );
    }

    #[test]
    fn unknown_placeholder_fails() {
        let component = TemplateComponent::from_sources("{{TITLE}} {{Author}}", "");
        let err = component.render(View::View, &page("")).unwrap_err();
        assert!(matches!(err, WikiError::RenderError(msg) if msg.contains("{{Author}}")));
    }

    #[test]
    fn builtin_edit_form_posts_to_save() {
        let html = render(&TemplateComponent::new(), View::Edit, "");
        assert!(html.contains("action=\"/save/Home\""));
        assert!(html.contains("<textarea name=\"body\" rows=\"20\" cols=\"80\"></textarea>"));
    }

    #[test]
    fn load_prefers_files_and_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("view.html"), "custom {{TITLE}}").unwrap();
        let component = TemplateComponent::load(dir.path());
        assert_eq!(render(&component, View::View, "ignored"), "custom Home");
        assert!(render(&component, View::Edit, "").contains("Editing Home"));
    }
}
