// Static HTML export of the Projects page.
// Every project field is escaped; links that fail URL validation are dropped.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::projects::Project;
use crate::security::{escape_attr, escape_special_chars, is_valid_url, sanitize_html};

fn render_link(url: &str, class: &str, label: &str) -> Option<String> {
    is_valid_url(url).then(|| {
        format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener\" class=\"{}\">{}</a>",
            escape_attr(url),
            class,
            label
        )
    })
}

fn render_tile(project: &Project) -> String {
    let live = project
        .live_link
        .as_deref()
        .and_then(|url| render_link(url, "view-live", "Live"))
        .unwrap_or_else(|| "<span class=\"view-live disabled\">Live</span>".to_string());
    let code = render_link(&project.github_link, "view-github", "{ Code }").unwrap_or_default();

    format!(
        concat!(
            "  <div class=\"project-tile\">\n",
            "    <span class=\"project-name\">{}</span>\n",
            "    <p class=\"project-description\">{}</p>\n",
            "    <span class=\"project-stars\">&#9733; {}</span>\n",
            "    {}\n",
            "    {}\n",
            "  </div>\n"
        ),
        sanitize_html(&project.name),
        sanitize_html(&project.description),
        project.stars,
        live,
        code
    )
}

/// Render the projects grid as a standalone HTML document.
pub fn render_projects_html(title: &str, projects: &[Project]) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_special_chars(title)));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!(
        "<p class=\"project-count\">{} projects</p>\n",
        projects.len()
    ));
    html.push_str("<div id=\"projects-list\" class=\"projects-grid\">\n");
    for project in projects {
        html.push_str(&render_tile(project));
    }
    html.push_str("</div>\n</body>\n</html>\n");
    html
}

/// Write the rendered page to `path`, replacing it atomically.
pub fn write_projects_html(path: &Path, title: &str, projects: &[Project]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(render_projects_html(title, projects).as_bytes())?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn hostile() -> Project {
        Project {
            name: "<script>alert(1)</script>".to_string(),
            description: "Tom & Jerry <b>".to_string(),
            github_link: "https://github.com/u/x\" onmouseover=\"x".to_string(),
            live_link: Some("javascript:alert(1)".to_string()),
            stars: 7,
            added_date: Utc::now(),
            fork: false,
        }
    }

    #[test]
    fn test_fields_are_escaped() {
        let html = render_projects_html("My Projects", &[hostile()]);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("Tom &amp; Jerry &lt;b&gt;"));
        assert!(!html.contains("\" onmouseover=\""));
    }

    #[test]
    fn test_unsafe_live_link_is_dropped() {
        let html = render_projects_html("My Projects", &[hostile()]);
        assert!(!html.contains("javascript:"));
        assert!(html.contains("view-live disabled"));
    }

    #[test]
    fn test_write_projects_html() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("projects.html");

        write_projects_html(&path, "My Projects", &[hostile()]).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<!DOCTYPE html>"));
        assert!(written.contains("1 projects"));
    }
}
