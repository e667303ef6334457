//! Static page building.
//!
//! PipeScore's marketing/auth pages are plain HTML merged into one shared
//! template at build time. A page source under the static sources directory
//! uses a tiny delimiter format:
//!
//! ```text
//! {Page title} $optional-stylesheet$ %optional-script%
//! [
//!   <p>Body markup, spanning as many lines as it likes.</p>
//! ]
//! ```
//!
//! - title: between the first `{` and the next `}` (required)
//! - body: between the first `[` and the last `]` (required, spans lines)
//! - stylesheet name: between a pair of `$` sentinels (optional)
//! - script name: between a pair of `%` sentinels (optional)
//!
//! The shared `template.html` carries literal `$title$` and `$body$`
//! tokens and a `</head>` tag used as the insertion anchor for the
//! optional `<link>`/`<script>` tags. Rendering replaces the first
//! occurrence of each token and otherwise preserves the template
//! byte-for-byte.
//!
//! Three kinds of page come out of a build:
//!
//! - **Templated**: parsed from the delimiter format and rendered.
//! - **Markdown**: rendered to HTML with pulldown-cmark and pushed through
//!   the same template; the title is the first `#` heading.
//! - **Verbatim**: copied byte-for-byte, no placeholder semantics. The
//!   compiled editor page (`pipescore.html`) ships this way.
//!
//! Pages are independent of each other and the template is read-only for
//! the duration of a build, so [`Builder::build_all`] fans the page list
//! out across rayon. Any failed page fails the whole build; there is no
//! partial-success reporting.

use pulldown_cmark::{Parser, html as md_html};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::config::PagesConfig;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no {{...}} title found in {0}")]
    MissingTitle(PathBuf),
    #[error("no [...] body found in {0}")]
    MissingBody(PathBuf),
    #[error("template is missing its {0} token")]
    TemplateToken(&'static str),
}

/// Fields extracted from a templated page source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFields {
    pub title: String,
    pub body: String,
    pub css: Option<String>,
    pub js: Option<String>,
}

/// Extract title, body, and the optional asset names from a page source.
///
/// `source` is only used to name the file in errors.
pub fn parse(text: &str, source: &Path) -> Result<PageFields, PageError> {
    let title =
        between(text, '{', '}').ok_or_else(|| PageError::MissingTitle(source.to_path_buf()))?;
    let body =
        spanning(text, '[', ']').ok_or_else(|| PageError::MissingBody(source.to_path_buf()))?;
    Ok(PageFields {
        title,
        body,
        css: between(text, '$', '$'),
        js: between(text, '%', '%'),
    })
}

/// Substitute `fields` into `template`.
///
/// Replaces the first `$title$` and `$body$`, then inserts the stylesheet
/// link and script tag (when present) immediately before `</head>`. The
/// script is inserted after the link, so with both present the rendered
/// head reads link, script, `</head>`.
pub fn render(template: &str, fields: &PageFields) -> String {
    let mut page = template.replacen("$title$", &fields.title, 1);
    page = page.replacen("$body$", &fields.body, 1);

    if let Some(css) = &fields.css {
        let link = format!(
            "  <link type=\"text/css\" rel=\"stylesheet\" href=\"styles/{css}.css\" />\n  </head>"
        );
        page = page.replacen("</head>", &link, 1);
    }
    if let Some(js) = &fields.js {
        let script = format!("  <script src=\"dist/{js}.js\"></script>\n  </head>");
        page = page.replacen("</head>", &script, 1);
    }

    page
}

/// Render a markdown document through the shared template.
///
/// The page title is the first `#` heading, falling back to the file stem.
pub fn render_markdown(template: &str, markdown: &str, stem: &str) -> String {
    let title = markdown
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(|heading| heading.trim().to_string())
        .unwrap_or_else(|| stem.to_string());

    let mut body = String::new();
    md_html::push_html(&mut body, Parser::new(markdown));

    render(
        template,
        &PageFields {
            title,
            body,
            css: None,
            js: None,
        },
    )
}

/// Builds pages from a static sources directory into the output directory,
/// holding the shared template for the duration of the run.
#[derive(Debug)]
pub struct Builder {
    source: PathBuf,
    output: PathBuf,
    template: String,
}

impl Builder {
    /// Read the shared template and validate its anchor tokens up front,
    /// before any page work starts.
    pub fn new(source: &Path, output: &Path) -> Result<Self, PageError> {
        let template = read(&source.join("template.html"))?;
        for token in ["$title$", "$body$", "</head>"] {
            if !template.contains(token) {
                return Err(PageError::TemplateToken(token));
            }
        }
        Ok(Self {
            source: source.to_path_buf(),
            output: output.to_path_buf(),
            template,
        })
    }

    /// Parse `<source>/<name>.html`, render it, write `<output>/<name>.html`.
    pub fn build(&self, name: &str) -> Result<String, PageError> {
        let source = self.source.join(format!("{name}.html"));
        let fields = parse(&read(&source)?, &source)?;
        self.write(name, render(&self.template, &fields))
    }

    /// Render `<source>/<name>.md` through the template.
    pub fn build_markdown(&self, name: &str) -> Result<String, PageError> {
        let source = self.source.join(format!("{name}.md"));
        let markdown = read(&source)?;
        self.write(name, render_markdown(&self.template, &markdown, name))
    }

    /// Copy `<source>/<name>.html` to the output unchanged.
    pub fn copy_verbatim(&self, name: &str) -> Result<String, PageError> {
        let filename = format!("{name}.html");
        let source = self.source.join(&filename);
        fs::copy(&source, self.output.join(&filename)).map_err(|e| PageError::Read {
            path: source,
            source: e,
        })?;
        Ok(filename)
    }

    /// Build every configured page. Returns the written file names in page
    /// list order.
    pub fn build_all(&self, pages: &PagesConfig) -> Result<Vec<String>, PageError> {
        fs::create_dir_all(&self.output)?;

        let jobs: Vec<(PageKind, &str)> = pages
            .templated
            .iter()
            .map(|name| (PageKind::Templated, name.as_str()))
            .chain(
                pages
                    .markdown
                    .iter()
                    .map(|name| (PageKind::Markdown, name.as_str())),
            )
            .chain(
                pages
                    .verbatim
                    .iter()
                    .map(|name| (PageKind::Verbatim, name.as_str())),
            )
            .collect();

        jobs.par_iter()
            .map(|(kind, name)| match kind {
                PageKind::Templated => self.build(name),
                PageKind::Markdown => self.build_markdown(name),
                PageKind::Verbatim => self.copy_verbatim(name),
            })
            .collect()
    }

    fn write(&self, name: &str, page: String) -> Result<String, PageError> {
        let filename = format!("{name}.html");
        fs::write(self.output.join(&filename), page)?;
        Ok(filename)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageKind {
    Templated,
    Markdown,
    Verbatim,
}

/// Result of a source check: pages that validated, and source files the
/// page list never mentions.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub checked: Vec<String>,
    pub unreferenced: Vec<String>,
}

/// Validate every configured page source without writing output.
///
/// Templated pages must exist and parse; markdown and verbatim pages must
/// exist. Also reports `.html`/`.md` files in the sources directory that no
/// page entry references, which usually means a page was added but never
/// wired into the config.
pub fn check(source: &Path, pages: &PagesConfig) -> Result<CheckReport, PageError> {
    let template = read(&source.join("template.html"))?;
    for token in ["$title$", "$body$", "</head>"] {
        if !template.contains(token) {
            return Err(PageError::TemplateToken(token));
        }
    }

    let mut report = CheckReport::default();
    let mut referenced = vec!["template.html".to_string()];

    for name in &pages.templated {
        let path = source.join(format!("{name}.html"));
        parse(&read(&path)?, &path)?;
        referenced.push(format!("{name}.html"));
        report.checked.push(name.clone());
    }
    for name in &pages.markdown {
        let path = source.join(format!("{name}.md"));
        read(&path)?;
        referenced.push(format!("{name}.md"));
        report.checked.push(name.clone());
    }
    for name in &pages.verbatim {
        let path = source.join(format!("{name}.html"));
        read(&path)?;
        referenced.push(format!("{name}.html"));
        report.checked.push(name.clone());
    }

    for entry in WalkDir::new(source)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
    {
        let filename = entry.file_name().to_string_lossy().to_string();
        let is_page_source = filename.ends_with(".html") || filename.ends_with(".md");
        if entry.file_type().is_file() && is_page_source && !referenced.contains(&filename) {
            report.unreferenced.push(filename);
        }
    }
    report.unreferenced.sort();

    Ok(report)
}

fn read(path: &Path) -> Result<String, PageError> {
    fs::read_to_string(path).map_err(|e| PageError::Read {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Text between the first `open` and the next `close` after it.
fn between(text: &str, open: char, close: char) -> Option<String> {
    let start = text.find(open)? + open.len_utf8();
    let end = text[start..].find(close)? + start;
    Some(text[start..end].to_string())
}

/// Text between the first `open` and the last `close`, spanning lines.
fn spanning(text: &str, open: char, close: char) -> Option<String> {
    let start = text.find(open)? + open.len_utf8();
    let end = text.rfind(close)?;
    (end >= start).then(|| text[start..end].to_string())
}
