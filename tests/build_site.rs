//! Integration test: build a full fixture project into a temp directory
//! and check the output the way the deployed site would consume it.

use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use pipesite::config::PagesConfig;
use pipesite::icons::{self, layout::Layout};
use pipesite::pages::Builder;

const TEMPLATE: &str = "<!DOCTYPE html>\n<html>\n  <head>\n    <title>$title$</title>\n  </head>\n  <body>\n$body$\n  </body>\n</html>\n";

/// Write a minimal PipeScore-shaped project into a temp dir.
fn setup_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("src/static");
    fs::create_dir_all(&source).unwrap();

    fs::write(source.join("template.html"), TEMPLATE).unwrap();
    fs::write(
        source.join("index.html"),
        "{PipeScore} $index$ %landing%\n[\n<h1>PipeScore</h1>\n<p>Bagpipe notation in the browser.</p>\n]\n",
    )
    .unwrap();
    fs::write(
        source.join("404.html"),
        "{Not found}\n[\n<p>No such page.</p>\n]\n",
    )
    .unwrap();
    fs::write(
        source.join("docs.md"),
        "# User guide\n\nPress `n` to enter note input mode.\n",
    )
    .unwrap();
    fs::write(
        source.join("pipescore.html"),
        "<!DOCTYPE html><html><body><script src=\"dist/app.js\"></script></body></html>",
    )
    .unwrap();

    tmp
}

fn pages_config() -> PagesConfig {
    PagesConfig {
        templated: vec!["index".to_string(), "404".to_string()],
        markdown: vec!["docs".to_string()],
        verbatim: vec!["pipescore".to_string()],
    }
}

fn build_everything(root: &Path) -> Vec<String> {
    let source = root.join("src/static");
    let output = root.join("public");

    let mut written = icons::generate(&Layout::default(), &output).unwrap();
    let builder = Builder::new(&source, &output).unwrap();
    written.extend(builder.build_all(&pages_config()).unwrap());
    written
}

#[test]
fn full_build_produces_the_deployable_tree() {
    let tmp = setup_project();
    build_everything(tmp.path());
    let public = tmp.path().join("public");

    for page in ["index.html", "404.html", "docs.html", "pipescore.html"] {
        assert!(public.join(page).is_file(), "missing {page}");
    }
    for icon in ["crotchet.svg", "gracenote-doubling.svg", "single.svg", "plus.svg"] {
        assert!(
            public.join("images/icons").join(icon).is_file(),
            "missing {icon}"
        );
    }
}

#[test]
fn templated_page_carries_title_body_and_assets() {
    let tmp = setup_project();
    build_everything(tmp.path());

    let index = fs::read_to_string(tmp.path().join("public/index.html")).unwrap();
    assert!(index.contains("<title>PipeScore</title>"));
    assert!(index.contains("<p>Bagpipe notation in the browser.</p>"));

    // Both head insertions, stylesheet link first, script nearer </head>.
    let link = index
        .find("<link type=\"text/css\" rel=\"stylesheet\" href=\"styles/index.css\" />")
        .unwrap();
    let script = index.find("<script src=\"dist/landing.js\"></script>").unwrap();
    assert!(link < script && script < index.find("</head>").unwrap());
}

#[test]
fn verbatim_page_is_copied_byte_for_byte() {
    let tmp = setup_project();
    build_everything(tmp.path());

    let source = fs::read(tmp.path().join("src/static/pipescore.html")).unwrap();
    let copied = fs::read(tmp.path().join("public/pipescore.html")).unwrap();
    assert_eq!(source, copied);
}

#[test]
fn markdown_page_renders_through_the_template() {
    let tmp = setup_project();
    build_everything(tmp.path());

    let docs = fs::read_to_string(tmp.path().join("public/docs.html")).unwrap();
    assert!(docs.contains("<title>User guide</title>"));
    assert!(docs.contains("<h1>User guide</h1>"));
    assert!(docs.contains("<code>n</code>"));
}

#[test]
fn rebuilding_changes_nothing() {
    let tmp = setup_project();
    build_everything(tmp.path());

    let icon_path = tmp.path().join("public/images/icons/semiquaver.svg");
    let page_path = tmp.path().join("public/index.html");
    let icon_before = fs::read(&icon_path).unwrap();
    let page_before = fs::read(&page_path).unwrap();

    build_everything(tmp.path());
    assert_eq!(icon_before, fs::read(&icon_path).unwrap());
    assert_eq!(page_before, fs::read(&page_path).unwrap());
}
