//! # pipesite
//!
//! Build tooling for the PipeScore web app. Three independent utilities
//! share one binary:
//!
//! ```text
//! 1. Icons    fixed tables  →  public/images/icons/*.svg
//! 2. Pages    src/static/   →  public/*.html
//! 3. Serve    public/       →  http://localhost:5000
//! ```
//!
//! The icon generator and page builder are batch build steps: pure
//! compute-and-write passes over fixed inputs, deterministic and safe to
//! re-run. The dev server mirrors the hosting provider's production
//! routing so pages can be previewed locally without deploy credentials.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`icons`] | Draws the editor's SVG icon set from fixed geometry tables |
//! | [`pages`] | Merges page sources into the shared HTML template |
//! | [`serve`] | Static file server with first-match-wins path rewriting |
//! | [`config`] | Optional `pipesite.toml` over stock defaults |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Placeholder Template, Not a Template Engine
//!
//! The shared `template.html` is owned by the web project and consumed by
//! other tooling, so [`pages`] substitutes its `$title$`/`$body$` tokens
//! textually and preserves every other byte rather than re-rendering the
//! document through a template engine.
//!
//! ## Deterministic Icon Output
//!
//! Icon drawings derive everything, including SVG mask ids, from the icon
//! tables. Regenerating with unchanged constants rewrites byte-identical
//! files, which keeps icon output diffs honest in version control.
//!
//! ## One Binary, No Script Interpreter
//!
//! These chores previously needed a Python interpreter and a drawing
//! package installed per machine. A single compiled binary removes the
//! missing-dependency failure mode entirely; there is nothing to install
//! before a build.

pub mod config;
pub mod icons;
pub mod output;
pub mod pages;
pub mod serve;
