//! SVG icon generation.
//!
//! Draws the icon set the PipeScore editor UI loads at runtime: one file
//! per icon under `images/icons/` in the public output directory. Three
//! families share a fixed 100×100 canvas:
//!
//! - [`notes`]: note-length icons (semibreve through hemidemisemiquaver)
//! - [`gracenotes`]: embellishment icons (`gracenote-<name>.svg`) plus the
//!   single gracenote
//! - [`symbols`]: toolbar symbols (plus, minus, undo, natural)
//!
//! Generation is a pure compute-and-write pass over fixed tables. Nothing
//! in a drawing depends on the environment and the `svg` crate emits
//! attributes in sorted order, so regenerating with unchanged constants
//! rewrites byte-identical files and the step is safe to run any number
//! of times.

pub mod gracenotes;
pub mod layout;
pub mod notes;
pub mod symbols;

use std::fs;
use std::path::Path;

use svg::Document;
use thiserror::Error;

use self::layout::Layout;

/// Where icons land, relative to the public output root.
pub const ICON_DIR: &str = "images/icons";

#[derive(Error, Debug)]
pub enum IconError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A rendered icon ready to be written: file stem plus document.
pub struct Icon {
    pub name: String,
    pub document: Document,
}

/// Render every icon in the set.
pub fn render_all(layout: &Layout) -> Vec<Icon> {
    let mut icons = Vec::new();

    for spec in notes::NOTES {
        icons.push(Icon {
            name: spec.name.to_string(),
            document: notes::draw_note(layout, spec),
        });
    }

    for spec in gracenotes::EMBELLISHMENTS {
        icons.push(Icon {
            name: format!("gracenote-{}", spec.name),
            document: gracenotes::draw_embellishment(layout, spec),
        });
    }
    icons.push(Icon {
        name: "single".to_string(),
        document: gracenotes::draw_single(layout),
    });

    icons.push(Icon {
        name: "plus".to_string(),
        document: symbols::draw_plus(layout),
    });
    icons.push(Icon {
        name: "minus".to_string(),
        document: symbols::draw_minus(layout),
    });
    icons.push(Icon {
        name: "undo".to_string(),
        document: symbols::draw_undo(layout),
    });
    icons.push(Icon {
        name: "natural".to_string(),
        document: symbols::draw_natural(layout),
    });

    icons
}

/// Render and write the full icon set under `output_root`, creating the
/// icons directory if needed. Returns the written file names in order.
pub fn generate(layout: &Layout, output_root: &Path) -> Result<Vec<String>, IconError> {
    let dir = output_root.join(ICON_DIR);
    fs::create_dir_all(&dir)?;

    let mut written = Vec::new();
    for icon in render_all(layout) {
        let filename = format!("{}.svg", icon.name);
        svg::save(dir.join(&filename), &icon.document)?;
        written.push(filename);
    }
    Ok(written)
}

/// An empty document at the canvas size; every drawing starts from this.
fn canvas(layout: &Layout) -> Document {
    Document::new()
        .set("width", layout.width)
        .set("height", layout.height)
        .set("viewBox", (0.0, 0.0, layout.width, layout.height))
}
