use crate::types::EntityKind;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const DEFAULT_TEMPLATES_DIR: &str = "netwatch_templates";
pub const TEMPLATE_EXT: &str = "yara";
pub const BODY_TEMPLATE_STEM: &str = "_body";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn body_template(dir: &Path) -> PathBuf {
    dir.join(format!("{BODY_TEMPLATE_STEM}.{TEMPLATE_EXT}"))
}

pub fn kind_template(dir: &Path, kind: EntityKind) -> PathBuf {
    dir.join(format!("{}.{TEMPLATE_EXT}", kind.as_str()))
}

/// Every template file a run needs, body first.
pub fn required_templates(dir: &Path) -> Vec<PathBuf> {
    std::iter::once(body_template(dir))
        .chain(EntityKind::all().iter().map(|k| kind_template(dir, *k)))
        .collect()
}
