use std::collections::HashMap;

use crate::assets::manifest::AssetManifest;
use crate::components::sprite::{sheets, FrameSource};

/// Answers whether the renderer can draw from a frame source yet.
pub trait FrameSourceStatus {
    fn is_ready(&self, source: FrameSource) -> bool;
}

/// Readiness of every known sprite sheet.
/// The host marks sheets ready as their images finish decoding.
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    names: HashMap<String, FrameSource>,
    ready: Vec<bool>,
}

impl SourceRegistry {
    /// A registry with `count` anonymous sources, none ready.
    pub fn new(count: u32) -> Self {
        Self {
            names: HashMap::new(),
            ready: vec![false; count as usize],
        }
    }

    /// Sized for the built-in sheet ids.
    pub fn builtin() -> Self {
        Self::new(sheets::COUNT)
    }

    /// One source per manifest sheet, by index.
    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        let names = manifest
            .sheets
            .iter()
            .enumerate()
            .map(|(i, sheet)| (sheet.name.clone(), FrameSource(i as u32)))
            .collect();
        Self {
            names,
            ready: vec![false; manifest.sheets.len()],
        }
    }

    pub fn lookup(&self, name: &str) -> Option<FrameSource> {
        self.names.get(name).copied()
    }

    /// Mark a source drawable. Unknown ids are ignored.
    pub fn mark_ready(&mut self, source: FrameSource) {
        match self.ready.get_mut(source.0 as usize) {
            Some(flag) => *flag = true,
            None => log::warn!("mark_ready: unknown frame source {}", source.0),
        }
    }

    pub fn mark_all_ready(&mut self) {
        self.ready.iter_mut().for_each(|flag| *flag = true);
    }

    pub fn ready_count(&self) -> usize {
        self.ready.iter().filter(|r| **r).count()
    }

    pub fn len(&self) -> usize {
        self.ready.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ready.is_empty()
    }
}

impl FrameSourceStatus for SourceRegistry {
    fn is_ready(&self, source: FrameSource) -> bool {
        self.ready.get(source.0 as usize).copied().unwrap_or(false)
    }
}
