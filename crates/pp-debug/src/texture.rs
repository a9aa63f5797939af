//! Per-stage texture cache
//!
//! Textures sampled by the debugged program are read back from GPU memory
//! once per bind pass. Each stage owns its own list; invalidating a stage
//! drops every buffer it allocated.

use crate::engine::ResourceProvider;
use pp_core::{DebugError, Result, Stage};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// RGBA8 pixel buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Texture {
    /// Allocate a zeroed buffer
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Texel at integer coordinates, clamped to the edge
    pub fn texel(&self, x: u32, y: u32) -> [u8; 4] {
        let x = x.min(self.width.saturating_sub(1)) as usize;
        let y = y.min(self.height.saturating_sub(1)) as usize;
        let offset = (y * self.width as usize + x) * 4;
        match self.data.get(offset..offset + 4) {
            Some(px) => [px[0], px[1], px[2], px[3]],
            None => [0; 4],
        }
    }
}

/// A cached texture entry
#[derive(Debug, Clone)]
struct CachedTexture {
    /// Sampler slot the texture is bound to
    slot: u32,
    /// Resource the pixels were read from
    resource: String,
    texture: Arc<Texture>,
}

/// Texture cache keyed by owning stage, one entry per sampler slot
#[derive(Debug)]
pub struct TextureCache {
    stages: HashMap<Stage, Vec<CachedTexture>>,
    fallback_size: (u32, u32),
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new((1, 1))
    }
}

impl TextureCache {
    /// Create an empty cache; `fallback_size` is used for resources of unknown size
    pub fn new(fallback_size: (u32, u32)) -> Self {
        Self {
            stages: HashMap::new(),
            fallback_size,
        }
    }

    /// Get the pixels of `resource` bound at `slot` for `stage`, reading them back if needed
    ///
    /// Slots sharing a resource each hold their own buffer. A slot rebound
    /// to another resource is read again. A cached entry whose size no
    /// longer matches the bound resource is an error: the stage must be
    /// invalidated so the buffer is rebuilt.
    pub fn acquire(
        &mut self,
        stage: Stage,
        slot: u32,
        resource: &str,
        provider: &mut dyn ResourceProvider,
    ) -> Result<Arc<Texture>> {
        let (width, height) = provider.texture_size(resource).unwrap_or(self.fallback_size);
        let entries = self.stages.entry(stage).or_default();

        if let Some(pos) = entries.iter().position(|t| t.slot == slot) {
            let cached = &entries[pos];
            if cached.resource == resource {
                if cached.texture.dimensions() != (width, height) {
                    return Err(DebugError::ResourceSizeMismatch {
                        resource: resource.to_string(),
                        cached: cached.texture.dimensions(),
                        bound: (width, height),
                    });
                }
                trace!("Texture '{}' reused at slot {} for {} stage", resource, slot, stage);
                return Ok(Arc::clone(&cached.texture));
            }
            trace!("Slot {} rebound from '{}' to '{}'", slot, cached.resource, resource);
            entries.remove(pos);
        }

        let mut texture = Texture::new(width, height);
        provider.read_pixels(resource, width, height, texture.data_mut());
        trace!(
            "Texture '{}' read back ({}x{}) at slot {} for {} stage",
            resource, width, height, slot, stage
        );

        let texture = Arc::new(texture);
        entries.push(CachedTexture {
            slot,
            resource: resource.to_string(),
            texture: Arc::clone(&texture),
        });
        Ok(texture)
    }

    /// Release every buffer owned by `stage`
    pub fn invalidate(&mut self, stage: Stage) {
        if let Some(entries) = self.stages.get_mut(&stage) {
            if !entries.is_empty() {
                debug!("Releasing {} cached textures for {} stage", entries.len(), stage);
            }
            entries.clear();
        }
    }

    /// Release everything
    pub fn clear(&mut self) {
        self.stages.clear();
    }

    /// Number of cached textures for `stage`
    pub fn len(&self, stage: Stage) -> usize {
        self.stages.get(&stage).map_or(0, Vec::len)
    }

    pub fn is_empty(&self, stage: Stage) -> bool {
        self.len(stage) == 0
    }

    /// Cached texture bound at `slot` for `stage`
    pub fn at_slot(&self, stage: Stage, slot: u32) -> Option<&Arc<Texture>> {
        self.stages
            .get(&stage)?
            .iter()
            .find(|t| t.slot == slot)
            .map(|t| &t.texture)
    }

    /// First cached texture read from `resource` for `stage`
    pub fn get(&self, stage: Stage, resource: &str) -> Option<&Arc<Texture>> {
        self.stages
            .get(&stage)?
            .iter()
            .find(|t| t.resource == resource)
            .map(|t| &t.texture)
    }
}
