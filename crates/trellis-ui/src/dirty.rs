//! Dirty flag tracking for widget nodes.

use bitflags::bitflags;

bitflags! {
    /// What a widget must recompute before it is next rendered.
    ///
    /// `Dirty()` on a widget sets [`DirtyFlags::ALL`] on it and every
    /// descendant. Narrower marks exist for changes that provably leave the
    /// rest untouched, such as a held item following the cursor.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DirtyFlags: u8 {
        /// No changes
        const NONE      = 0b0000;

        /// Cached size is stale. Setting this invalidates the size cache.
        const LAYOUT    = 0b0001;

        /// Shader uniforms (colors, textures, progress) must be re-resolved.
        const UNIFORMS  = 0b0010;

        /// Mesh must be rebuilt (text content, mesh kind).
        const GEOMETRY  = 0b0100;

        /// World transform moved.
        const TRANSFORM = 0b1000;

        const ALL = Self::LAYOUT.bits()
            | Self::UNIFORMS.bits()
            | Self::GEOMETRY.bits()
            | Self::TRANSFORM.bits();
    }
}

impl DirtyFlags {
    /// Returns true if the size cache must be dropped.
    #[inline]
    pub fn invalidates_layout(&self) -> bool {
        self.contains(Self::LAYOUT)
    }

    /// Returns true if the visual (mesh, uniforms or transform) needs a refresh.
    ///
    /// A layout change moves the widget, so it implies a transform refresh.
    #[inline]
    pub fn needs_visual_refresh(&self) -> bool {
        !self.is_empty()
    }

    #[inline]
    pub fn needs_transform(&self) -> bool {
        self.intersects(Self::TRANSFORM | Self::LAYOUT)
    }

    #[inline]
    pub fn needs_geometry(&self) -> bool {
        self.intersects(Self::GEOMETRY | Self::LAYOUT)
    }
}

impl Default for DirtyFlags {
    fn default() -> Self {
        Self::NONE
    }
}
