use trellis_core::geometry::Size;

/// Settings for a [`UiManager`](crate::manager::UiManager).
#[derive(Debug, Clone, PartialEq)]
pub struct UiConfig {
    /// Size of the root widget in UI units.
    pub viewport: Size<f32>,
    /// Publish `PlayUISound` events on state transitions.
    pub ui_sounds: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            viewport: Size::new(800.0, 600.0),
            ui_sounds: true,
        }
    }
}

impl UiConfig {
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Size::new(width, height);
        self
    }

    pub fn without_sounds(mut self) -> Self {
        self.ui_sounds = false;
        self
    }
}
