// src/gesture_lib/panel.rs

use log::info;

/// UI panel that stays hidden until the first contact on its trigger, then
/// stays visible.
#[derive(Debug, Default, Clone)]
pub struct PanelTrigger {
    visible: bool,
}

impl PanelTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns true only on the contact that actually showed the panel.
    pub fn activate(&mut self) -> bool {
        if self.visible {
            return false;
        }
        self.visible = true;
        info!("Trigger contact; panel shown");
        true
    }
}
