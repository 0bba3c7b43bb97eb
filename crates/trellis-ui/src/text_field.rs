//! Character input for `TextField` widgets.

use crate::event::{EventSink, UiEvent, names};
use crate::property::{PropertySource, PropertyState, props};
use crate::tree::UiTree;
use crate::widget_id::WidgetId;
use trellis_input::BACKSPACE;

impl UiTree {
    /// Feed typed characters into a text field.
    ///
    /// Backspace removes the last character, control characters are dropped
    /// and input beyond `MaxLength` characters is ignored. Returns whether the
    /// text changed; if it did, `OnTextChanged` is published with the new text.
    pub fn text_field_input(&mut self, id: WidgetId, input: &[char], events: &mut dyn EventSink) -> bool {
        let Some(node) = self.get(id) else {
            return false;
        };
        if !node.kind().is_text_field() || input.is_empty() {
            return false;
        }

        let max_length = node.property_or(&props::MAX_LENGTH, i32::MAX).max(0) as usize;
        let original = node.property_or(&props::TEXT, String::new());
        let mut text = original.clone();
        let mut length = text.chars().count();

        for &c in input {
            if c == BACKSPACE {
                if text.pop().is_some() {
                    length -= 1;
                }
            } else if c.is_control() {
                continue;
            } else if length < max_length {
                text.push(c);
                length += 1;
            }
        }

        if text == original {
            return false;
        }

        self.set_property(
            id,
            &props::TEXT,
            text.clone(),
            PropertySource::WidgetSpecific,
            PropertyState::All,
        );
        events.publish(UiEvent::new(names::ON_TEXT_CHANGED, id).with("text", text));
        true
    }
}
