use crate::collision::{Collidable, Effects, HitEffect};
use crate::geometry::Rect;

/// What a trigger does when the player walks into it.
#[derive(Clone, Debug, PartialEq)]
pub enum TriggerAction {
    /// Queue a text box.
    Text(String),
}

/// A rectangular pixel region reacting to the player's hit rect.
///
/// `on_hit` runs every frame the player overlaps the region, but the action
/// only fires on entry. One-shot triggers never fire again; repeatable ones
/// re-arm once a frame passes without contact (see [`Trigger::end_frame`]).
#[derive(Clone, Debug)]
pub struct Trigger {
    pub rect: Rect,
    pub action: TriggerAction,
    pub repeat: bool,
    hits: u32,
    armed: bool,
    touched: bool,
}

impl Trigger {
    pub fn new(rect: Rect, action: TriggerAction, repeat: bool) -> Self {
        Self { rect, action, repeat, hits: 0, armed: true, touched: false }
    }

    pub fn text(rect: Rect, text: &str) -> Self {
        Self::new(rect, TriggerAction::Text(text.into()), false)
    }

    /// How many times `on_hit` has been called.
    pub fn hit_count(&self) -> u32 { self.hits }

    pub fn is_spent(&self) -> bool {
        !self.repeat && !self.armed
    }

    /// Call once per frame after dispatch.
    pub fn end_frame(&mut self) {
        if self.repeat && !self.touched {
            self.armed = true;
        }
        self.touched = false;
    }
}

impl Collidable for Trigger {
    fn hit_rect(&self) -> Rect { self.rect }

    fn on_hit(&mut self, effects: &mut Effects) {
        self.hits += 1;
        self.touched = true;
        if !self.armed {
            return;
        }
        self.armed = false;
        match &self.action {
            TriggerAction::Text(text) => effects.push(HitEffect::ShowText(text.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeatable_trigger_rearms_after_leaving() {
        let mut t = Trigger::new(Rect::new(0.0, 0.0, 10.0, 10.0), TriggerAction::Text("hi".into()), true);
        let mut fx = Effects::new();

        t.on_hit(&mut fx);
        t.end_frame();
        t.on_hit(&mut fx);
        t.end_frame();
        assert_eq!(fx.len(), 1, "standing inside fires once");

        t.end_frame(); // a frame without contact
        t.on_hit(&mut fx);
        assert_eq!(fx.len(), 2);
        assert_eq!(t.hit_count(), 3);
    }

    #[test]
    fn one_shot_trigger_is_spent_after_first_hit() {
        let mut t = Trigger::text(Rect::new(0.0, 0.0, 10.0, 10.0), "once");
        let mut fx = Effects::new();
        t.on_hit(&mut fx);
        t.end_frame();
        t.end_frame();
        t.on_hit(&mut fx);
        assert!(t.is_spent());
        assert_eq!(fx.len(), 1);
    }
}
