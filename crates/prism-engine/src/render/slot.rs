/// Holds a view's rendering context.
///
/// The context is created after the view exists (GPU setup happens on mount),
/// so the slot starts empty. It is written exactly once and released on
/// teardown. Reads against an empty slot yield `None`; callers treat that as
/// "not ready" and skip the frame.
#[derive(Debug)]
pub struct ContextSlot<C> {
    state: SlotState<C>,
}

#[derive(Debug)]
enum SlotState<C> {
    Pending,
    Ready(C),
    Released,
}

impl<C> ContextSlot<C> {
    pub const fn new() -> Self {
        Self { state: SlotState::Pending }
    }

    /// Stores the context. Only the first install on a pending slot counts;
    /// later ones are dropped.
    pub fn install(&mut self, ctx: C) -> bool {
        match self.state {
            SlotState::Pending => {
                self.state = SlotState::Ready(ctx);
                true
            }
            SlotState::Ready(_) => {
                log::warn!("rendering context already installed; ignoring replacement");
                false
            }
            SlotState::Released => {
                log::warn!("rendering context installed after teardown; ignoring");
                false
            }
        }
    }

    pub fn get(&self) -> Option<&C> {
        match &self.state {
            SlotState::Ready(ctx) => Some(ctx),
            _ => None,
        }
    }

    pub fn get_mut(&mut self) -> Option<&mut C> {
        match &mut self.state {
            SlotState::Ready(ctx) => Some(ctx),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, SlotState::Ready(_))
    }

    /// False once the slot has been released; the frame loop stops here.
    pub fn is_live(&self) -> bool {
        !matches!(self.state, SlotState::Released)
    }

    /// Tears the slot down and hands back the context, if one was installed.
    pub fn release(&mut self) -> Option<C> {
        match std::mem::replace(&mut self.state, SlotState::Released) {
            SlotState::Ready(ctx) => Some(ctx),
            _ => None,
        }
    }
}

impl<C> Default for ContextSlot<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slot_reads_as_not_ready() {
        let mut slot: ContextSlot<u32> = ContextSlot::new();
        assert!(slot.get().is_none());
        assert!(slot.get_mut().is_none());
        assert!(!slot.is_ready());
        assert!(slot.is_live());
    }

    #[test]
    fn install_is_write_once() {
        let mut slot = ContextSlot::new();
        assert!(slot.install(1));
        assert!(!slot.install(2));
        assert_eq!(slot.get(), Some(&1));
    }

    #[test]
    fn release_ends_the_slot() {
        let mut slot = ContextSlot::new();
        slot.install("ctx");
        assert_eq!(slot.release(), Some("ctx"));
        assert!(!slot.is_live());
        assert!(slot.get().is_none());
        assert!(!slot.install("late"));
        assert_eq!(slot.release(), None);
    }

    #[test]
    fn releasing_a_pending_slot_still_stops_it() {
        let mut slot: ContextSlot<()> = ContextSlot::new();
        assert_eq!(slot.release(), None);
        assert!(!slot.is_live());
    }
}
